//! Shared test helpers for integration tests.
//!
//! Two or more in-memory instances are wired together through a loopback
//! transport that hands encrypted payloads straight to the receiving
//! instance's engines, the way the peer-facing HTTP handlers would.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tokio::sync::RwLock;
use tower::ServiceExt;
use uuid::Uuid;

use s2s_api::{AppState, build_app};
use s2s_core::config::app::ServerConfig;
use s2s_core::config::exchange::{PeerOrganizationConfig, SormasToSormasConfig};
use s2s_core::error::ShareError;
use s2s_core::result::ShareResult;
use s2s_core::traits::S2sTransport;
use s2s_core::types::{EncryptedData, UserId};
use s2s_database::{ChangeSet, ChangeSetWriter, LedgerStore, MemoryStore, RecordStore};
use s2s_entity::Record;
use s2s_entity::share::{OriginInfo, ShareInfo};
use s2s_service::{RequestContext, S2sServices, build_services};
use s2s_transport::{ExchangeClient, OrganizationRegistry};

/// Resource path used by every test instance.
pub const RESOURCE_PATH: &str = "/sormasToSormas";

/// Base64 of the 32-byte key every pair of test instances shares.
pub fn shared_key() -> String {
    format!("{}=", "A".repeat(43))
}

fn host_of(organization_id: &str) -> String {
    format!("http://{organization_id}.test")
}

/// In-process network of instances keyed by host.
#[derive(Debug, Clone, Default)]
pub struct Network {
    instances: Arc<RwLock<HashMap<String, S2sServices>>>,
    deliveries: Arc<AtomicUsize>,
    last_payload: Arc<Mutex<Option<EncryptedData>>>,
    unreachable: Arc<Mutex<HashSet<String>>>,
}

impl Network {
    /// Number of payloads delivered so far, successful or not.
    pub fn deliveries(&self) -> usize {
        self.deliveries.load(Ordering::SeqCst)
    }

    /// The most recently delivered payload.
    pub fn last_payload(&self) -> Option<EncryptedData> {
        self.last_payload.lock().expect("payload lock").clone()
    }

    /// Make an organization's host refuse every delivery.
    pub fn take_down(&self, organization_id: &str) {
        self.unreachable
            .lock()
            .expect("unreachable lock")
            .insert(host_of(organization_id));
    }

    async fn deliver(
        &self,
        put: bool,
        host: &str,
        endpoint: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()> {
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().expect("payload lock") = Some(payload.clone());

        if self.unreachable.lock().expect("unreachable lock").contains(host) {
            return Err(ShareError::share(format!("Failed to reach {host}{endpoint}")));
        }

        let services = self
            .instances
            .read()
            .await
            .get(host)
            .cloned()
            .ok_or_else(|| ShareError::share(format!("Failed to reach {host}{endpoint}")))?;

        let route = endpoint.strip_prefix(RESOURCE_PATH).unwrap_or(endpoint);
        let (resource, sync) = match route.trim_start_matches('/').split_once('/') {
            Some((resource, "sync")) => (resource, true),
            _ => (route.trim_start_matches('/'), false),
        };
        let engine = services
            .for_resource(resource)
            .ok_or_else(|| ShareError::share(format!("Unknown endpoint {endpoint}")))?;

        match (put, sync) {
            (false, false) => engine.save_shared_entities(payload).await,
            (true, false) => engine.save_returned_entity(payload).await,
            (false, true) => engine.save_synced_entity(payload).await,
            (true, true) => Err(ShareError::share("PUT is not supported for sync")),
        }
    }
}

/// Transport that delivers into the [`Network`].
#[derive(Debug, Clone)]
pub struct LoopbackTransport {
    network: Network,
}

#[async_trait]
impl S2sTransport for LoopbackTransport {
    async fn post(
        &self,
        host: &str,
        endpoint: &str,
        _auth_token: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()> {
        self.network.deliver(false, host, endpoint, payload).await
    }

    async fn put(
        &self,
        host: &str,
        endpoint: &str,
        _auth_token: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()> {
        self.network.deliver(true, host, endpoint, payload).await
    }
}

/// One instance of the exchange with its own in-memory store.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Own organization id.
    pub organization_id: String,
    /// The instance's store.
    pub store: Arc<MemoryStore>,
    /// The instance's engines.
    pub services: S2sServices,
}

impl Instance {
    /// Store records directly, bypassing the exchange.
    pub async fn seed<R: Record>(&self, records: &[R]) {
        let mut changes = ChangeSet::new();
        for record in records {
            changes.upsert(record).expect("stage record");
        }
        self.store.apply(changes).await.expect("seed records");
    }

    /// Load a record.
    pub async fn get<R: Record>(&self, uuid: Uuid) -> Option<R> {
        RecordStore::<R>::get_by_uuid(self.store.as_ref(), uuid)
            .await
            .expect("load record")
    }

    /// Share infos of a record, oldest first.
    pub async fn share_infos_of<R: Record>(&self, record: &R) -> Vec<ShareInfo> {
        self.store
            .share_infos_of(&record.association())
            .await
            .expect("load share infos")
    }

    /// Origin info a received record points at.
    pub async fn origin_of<R: Record>(&self, uuid: Uuid) -> Option<OriginInfo> {
        let record: R = self.get(uuid).await?;
        let id = record.origin_info_id()?;
        self.store.find_origin_info(id).await.expect("load origin info")
    }

    /// Whether the record may be edited here.
    pub async fn is_editable<R: Record>(&self, uuid: Uuid) -> bool {
        let record: R = self.get(uuid).await.expect("record exists");
        self.services
            .ledger
            .is_edit_allowed(&record)
            .await
            .expect("editability")
    }

    /// Router serving this instance's HTTP API.
    pub fn router(&self) -> Router {
        build_app(AppState::new(self.services.clone(), ServerConfig::default()))
    }
}

/// Build instances that all know each other as peers.
pub async fn network_of(organization_ids: &[&str]) -> (Network, Vec<Instance>) {
    let network = Network::default();
    let mut instances = Vec::with_capacity(organization_ids.len());

    for own in organization_ids {
        let config = SormasToSormasConfig {
            organization_id: own.to_string(),
            organization_name: format!("{own} health department"),
            resource_path: RESOURCE_PATH.to_string(),
            request_timeout_seconds: 5,
            peers: organization_ids
                .iter()
                .filter(|peer| *peer != own)
                .map(|peer| PeerOrganizationConfig {
                    id: peer.to_string(),
                    name: format!("{peer} health department"),
                    host: host_of(peer),
                    auth_token: format!("token-{peer}"),
                    shared_key: shared_key(),
                })
                .collect(),
        };

        let registry = Arc::new(OrganizationRegistry::from_config(&config).expect("registry"));
        let transport = Arc::new(LoopbackTransport {
            network: network.clone(),
        });
        let exchange = Arc::new(ExchangeClient::new(registry, transport));
        let store = Arc::new(MemoryStore::new());
        let services = build_services(store.clone(), exchange);

        network
            .instances
            .write()
            .await
            .insert(host_of(own), services.clone());
        instances.push(Instance {
            organization_id: own.to_string(),
            store,
            services,
        });
    }

    (network, instances)
}

/// Two instances, `health-a` and `health-b`.
pub async fn two_instances() -> (Network, Instance, Instance) {
    let (network, mut instances) = network_of(&["health-a", "health-b"]).await;
    let b = instances.pop().expect("instance b");
    let a = instances.pop().expect("instance a");
    (network, a, b)
}

/// A local user.
pub fn sender(name: &str) -> RequestContext {
    RequestContext::new(UserId::new(), name)
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// Make an HTTP request against a router.
pub async fn request(
    router: &Router,
    method: &str,
    path: &str,
    body: Option<Value>,
    user: Option<&RequestContext>,
) -> TestResponse {
    let body_str = body
        .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
        .unwrap_or_default();

    let mut req = Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json");

    if let Some(user) = user {
        req = req
            .header("x-user-id", user.user_id.to_string())
            .header("x-user-name", user.user_name.clone());
    }

    let req = req
        .body(Body::from(body_str))
        .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");

    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}
