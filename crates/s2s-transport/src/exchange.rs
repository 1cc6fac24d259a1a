//! Encrypt-and-send / receive-and-decrypt in one call per direction.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use s2s_core::error::ShareError;
use s2s_core::result::ShareResult;
use s2s_core::traits::S2sTransport;
use s2s_core::types::EncryptedData;

use crate::crypto;
use crate::registry::OrganizationRegistry;

/// HTTP method used to deliver a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendMethod {
    /// Share and sync.
    Post,
    /// Return.
    Put,
}

/// Client used by the protocol engine to talk to peers.
#[derive(Debug, Clone)]
pub struct ExchangeClient {
    registry: Arc<OrganizationRegistry>,
    transport: Arc<dyn S2sTransport>,
}

impl ExchangeClient {
    /// Create a new exchange client.
    pub fn new(registry: Arc<OrganizationRegistry>, transport: Arc<dyn S2sTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// The organization registry.
    pub fn registry(&self) -> &OrganizationRegistry {
        &self.registry
    }

    /// Serialize and encrypt a batch for a peer.
    pub fn encrypt<T: Serialize>(
        &self,
        entities: &[T],
        organization_id: &str,
    ) -> ShareResult<EncryptedData> {
        let peer = self.registry.peer(organization_id)?;
        let json = serde_json::to_vec(entities).map_err(s2s_core::AppError::from)?;
        let data = crypto::seal(peer.key(), &json)?;
        Ok(EncryptedData::new(self.registry.own_organization_id(), data))
    }

    /// Decrypt a payload received from a peer into its envelopes.
    pub fn decrypt<T: DeserializeOwned>(&self, payload: &EncryptedData) -> ShareResult<Vec<T>> {
        let peer = self.registry.peer(&payload.sender_id)?;
        let json = crypto::open(peer.key(), &payload.data).map_err(|e| {
            warn!(sender_id = %payload.sender_id, error = %e, "Failed to decrypt S2S payload");
            ShareError::share(format!(
                "Failed to decrypt data from {}",
                payload.sender_id
            ))
        })?;
        serde_json::from_slice(&json).map_err(|e| {
            ShareError::share(format!(
                "Malformed data from {}: {e}",
                payload.sender_id
            ))
        })
    }

    /// Encrypt a batch and deliver it to `{resource_path}{endpoint}` of a peer.
    pub async fn send<T: Serialize + Sync>(
        &self,
        method: SendMethod,
        organization_id: &str,
        endpoint: &str,
        entities: &[T],
    ) -> ShareResult<()> {
        let payload = self.encrypt(entities, organization_id)?;
        let peer = self.registry.peer(organization_id)?;
        let path = format!("{}{endpoint}", self.registry.resource_path());

        debug!(
            organization_id,
            path = %path,
            count = entities.len(),
            ?method,
            "Delivering S2S batch"
        );

        match method {
            SendMethod::Post => {
                self.transport
                    .post(&peer.host, &path, peer.auth_token(), &payload)
                    .await
            }
            SendMethod::Put => {
                self.transport
                    .put(&peer.host, &path, peer.auth_token(), &payload)
                    .await
            }
        }
    }
}
