//! Composition of the three entity kinds over one store.

use std::sync::Arc;

use s2s_database::{ChangeSetWriter, DataStore, LedgerStore, RelatedRecords};
use s2s_transport::{ExchangeClient, OrganizationRegistry};

use crate::case::{CaseKind, CaseReceivedDataProcessor, CaseShareDataBuilder};
use crate::contact::{ContactKind, ContactReceivedDataProcessor, ContactShareDataBuilder};
use crate::event::{EventKind, EventReceivedDataProcessor, EventShareDataBuilder};
use crate::ledger::ShareInfoLedger;
use crate::protocol::{ChangeSetPersister, ShareProtocol, SormasToSormasEntityInterface};

/// The protocol engines of every entity kind, ready for the HTTP layer.
#[derive(Debug, Clone)]
pub struct S2sServices {
    /// Case engine.
    pub cases: Arc<dyn SormasToSormasEntityInterface>,
    /// Contact engine.
    pub contacts: Arc<dyn SormasToSormasEntityInterface>,
    /// Event engine.
    pub events: Arc<dyn SormasToSormasEntityInterface>,
    /// Shared share-info ledger.
    pub ledger: Arc<ShareInfoLedger>,
    /// Outbound exchange client.
    pub exchange: Arc<ExchangeClient>,
}

impl S2sServices {
    /// Engine serving a resource segment (`cases`, `contacts`, `events`).
    pub fn for_resource(&self, resource: &str) -> Option<&Arc<dyn SormasToSormasEntityInterface>> {
        match resource {
            "cases" => Some(&self.cases),
            "contacts" => Some(&self.contacts),
            "events" => Some(&self.events),
            _ => None,
        }
    }

    /// Own organization and known peers.
    pub fn registry(&self) -> &OrganizationRegistry {
        self.exchange.registry()
    }
}

/// Build every engine on top of `store`.
pub fn build_services<S: DataStore>(store: Arc<S>, exchange: Arc<ExchangeClient>) -> S2sServices {
    let organization_id = exchange.registry().own_organization_id().to_string();

    let ledger_store: Arc<dyn LedgerStore> = store.clone();
    let related: Arc<dyn RelatedRecords> = store.clone();
    let writer: Arc<dyn ChangeSetWriter> = store.clone();

    let ledger = Arc::new(ShareInfoLedger::new(ledger_store));
    let persister = Arc::new(ChangeSetPersister::new(ledger.clone()));

    let cases = ShareProtocol::<CaseKind>::new(
        store.clone(),
        Arc::new(CaseShareDataBuilder::new(
            related.clone(),
            ledger.clone(),
            organization_id.clone(),
        )),
        Arc::new(CaseReceivedDataProcessor::new(store.clone(), store.clone())),
        persister.clone(),
        ledger.clone(),
        writer.clone(),
        exchange.clone(),
    );

    let contacts = ShareProtocol::<ContactKind>::new(
        store.clone(),
        Arc::new(ContactShareDataBuilder::new(
            related.clone(),
            ledger.clone(),
            organization_id.clone(),
        )),
        Arc::new(ContactReceivedDataProcessor::new(store.clone(), store.clone())),
        persister.clone(),
        ledger.clone(),
        writer.clone(),
        exchange.clone(),
    );

    let events = ShareProtocol::<EventKind>::new(
        store.clone(),
        Arc::new(EventShareDataBuilder::new(related, ledger.clone(), organization_id)),
        Arc::new(EventReceivedDataProcessor::new(store)),
        persister,
        ledger.clone(),
        writer,
        exchange.clone(),
    );

    S2sServices {
        cases: Arc::new(cases),
        contacts: Arc::new(contacts),
        events: Arc::new(events),
        ledger,
        exchange,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use s2s_core::config::exchange::SormasToSormasConfig;
    use s2s_core::result::ShareResult;
    use s2s_core::traits::S2sTransport;
    use s2s_core::types::EncryptedData;
    use s2s_database::MemoryStore;

    #[derive(Debug)]
    struct NoopTransport;

    #[async_trait]
    impl S2sTransport for NoopTransport {
        async fn post(&self, _: &str, _: &str, _: &str, _: &EncryptedData) -> ShareResult<()> {
            Ok(())
        }

        async fn put(&self, _: &str, _: &str, _: &str, _: &EncryptedData) -> ShareResult<()> {
            Ok(())
        }
    }

    fn services() -> S2sServices {
        let config = SormasToSormasConfig {
            organization_id: "own".to_string(),
            organization_name: "Own".to_string(),
            resource_path: "/sormasToSormas".to_string(),
            request_timeout_seconds: 5,
            peers: Vec::new(),
        };
        let registry = Arc::new(OrganizationRegistry::from_config(&config).unwrap());
        let exchange = Arc::new(ExchangeClient::new(registry, Arc::new(NoopTransport)));
        build_services(Arc::new(MemoryStore::new()), exchange)
    }

    #[test]
    fn test_for_resource() {
        let services = services();
        assert!(services.for_resource("cases").is_some());
        assert!(services.for_resource("contacts").is_some());
        assert!(services.for_resource("events").is_some());
        assert!(services.for_resource("samples").is_none());
    }

    #[test]
    fn test_registry_exposes_own_organization() {
        assert_eq!(services().registry().own_organization_id(), "own");
    }
}
