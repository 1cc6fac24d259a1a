//! Entity kinds and the per-kind capabilities injected into the engine.

use async_trait::async_trait;

use s2s_core::result::{AppResult, ShareResult};
use s2s_core::types::ValidationErrors;
use s2s_database::ChangeSet;
use s2s_entity::Record;
use s2s_entity::share::{AssociatedEntityWrapper, OriginInfo, ShareEnvelope, ShareOptions};

use super::processed::ProcessedData;
use crate::context::RequestContext;

/// A kind of entity that can be exchanged (case, contact, event).
pub trait ShareKind: std::fmt::Debug + Send + Sync + 'static {
    /// The primary entity.
    type Entity: Record;

    /// What travels on the wire for one entity.
    type Envelope: ShareEnvelope<Entity = Self::Entity>;

    /// Endpoint below the S2S resource path, e.g. `"/cases"`.
    const ENDPOINT: &'static str;
}

/// One envelope plus the sub-entities travelling with it.
#[derive(Debug, Clone)]
pub struct ShareData<V> {
    /// The envelope to transmit.
    pub envelope: V,
    /// Sub-entities bundled into the envelope, each of which gets its own
    /// share info once the envelope was delivered.
    pub associated: Vec<AssociatedEntityWrapper>,
}

/// Turns a local entity into what is sent to a peer.
#[async_trait]
pub trait ShareDataBuilder<K: ShareKind>: Send + Sync + std::fmt::Debug + 'static {
    /// Kind-specific checks before sending. An empty list means the entity
    /// may be sent.
    async fn validate_before_send(&self, entity: &K::Entity) -> AppResult<ValidationErrors>;

    /// Build the envelope and collect its associated entities.
    async fn build_share_data(
        &self,
        entity: &K::Entity,
        sender: &RequestContext,
        options: &ShareOptions,
    ) -> AppResult<ShareData<K::Envelope>>;
}

/// Turns a received envelope into data ready to be persisted.
#[async_trait]
pub trait ReceivedDataProcessor<K: ShareKind>: Send + Sync + std::fmt::Debug + 'static {
    /// Merge the envelope with the local entity, if any.
    ///
    /// `existing` is `None` for new shares. A
    /// [`s2s_core::ShareError::Validation`] result rejects the entity; the
    /// engine merges its report into the batch report.
    async fn process_received_data(
        &self,
        envelope: K::Envelope,
        existing: Option<K::Entity>,
    ) -> ShareResult<ProcessedData<K::Entity>>;
}

/// Stages processed data into a change set.
#[async_trait]
pub trait ProcessedDataPersister<K: ShareKind>: Send + Sync + std::fmt::Debug + 'static {
    /// A new share: the entity and its sub-entities are created.
    async fn persist_shared_data(&self, data: ProcessedData<K::Entity>) -> AppResult<ChangeSet>;

    /// A return: the entity comes back from the organization in
    /// `origin_info`, which held its ownership.
    async fn persist_returned_data(
        &self,
        data: ProcessedData<K::Entity>,
        origin_info: OriginInfo,
    ) -> AppResult<ChangeSet>;

    /// A sync: the entity is merged, its origin stays as it is.
    async fn persist_sync_data(&self, data: ProcessedData<K::Entity>) -> AppResult<ChangeSet>;
}
