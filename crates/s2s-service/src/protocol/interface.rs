//! Kind-agnostic entry point used by the HTTP layer.

use async_trait::async_trait;
use uuid::Uuid;

use s2s_core::result::ShareResult;
use s2s_core::types::EncryptedData;
use s2s_entity::share::{ShareInfo, ShareOptions};

use super::engine::ShareProtocol;
use super::kind::ShareKind;
use crate::context::RequestContext;

/// The six protocol operations of one entity kind, plus a ledger view.
///
/// Outbound operations take the acting user; inbound ones take the
/// encrypted payload as received from a peer.
#[async_trait]
pub trait SormasToSormasEntityInterface: Send + Sync + std::fmt::Debug {
    /// Send entities to another organization.
    async fn share_entities(
        &self,
        sender: &RequestContext,
        entity_uuids: &[Uuid],
        options: ShareOptions,
    ) -> ShareResult<()>;

    /// Store entities shared by a peer.
    async fn save_shared_entities(&self, payload: &EncryptedData) -> ShareResult<()>;

    /// Hand a received entity back to its owner.
    async fn return_entity(
        &self,
        sender: &RequestContext,
        entity_uuid: Uuid,
        options: ShareOptions,
    ) -> ShareResult<()>;

    /// Store an entity returned by a peer.
    async fn save_returned_entity(&self, payload: &EncryptedData) -> ShareResult<()>;

    /// Push the current state of a previously shared entity.
    async fn sync_entity(
        &self,
        sender: &RequestContext,
        entity_uuid: Uuid,
        options: ShareOptions,
    ) -> ShareResult<()>;

    /// Store updates of previously shared entities.
    async fn save_synced_entity(&self, payload: &EncryptedData) -> ShareResult<()>;

    /// Every share info of an entity.
    async fn share_infos(&self, entity_uuid: Uuid) -> ShareResult<Vec<ShareInfo>>;
}

#[async_trait]
impl<K: ShareKind> SormasToSormasEntityInterface for ShareProtocol<K> {
    async fn share_entities(
        &self,
        sender: &RequestContext,
        entity_uuids: &[Uuid],
        options: ShareOptions,
    ) -> ShareResult<()> {
        ShareProtocol::share_entities(self, sender, entity_uuids, &options).await
    }

    async fn save_shared_entities(&self, payload: &EncryptedData) -> ShareResult<()> {
        ShareProtocol::save_shared_entities(self, payload).await
    }

    async fn return_entity(
        &self,
        sender: &RequestContext,
        entity_uuid: Uuid,
        options: ShareOptions,
    ) -> ShareResult<()> {
        ShareProtocol::return_entity(self, sender, entity_uuid, options).await
    }

    async fn save_returned_entity(&self, payload: &EncryptedData) -> ShareResult<()> {
        ShareProtocol::save_returned_entity(self, payload).await
    }

    async fn sync_entity(
        &self,
        sender: &RequestContext,
        entity_uuid: Uuid,
        options: ShareOptions,
    ) -> ShareResult<()> {
        ShareProtocol::sync_entity(self, sender, entity_uuid, &options).await
    }

    async fn save_synced_entity(&self, payload: &EncryptedData) -> ShareResult<()> {
        ShareProtocol::save_synced_entity(self, payload).await
    }

    async fn share_infos(&self, entity_uuid: Uuid) -> ShareResult<Vec<ShareInfo>> {
        ShareProtocol::share_infos(self, entity_uuid).await
    }
}
