//! Ledger service: reads through [`LedgerStore`] and stages planned writes.

use std::sync::Arc;

use s2s_core::result::AppResult;
use s2s_core::types::OriginInfoId;
use s2s_database::{ChangeSet, LedgerStore};
use s2s_entity::Record;
use s2s_entity::share::{
    AssociatedEntityWrapper, OriginInfo, ShareAssociation, ShareInfo, is_edit_allowed,
};

use super::planner::{ShareInfoWrite, ShareTarget};

/// Read side of the share-info ledger plus the single staging point for
/// ledger writes.
#[derive(Debug, Clone)]
pub struct ShareInfoLedger {
    store: Arc<dyn LedgerStore>,
}

impl ShareInfoLedger {
    /// Creates a new ledger service.
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    /// The share info of a record towards an organization.
    pub async fn find_by_entity_and_organization(
        &self,
        association: &ShareAssociation,
        organization_id: &str,
    ) -> AppResult<Option<ShareInfo>> {
        self.store
            .find_share_info(association, organization_id)
            .await
    }

    /// The share info of an associated entity towards an organization.
    pub async fn find_existing_for_associated_entity(
        &self,
        wrapper: &AssociatedEntityWrapper,
        organization_id: &str,
    ) -> AppResult<Option<ShareInfo>> {
        self.find_by_entity_and_organization(&wrapper.association, organization_id)
            .await
    }

    /// Every share info of a record.
    pub async fn share_infos_of(&self, association: &ShareAssociation) -> AppResult<Vec<ShareInfo>> {
        self.store.share_infos_of(association).await
    }

    /// Load an origin info.
    pub async fn find_origin_info(&self, id: OriginInfoId) -> AppResult<Option<OriginInfo>> {
        self.store.find_origin_info(id).await
    }

    /// Pair every association with its current share info towards the
    /// organization, ready for planning.
    pub async fn targets(
        &self,
        associations: impl IntoIterator<Item = ShareAssociation>,
        organization_id: &str,
    ) -> AppResult<Vec<ShareTarget>> {
        let mut targets = Vec::new();
        for association in associations {
            let existing = self
                .find_by_entity_and_organization(&association, organization_id)
                .await?;
            targets.push(ShareTarget {
                association,
                existing,
            });
        }
        Ok(targets)
    }

    /// Whether the record may be edited, and therefore sent, here.
    pub async fn is_edit_allowed<R: Record>(&self, record: &R) -> AppResult<bool> {
        let origin = match record.origin_info_id() {
            Some(id) => self.find_origin_info(id).await?,
            None => None,
        };
        let share_infos = self.share_infos_of(&record.association()).await?;
        Ok(is_edit_allowed(origin.as_ref(), &share_infos))
    }

    /// Stage planned writes. The store keeps one record per
    /// (association, organization), so a create racing an earlier create
    /// lands as an update.
    pub fn ensure_persisted(&self, writes: Vec<ShareInfoWrite>, changes: &mut ChangeSet) {
        for write in writes {
            changes.upsert_share_info(write.into_share_info());
        }
    }
}
