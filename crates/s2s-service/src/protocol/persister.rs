//! Change-set based persister shared by every entity kind.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use s2s_core::result::AppResult;
use s2s_database::ChangeSet;
use s2s_entity::Record;
use s2s_entity::share::OriginInfo;

use super::kind::{ProcessedDataPersister, ShareKind};
use super::processed::ProcessedData;
use crate::ledger::{ShareInfoLedger, plan_ownership_returned};

/// Stages processed data as upserts.
///
/// Kind-specific merging happens in the processors, so staging is the same
/// for every kind: records are written as they come out of processing and
/// only the origin and ledger bookkeeping differs between the three paths.
#[derive(Debug, Clone)]
pub struct ChangeSetPersister {
    ledger: Arc<ShareInfoLedger>,
}

impl ChangeSetPersister {
    /// Creates a new persister.
    pub fn new(ledger: Arc<ShareInfoLedger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl<K: ShareKind> ProcessedDataPersister<K> for ChangeSetPersister {
    async fn persist_shared_data(&self, data: ProcessedData<K::Entity>) -> AppResult<ChangeSet> {
        let ProcessedData {
            entity,
            associated,
            origin_info,
        } = data;
        let mut changes = ChangeSet::new();

        let origin_id = origin_info.uuid;
        changes.upsert_origin_info(origin_info);
        changes.upsert(&entity)?;

        for mut associate in associated {
            associate.record.set_origin_info_id(Some(origin_id));
            associate.record.stage(&mut changes)?;
        }

        debug!(uuid = %entity.uuid(), writes = changes.len(), "Staged shared entity");
        Ok(changes)
    }

    async fn persist_returned_data(
        &self,
        data: ProcessedData<K::Entity>,
        origin_info: OriginInfo,
    ) -> AppResult<ChangeSet> {
        let ProcessedData {
            entity, associated, ..
        } = data;
        let mut changes = ChangeSet::new();
        changes.upsert(&entity)?;

        // Sub-entities created by the returning organization are owned here
        // from now on, under its origin info.
        let mut returned = vec![entity.association()];
        let mut origin_used = false;
        for mut associate in associated {
            if associate.is_new {
                associate.record.set_origin_info_id(Some(origin_info.uuid));
                origin_used = true;
            } else {
                returned.push(associate.record.association());
            }
            associate.record.stage(&mut changes)?;
        }

        let mut handed_over = Vec::new();
        for association in &returned {
            if let Some(info) = self
                .ledger
                .find_by_entity_and_organization(association, &origin_info.organization_id)
                .await?
            {
                handed_over.push(info);
            }
        }
        self.ledger
            .ensure_persisted(plan_ownership_returned(handed_over), &mut changes);

        let organization_id = origin_info.organization_id.clone();
        if origin_used {
            changes.upsert_origin_info(origin_info);
        }

        debug!(
            uuid = %entity.uuid(),
            organization_id = %organization_id,
            writes = changes.len(),
            "Staged returned entity"
        );
        Ok(changes)
    }

    async fn persist_sync_data(&self, data: ProcessedData<K::Entity>) -> AppResult<ChangeSet> {
        let ProcessedData {
            entity,
            associated,
            origin_info,
        } = data;
        let mut changes = ChangeSet::new();

        // The local origin keeps its identity; only a sync from the owning
        // organization refreshes its option snapshot.
        let local_origin = match entity.origin_info_id() {
            Some(id) => self.ledger.find_origin_info(id).await?,
            None => None,
        };
        if let Some(mut local) = local_origin
            .clone()
            .filter(|o| o.organization_id == origin_info.organization_id)
        {
            local.ownership_handed_over = origin_info.ownership_handed_over;
            local.with_associated_contacts = origin_info.with_associated_contacts;
            local.with_samples = origin_info.with_samples;
            local.with_event_participants = origin_info.with_event_participants;
            local.comment = origin_info.comment.clone();
            local.change_date = Utc::now();
            changes.upsert_origin_info(local);
        }

        changes.upsert(&entity)?;

        let new_origin_id = local_origin.as_ref().map(|o| o.uuid).unwrap_or(origin_info.uuid);
        let mut origin_used = false;
        for mut associate in associated {
            if associate.is_new {
                associate.record.set_origin_info_id(Some(new_origin_id));
                origin_used |= local_origin.is_none();
            }
            associate.record.stage(&mut changes)?;
        }
        if origin_used {
            changes.upsert_origin_info(origin_info);
        }

        debug!(uuid = %entity.uuid(), writes = changes.len(), "Staged synced entity");
        Ok(changes)
    }
}
