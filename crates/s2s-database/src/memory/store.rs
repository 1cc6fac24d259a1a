//! In-memory store implementation backed by `tokio::sync::RwLock`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use s2s_core::error::AppError;
use s2s_core::result::AppResult;
use s2s_core::types::{OriginInfoId, ShareInfoId};
use s2s_entity::Record;
use s2s_entity::contact::Contact;
use s2s_entity::event::EventParticipant;
use s2s_entity::sample::Sample;
use s2s_entity::share::{OriginInfo, ShareAssociation, ShareInfo};

use crate::changeset::{ChangeSet, Write};
use crate::store::{ChangeSetWriter, LedgerStore, RecordStore, RelatedRecords};

#[derive(Debug, Default)]
struct MemoryTables {
    records: HashMap<&'static str, BTreeMap<Uuid, Value>>,
    share_infos: BTreeMap<ShareInfoId, ShareInfo>,
    origin_infos: HashMap<OriginInfoId, OriginInfo>,
}

impl MemoryTables {
    fn scan<R: Record>(&self) -> AppResult<Vec<R>> {
        self.records
            .get(R::TABLE)
            .map(|table| {
                table
                    .values()
                    .map(|payload| serde_json::from_value(payload.clone()).map_err(AppError::from))
                    .collect()
            })
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn put_share_info(&mut self, mut info: ShareInfo) {
        let existing = self.share_infos.values().find(|s| {
            s.association == info.association && s.organization_id == info.organization_id
        });
        if let Some(existing) = existing {
            info.uuid = existing.uuid;
            info.creation_date = existing.creation_date;
        }
        self.share_infos.insert(info.uuid, info);
    }
}

/// Store keeping every table in process memory.
///
/// Cloning is cheap and clones share the same tables. A change set is
/// applied under one write lock, so readers never observe half a batch.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<MemoryTables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records in a table.
    pub async fn record_count(&self, table: &str) -> usize {
        self.tables
            .read()
            .await
            .records
            .get(table)
            .map_or(0, BTreeMap::len)
    }

    /// Number of share infos in the ledger.
    pub async fn share_info_count(&self) -> usize {
        self.tables.read().await.share_infos.len()
    }

    /// Number of origin infos.
    pub async fn origin_info_count(&self) -> usize {
        self.tables.read().await.origin_infos.len()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore {
    async fn get_by_uuids(&self, uuids: &[Uuid]) -> AppResult<Vec<R>> {
        let tables = self.tables.read().await;
        let Some(table) = tables.records.get(R::TABLE) else {
            return Ok(Vec::new());
        };

        let mut found = Vec::with_capacity(uuids.len());
        for uuid in uuids {
            if let Some(payload) = table.get(uuid) {
                found.push(serde_json::from_value(payload.clone())?);
            }
        }
        Ok(found)
    }

    async fn get_by_uuid(&self, uuid: Uuid) -> AppResult<Option<R>> {
        let mut found = RecordStore::<R>::get_by_uuids(self, &[uuid]).await?;
        Ok(found.pop())
    }

    async fn exists(&self, uuid: Uuid) -> AppResult<bool> {
        let tables = self.tables.read().await;
        Ok(tables
            .records
            .get(R::TABLE)
            .is_some_and(|table| table.contains_key(&uuid)))
    }
}

#[async_trait]
impl RelatedRecords for MemoryStore {
    async fn contacts_of_case(&self, case_uuid: Uuid) -> AppResult<Vec<Contact>> {
        let contacts: Vec<Contact> = self.tables.read().await.scan()?;
        Ok(contacts
            .into_iter()
            .filter(|c| c.case_uuid == Some(case_uuid))
            .collect())
    }

    async fn samples_of_case(&self, case_uuid: Uuid) -> AppResult<Vec<Sample>> {
        let samples: Vec<Sample> = self.tables.read().await.scan()?;
        Ok(samples
            .into_iter()
            .filter(|s| s.case_uuid == Some(case_uuid))
            .collect())
    }

    async fn samples_of_contact(&self, contact_uuid: Uuid) -> AppResult<Vec<Sample>> {
        let samples: Vec<Sample> = self.tables.read().await.scan()?;
        Ok(samples
            .into_iter()
            .filter(|s| s.contact_uuid == Some(contact_uuid))
            .collect())
    }

    async fn participants_of_event(&self, event_uuid: Uuid) -> AppResult<Vec<EventParticipant>> {
        let participants: Vec<EventParticipant> = self.tables.read().await.scan()?;
        Ok(participants
            .into_iter()
            .filter(|p| p.event_uuid == event_uuid)
            .collect())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn find_share_info(
        &self,
        association: &ShareAssociation,
        organization_id: &str,
    ) -> AppResult<Option<ShareInfo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .share_infos
            .values()
            .find(|s| &s.association == association && s.organization_id == organization_id)
            .cloned())
    }

    async fn share_infos_of(&self, association: &ShareAssociation) -> AppResult<Vec<ShareInfo>> {
        let tables = self.tables.read().await;
        let mut infos: Vec<ShareInfo> = tables
            .share_infos
            .values()
            .filter(|s| &s.association == association)
            .cloned()
            .collect();
        infos.sort_by_key(|s| s.creation_date);
        Ok(infos)
    }

    async fn find_origin_info(&self, id: OriginInfoId) -> AppResult<Option<OriginInfo>> {
        Ok(self.tables.read().await.origin_infos.get(&id).cloned())
    }
}

#[async_trait]
impl ChangeSetWriter for MemoryStore {
    async fn apply(&self, changes: ChangeSet) -> AppResult<()> {
        let count = changes.len();
        let mut tables = self.tables.write().await;
        for write in changes {
            match write {
                Write::Record {
                    table,
                    uuid,
                    payload,
                } => {
                    tables.records.entry(table).or_default().insert(uuid, payload);
                }
                Write::OriginInfo(origin_info) => {
                    tables.origin_infos.insert(origin_info.uuid, origin_info);
                }
                Write::ShareInfo(share_info) => tables.put_share_info(share_info),
            }
        }
        debug!(writes = count, "Applied change set to memory store");
        Ok(())
    }
}
