//! Change sets: every write of one protocol call, applied atomically.

use serde_json::Value;
use uuid::Uuid;

use s2s_core::result::AppResult;
use s2s_entity::Record;
use s2s_entity::share::{OriginInfo, ShareInfo};

/// A single upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    /// Insert or replace a domain record, stored as a JSON payload.
    Record {
        /// Storage table.
        table: &'static str,
        /// Record identifier.
        uuid: Uuid,
        /// Serialized record.
        payload: Value,
    },
    /// Insert or replace an origin info.
    OriginInfo(OriginInfo),
    /// Insert a share info, or update the existing one for the same
    /// (association, organization) pair.
    ShareInfo(ShareInfo),
}

/// Ordered list of writes committed together.
///
/// Stores apply a change set all-or-nothing, so a batch is never partially
/// visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    writes: Vec<Write>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an upsert of a domain record.
    pub fn upsert<R: Record>(&mut self, record: &R) -> AppResult<()> {
        self.writes.push(Write::Record {
            table: R::TABLE,
            uuid: record.uuid(),
            payload: serde_json::to_value(record)?,
        });
        Ok(())
    }

    /// Stage an upsert of an origin info.
    pub fn upsert_origin_info(&mut self, origin_info: OriginInfo) {
        self.writes.push(Write::OriginInfo(origin_info));
    }

    /// Stage an upsert of a share info.
    pub fn upsert_share_info(&mut self, share_info: ShareInfo) {
        self.writes.push(Write::ShareInfo(share_info));
    }

    /// Append every write of another change set.
    pub fn extend(&mut self, other: ChangeSet) {
        self.writes.extend(other.writes);
    }

    /// The staged writes, in order.
    pub fn writes(&self) -> &[Write] {
        &self.writes
    }

    /// Number of staged writes.
    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Whether nothing was staged.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Write;
    type IntoIter = std::vec::IntoIter<Write>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}
