//! Sub-entities that travel with a primary entity during one call.

use s2s_core::types::OriginInfoId;

use crate::record::Record;

use super::association::ShareAssociation;

/// A sub-entity (sample, contact, participant) bundled with a primary share.
///
/// Only lives for the duration of one share, return, or sync call and is
/// used to create or update the sub-entity's own share info.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssociatedEntityWrapper {
    /// Ledger back-reference of the sub-entity.
    pub association: ShareAssociation,
    /// Origin of the sub-entity if it was itself received.
    pub origin_info_id: Option<OriginInfoId>,
}

impl AssociatedEntityWrapper {
    /// Wrap a record.
    pub fn of<R: Record>(record: &R) -> Self {
        Self {
            association: record.association(),
            origin_info_id: record.origin_info_id(),
        }
    }

    /// Whether the sub-entity was received from another instance.
    pub fn has_origin_info(&self) -> bool {
        self.origin_info_id.is_some()
    }
}
