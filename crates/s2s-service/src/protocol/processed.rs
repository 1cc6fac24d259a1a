//! Output of received-data processing.

use uuid::Uuid;

use s2s_core::result::AppResult;
use s2s_core::types::OriginInfoId;
use s2s_database::ChangeSet;
use s2s_entity::Record;
use s2s_entity::contact::Contact;
use s2s_entity::event::EventParticipant;
use s2s_entity::sample::Sample;
use s2s_entity::share::{OriginInfo, ShareAssociation};

/// A sub-entity received along with a primary entity.
#[derive(Debug, Clone, PartialEq)]
pub enum AssociatedRecord {
    /// A contact of a case.
    Contact(Contact),
    /// A sample of a case or contact.
    Sample(Sample),
    /// A participant of an event.
    EventParticipant(EventParticipant),
}

macro_rules! dispatch {
    ($self:expr, $record:ident => $body:expr) => {
        match $self {
            AssociatedRecord::Contact($record) => $body,
            AssociatedRecord::Sample($record) => $body,
            AssociatedRecord::EventParticipant($record) => $body,
        }
    };
}

impl AssociatedRecord {
    /// Identifier of the sub-entity.
    pub fn uuid(&self) -> Uuid {
        dispatch!(self, r => r.uuid())
    }

    /// Ledger back-reference of the sub-entity.
    pub fn association(&self) -> ShareAssociation {
        dispatch!(self, r => r.association())
    }

    /// Origin of the sub-entity.
    pub fn origin_info_id(&self) -> Option<OriginInfoId> {
        dispatch!(self, r => r.origin_info_id())
    }

    /// Point the sub-entity at an origin info.
    pub fn set_origin_info_id(&mut self, id: Option<OriginInfoId>) {
        dispatch!(self, r => r.set_origin_info_id(id))
    }

    /// Stage an upsert of the sub-entity.
    pub fn stage(&self, changes: &mut ChangeSet) -> AppResult<()> {
        dispatch!(self, r => changes.upsert(r))
    }
}

impl From<Contact> for AssociatedRecord {
    fn from(contact: Contact) -> Self {
        Self::Contact(contact)
    }
}

impl From<Sample> for AssociatedRecord {
    fn from(sample: Sample) -> Self {
        Self::Sample(sample)
    }
}

impl From<EventParticipant> for AssociatedRecord {
    fn from(participant: EventParticipant) -> Self {
        Self::EventParticipant(participant)
    }
}

/// A processed sub-entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedAssociate {
    /// The merged or new record.
    pub record: AssociatedRecord,
    /// The record did not exist locally before.
    pub is_new: bool,
}

/// A received entity, validated and merged, ready to be persisted.
#[derive(Debug, Clone)]
pub struct ProcessedData<E> {
    /// The primary entity.
    pub entity: E,
    /// Sub-entities that came with it.
    pub associated: Vec<ProcessedAssociate>,
    /// Origin described by the sender. For new shares this becomes the
    /// entity's origin info.
    pub origin_info: OriginInfo,
}
