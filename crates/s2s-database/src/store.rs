//! Store traits consumed by the protocol engine.
//!
//! Reads are split by concern so each service only depends on what it
//! uses; every write goes through [`ChangeSetWriter::apply`].

use async_trait::async_trait;
use uuid::Uuid;

use s2s_core::result::AppResult;
use s2s_core::types::OriginInfoId;
use s2s_entity::Record;
use s2s_entity::case::Case;
use s2s_entity::contact::Contact;
use s2s_entity::event::{Event, EventParticipant};
use s2s_entity::sample::Sample;
use s2s_entity::share::{OriginInfo, ShareAssociation, ShareInfo};

use crate::changeset::ChangeSet;

/// Lookup of one kind of domain record by identifier.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync + std::fmt::Debug + 'static {
    /// Load all records with the given identifiers, in request order.
    /// Unknown identifiers are skipped.
    async fn get_by_uuids(&self, uuids: &[Uuid]) -> AppResult<Vec<R>>;

    /// Load one record.
    async fn get_by_uuid(&self, uuid: Uuid) -> AppResult<Option<R>>;

    /// Whether a record with the identifier exists.
    async fn exists(&self, uuid: Uuid) -> AppResult<bool>;
}

/// Lookup of records that structurally belong to another record.
#[async_trait]
pub trait RelatedRecords: Send + Sync + std::fmt::Debug + 'static {
    /// Contacts whose source case is the given case.
    async fn contacts_of_case(&self, case_uuid: Uuid) -> AppResult<Vec<Contact>>;

    /// Samples taken for the given case.
    async fn samples_of_case(&self, case_uuid: Uuid) -> AppResult<Vec<Sample>>;

    /// Samples taken for the given contact.
    async fn samples_of_contact(&self, contact_uuid: Uuid) -> AppResult<Vec<Sample>>;

    /// Participants of the given event.
    async fn participants_of_event(&self, event_uuid: Uuid) -> AppResult<Vec<EventParticipant>>;
}

/// Read access to the share-info ledger and origin infos.
#[async_trait]
pub trait LedgerStore: Send + Sync + std::fmt::Debug + 'static {
    /// The share info of a record towards one organization.
    async fn find_share_info(
        &self,
        association: &ShareAssociation,
        organization_id: &str,
    ) -> AppResult<Option<ShareInfo>>;

    /// Every share info of a record, oldest first.
    async fn share_infos_of(&self, association: &ShareAssociation) -> AppResult<Vec<ShareInfo>>;

    /// Load an origin info.
    async fn find_origin_info(&self, id: OriginInfoId) -> AppResult<Option<OriginInfo>>;
}

/// The single write path.
#[async_trait]
pub trait ChangeSetWriter: Send + Sync + std::fmt::Debug + 'static {
    /// Apply every write of the change set, all-or-nothing.
    async fn apply(&self, changes: ChangeSet) -> AppResult<()>;
}

/// Everything the exchange needs from a store.
pub trait DataStore:
    RecordStore<Case>
    + RecordStore<Contact>
    + RecordStore<Sample>
    + RecordStore<Event>
    + RecordStore<EventParticipant>
    + RelatedRecords
    + LedgerStore
    + ChangeSetWriter
{
}

impl<T> DataStore for T where
    T: RecordStore<Case>
        + RecordStore<Contact>
        + RecordStore<Sample>
        + RecordStore<Event>
        + RecordStore<EventParticipant>
        + RelatedRecords
        + LedgerStore
        + ChangeSetWriter
{
}
