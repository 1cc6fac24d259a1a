//! Event participant record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use s2s_core::types::OriginInfoId;

use crate::person::Person;
use crate::record::impl_record;

/// A person involved in an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventParticipant {
    /// Globally unique participant identifier.
    pub uuid: Uuid,
    /// Event the participant belongs to.
    pub event_uuid: Uuid,
    /// The participating person.
    pub person: Person,
    /// Sensitive free-text description of the involvement.
    #[serde(default)]
    pub involvement_description: Option<String>,
    /// Origin of a received participant.
    #[serde(default)]
    pub origin_info_id: Option<OriginInfoId>,
    /// Last modification time.
    pub change_date: DateTime<Utc>,
}

impl EventParticipant {
    /// Create a new participant of an event.
    pub fn new(event_uuid: Uuid, person: Person) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            event_uuid,
            person,
            involvement_description: None,
            origin_info_id: None,
            change_date: Utc::now(),
        }
    }
}

impl_record!(EventParticipant, "event_participants", "Event participant", EventParticipant);
