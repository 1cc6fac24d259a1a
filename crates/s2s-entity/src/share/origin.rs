//! Origin-info record and the origin metadata carried in envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use s2s_core::types::OriginInfoId;

/// Origin metadata embedded in every envelope by the sender.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOrigin {
    /// Organization id of the sending instance.
    pub organization_id: String,
    /// Display name of the sending user.
    pub sender_name: String,
    /// Whether editing authority is handed to the receiver.
    #[serde(default)]
    pub ownership_handed_over: bool,
    /// Contacts are included.
    #[serde(default)]
    pub with_associated_contacts: bool,
    /// Samples are included.
    #[serde(default)]
    pub with_samples: bool,
    /// Event participants are included.
    #[serde(default)]
    pub with_event_participants: bool,
    /// Personal data was pseudonymized by the sender.
    #[serde(default)]
    pub pseudonymized_personal_data: bool,
    /// Sensitive data was pseudonymized by the sender.
    #[serde(default)]
    pub pseudonymized_sensitive_data: bool,
    /// Comment from the sender.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Where a received record came from and who may edit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OriginInfo {
    /// Unique identifier.
    pub uuid: OriginInfoId,
    /// Organization id of the authoritative owner.
    pub organization_id: String,
    /// Display name of the user who sent the record.
    pub sender_name: String,
    /// Editing authority was handed to this instance.
    pub ownership_handed_over: bool,
    /// Contacts were received along.
    pub with_associated_contacts: bool,
    /// Samples were received along.
    pub with_samples: bool,
    /// Event participants were received along.
    pub with_event_participants: bool,
    /// Comment from the sender.
    pub comment: Option<String>,
    /// When the record was first received.
    pub creation_date: DateTime<Utc>,
    /// Last modification time.
    pub change_date: DateTime<Utc>,
}

impl OriginInfo {
    /// Build the origin info of a newly received record.
    pub fn from_share_origin(origin: &ShareOrigin) -> Self {
        let now = Utc::now();
        Self {
            uuid: OriginInfoId::new(),
            organization_id: origin.organization_id.clone(),
            sender_name: origin.sender_name.clone(),
            ownership_handed_over: origin.ownership_handed_over,
            with_associated_contacts: origin.with_associated_contacts,
            with_samples: origin.with_samples,
            with_event_participants: origin.with_event_participants,
            comment: origin.comment.clone(),
            creation_date: now,
            change_date: now,
        }
    }

    /// Record that ownership went back to the origin organization.
    pub fn relinquish_ownership(&mut self) {
        self.ownership_handed_over = false;
        self.change_date = Utc::now();
    }
}
