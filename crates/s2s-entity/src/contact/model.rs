//! Contact record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use s2s_core::types::OriginInfoId;

use crate::person::Person;
use crate::record::impl_record;

/// A contact person of a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Globally unique contact identifier.
    pub uuid: Uuid,
    /// Disease name.
    pub disease: String,
    /// The contact person.
    pub person: Person,
    /// Source case, when known on this instance.
    #[serde(default)]
    pub case_uuid: Option<Uuid>,
    /// Date of the last contact with the source case.
    #[serde(default)]
    pub last_contact_date: Option<NaiveDate>,
    /// Sensitive free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Date the contact was reported.
    pub report_date: DateTime<Utc>,
    /// Origin of a received contact.
    #[serde(default)]
    pub origin_info_id: Option<OriginInfoId>,
    /// Last modification time.
    pub change_date: DateTime<Utc>,
}

impl Contact {
    /// Create a new, locally owned contact.
    pub fn new(disease: impl Into<String>, person: Person, case_uuid: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            disease: disease.into(),
            person,
            case_uuid,
            last_contact_date: None,
            description: None,
            report_date: now,
            origin_info_id: None,
            change_date: now,
        }
    }
}

impl_record!(Contact, "contacts", "Contact", Contact);
