//! Sample record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use s2s_core::types::OriginInfoId;

use crate::record::impl_record;

/// A laboratory sample taken for a case or contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Globally unique sample identifier.
    pub uuid: Uuid,
    /// Case the sample belongs to.
    #[serde(default)]
    pub case_uuid: Option<Uuid>,
    /// Contact the sample belongs to.
    #[serde(default)]
    pub contact_uuid: Option<Uuid>,
    /// Sample material, e.g. `"nasal_swab"`.
    pub material: String,
    /// When the sample was taken.
    pub sample_date: DateTime<Utc>,
    /// Laboratory name.
    #[serde(default)]
    pub lab: Option<String>,
    /// Sensitive free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Origin of a received sample.
    #[serde(default)]
    pub origin_info_id: Option<OriginInfoId>,
    /// Last modification time.
    pub change_date: DateTime<Utc>,
}

impl Sample {
    /// Create a new sample attached to a case.
    pub fn for_case(case_uuid: Uuid, material: impl Into<String>) -> Self {
        Self::new(Some(case_uuid), None, material)
    }

    /// Create a new sample attached to a contact.
    pub fn for_contact(contact_uuid: Uuid, material: impl Into<String>) -> Self {
        Self::new(None, Some(contact_uuid), material)
    }

    fn new(case_uuid: Option<Uuid>, contact_uuid: Option<Uuid>, material: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            case_uuid,
            contact_uuid,
            material: material.into(),
            sample_date: now,
            lab: None,
            comment: None,
            origin_info_id: None,
            change_date: now,
        }
    }
}

impl_record!(Sample, "samples", "Sample", Sample);
