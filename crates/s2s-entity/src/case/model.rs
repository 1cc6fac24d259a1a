//! Case record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use s2s_core::types::OriginInfoId;

use crate::person::Person;
use crate::record::impl_record;

/// Classification of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseClassification {
    /// Not yet classified.
    #[default]
    NotClassified,
    /// Suspect case.
    Suspect,
    /// Probable case.
    Probable,
    /// Confirmed case.
    Confirmed,
    /// Not a case.
    NoCase,
}

/// A disease case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Globally unique case identifier.
    pub uuid: Uuid,
    /// Disease name.
    pub disease: String,
    /// Case classification.
    #[serde(default)]
    pub classification: CaseClassification,
    /// The person the case is about.
    pub person: Person,
    /// Date the case was reported.
    pub report_date: DateTime<Utc>,
    /// Responsible region name.
    #[serde(default)]
    pub responsible_region: Option<String>,
    /// Sensitive free-text details.
    #[serde(default)]
    pub additional_details: Option<String>,
    /// Origin of a received case.
    #[serde(default)]
    pub origin_info_id: Option<OriginInfoId>,
    /// Last modification time.
    pub change_date: DateTime<Utc>,
}

impl Case {
    /// Create a new, locally owned case.
    pub fn new(disease: impl Into<String>, person: Person) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            disease: disease.into(),
            classification: CaseClassification::default(),
            person,
            report_date: now,
            responsible_region: None,
            additional_details: None,
            origin_info_id: None,
            change_date: now,
        }
    }
}

impl_record!(Case, "cases", "Case", Case);
