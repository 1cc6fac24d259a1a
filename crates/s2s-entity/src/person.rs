//! Person data embedded in cases, contacts, and event participants.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Placeholder shown instead of pseudonymized personal data.
pub const CONFIDENTIAL: &str = "Confidential";

/// The person a case, contact, or event participant is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Person identifier.
    pub uuid: Uuid,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Date of birth.
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-text address.
    #[serde(default)]
    pub address: Option<String>,
}

impl Person {
    /// Create a person with only a name.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: None,
            phone: None,
            address: None,
        }
    }

    /// Replace identifying data with placeholders.
    pub fn pseudonymize(&mut self) {
        self.first_name = CONFIDENTIAL.to_string();
        self.last_name = CONFIDENTIAL.to_string();
        self.birth_date = None;
        self.phone = None;
        self.address = None;
    }

    /// Whether the personal data was pseudonymized.
    pub fn is_pseudonymized(&self) -> bool {
        self.first_name == CONFIDENTIAL && self.last_name == CONFIDENTIAL
    }
}
