//! Options attached to every share, return, and sync call.

use serde::{Deserialize, Serialize};

/// What to bundle with a shared entity and what to record in the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareOptions {
    /// Target organization id.
    pub organization_id: String,
    /// Hand editing authority over to the target.
    #[serde(default)]
    pub hand_over_ownership: bool,
    /// Include the contacts of a shared case.
    #[serde(default)]
    pub with_associated_contacts: bool,
    /// Include samples.
    #[serde(default)]
    pub with_samples: bool,
    /// Include the participants of a shared event.
    #[serde(default)]
    pub with_event_participants: bool,
    /// Replace personal data with placeholders.
    #[serde(default)]
    pub pseudonymize_personal_data: bool,
    /// Additionally remove sensitive free-text data.
    #[serde(default)]
    pub pseudonymize_sensitive_data: bool,
    /// Free-text comment for the receiver.
    #[serde(default)]
    pub comment: Option<String>,
}

impl ShareOptions {
    /// Options targeting an organization, with every flag cleared.
    pub fn for_organization(organization_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            ..Self::default()
        }
    }

    /// Copy of these options with the ownership hand-over flag replaced.
    pub fn with_hand_over_ownership(mut self, hand_over: bool) -> Self {
        self.hand_over_ownership = hand_over;
        self
    }

    /// Whether any pseudonymization was requested.
    pub fn pseudonymizes(&self) -> bool {
        self.pseudonymize_personal_data || self.pseudonymize_sensitive_data
    }
}
