//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use s2s_entity::share::ShareOptions;

/// Options of a share, return, or sync call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ShareOptionsRequest {
    /// Target organization.
    #[validate(length(min = 1, message = "Target organization is required"))]
    pub organization_id: String,
    /// Hand ownership to the target.
    #[serde(default)]
    pub hand_over_ownership: bool,
    /// Include contacts (cases only).
    #[serde(default)]
    pub with_associated_contacts: bool,
    /// Include samples (cases and contacts).
    #[serde(default)]
    pub with_samples: bool,
    /// Include participants (events only).
    #[serde(default)]
    pub with_event_participants: bool,
    /// Pseudonymize personal data.
    #[serde(default)]
    pub pseudonymize_personal_data: bool,
    /// Pseudonymize sensitive data.
    #[serde(default)]
    pub pseudonymize_sensitive_data: bool,
    /// Free-text comment for the receiver.
    #[validate(length(max = 4096))]
    #[serde(default)]
    pub comment: Option<String>,
}

impl From<ShareOptionsRequest> for ShareOptions {
    fn from(req: ShareOptionsRequest) -> Self {
        Self {
            organization_id: req.organization_id,
            hand_over_ownership: req.hand_over_ownership,
            with_associated_contacts: req.with_associated_contacts,
            with_samples: req.with_samples,
            with_event_participants: req.with_event_participants,
            pseudonymize_personal_data: req.pseudonymize_personal_data,
            pseudonymize_sensitive_data: req.pseudonymize_sensitive_data,
            comment: req.comment,
        }
    }
}

/// POST /api/s2s/{kind}/share
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShareRequest {
    /// Entities to share.
    #[validate(length(min = 1, message = "At least one entity must be selected"))]
    pub entity_uuids: Vec<Uuid>,
    /// Share options.
    #[validate(nested)]
    pub options: ShareOptionsRequest,
}

/// Body of return and sync calls.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntityOptionsRequest {
    /// Call options.
    #[validate(nested)]
    pub options: ShareOptionsRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_request_requires_entities() {
        let req = ShareRequest {
            entity_uuids: Vec::new(),
            options: ShareOptionsRequest {
                organization_id: "peer".to_string(),
                ..ShareOptionsRequest::default()
            },
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_options_require_organization() {
        let req = EntityOptionsRequest {
            options: ShareOptionsRequest::default(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_options_convert() {
        let options: ShareOptions = ShareOptionsRequest {
            organization_id: "peer".to_string(),
            with_samples: true,
            comment: Some("hi".to_string()),
            ..ShareOptionsRequest::default()
        }
        .into();
        assert_eq!(options.organization_id, "peer");
        assert!(options.with_samples);
        assert_eq!(options.comment.as_deref(), Some("hi"));
    }
}
