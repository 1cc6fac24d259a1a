//! SORMAS-to-SORMAS exchange configuration: own identity and peer list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Exchange settings of this instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SormasToSormasConfig {
    /// Organization id of this instance.
    pub organization_id: String,
    /// Display name of this instance's organization.
    #[serde(default)]
    pub organization_name: String,
    /// Path prefix of the peer-facing endpoints.
    #[serde(default = "default_resource_path")]
    pub resource_path: String,
    /// Timeout for outbound requests to peers, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Peer organizations this instance exchanges data with.
    #[serde(default)]
    pub peers: Vec<PeerOrganizationConfig>,
}

/// Access data of one peer instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerOrganizationConfig {
    /// Organization id of the peer.
    pub id: String,
    /// Display name of the peer.
    #[serde(default)]
    pub name: String,
    /// Base URL of the peer instance, e.g. `https://sormas.peer.example`.
    pub host: String,
    /// Bearer token presented to the peer.
    #[serde(default)]
    pub auth_token: String,
    /// Base64-encoded 32-byte key shared with the peer.
    pub shared_key: String,
}

impl SormasToSormasConfig {
    /// Check the invariants the exchange relies on.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.organization_id.trim().is_empty() {
            return Err(AppError::configuration(
                "sormas_to_sormas.organization_id must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for peer in &self.peers {
            if peer.id.trim().is_empty() {
                return Err(AppError::configuration("Peer organization id must not be empty"));
            }
            if !seen.insert(peer.id.as_str()) {
                return Err(AppError::configuration(format!(
                    "Duplicate peer organization id: {}",
                    peer.id
                )));
            }
        }

        Ok(())
    }
}

fn default_resource_path() -> String {
    "/sormasToSormas".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peer(id: &str) -> PeerOrganizationConfig {
        PeerOrganizationConfig {
            id: id.to_string(),
            name: String::new(),
            host: "http://localhost".to_string(),
            auth_token: String::new(),
            shared_key: String::new(),
        }
    }

    fn config(peers: Vec<PeerOrganizationConfig>) -> SormasToSormasConfig {
        SormasToSormasConfig {
            organization_id: "own".to_string(),
            organization_name: "Own".to_string(),
            resource_path: default_resource_path(),
            request_timeout_seconds: 30,
            peers,
        }
    }

    #[test]
    fn test_validate_accepts_distinct_peers() {
        assert!(config(vec![peer("a"), peer("b")]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_peers() {
        let err = config(vec![peer("a"), peer("a")]).validate().unwrap_err();
        assert!(err.message.contains("Duplicate"));
    }

    #[test]
    fn test_validate_rejects_missing_organization() {
        let mut cfg = config(vec![]);
        cfg.organization_id = " ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let cfg: SormasToSormasConfig =
            serde_json::from_str(r#"{"organization_id":"own"}"#).expect("deserialize");
        assert_eq!(cfg.resource_path, "/sormasToSormas");
        assert_eq!(cfg.request_timeout_seconds, 30);
        assert!(cfg.peers.is_empty());
    }
}
