//! Server access data of this instance and its peer organizations.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::warn;

use s2s_core::config::exchange::SormasToSormasConfig;
use s2s_core::error::ShareError;
use s2s_core::result::{AppResult, ShareResult};

use crate::crypto::{self, KEY_LEN};

/// Id and display name of an organization, as listed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganizationSummary {
    /// Organization id.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Everything needed to talk to one peer.
#[derive(Clone)]
pub struct PeerAccess {
    /// Organization id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Base URL of the peer instance.
    pub host: String,
    auth_token: String,
    key: [u8; KEY_LEN],
}

impl PeerAccess {
    /// Bearer token presented to the peer.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Key shared with the peer.
    pub fn key(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for PeerAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PeerAccess")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Own identity plus the configured peers, keyed by organization id.
#[derive(Debug, Clone)]
pub struct OrganizationRegistry {
    own: OrganizationSummary,
    resource_path: String,
    peers: BTreeMap<String, PeerAccess>,
}

impl OrganizationRegistry {
    /// Build the registry from configuration, decoding every shared key.
    ///
    /// A peer entry carrying the own organization id is ignored.
    pub fn from_config(config: &SormasToSormasConfig) -> AppResult<Self> {
        let mut peers = BTreeMap::new();
        for peer in &config.peers {
            if peer.id == config.organization_id {
                warn!(organization_id = %peer.id, "Ignoring own organization in peer list");
                continue;
            }
            let key = crypto::decode_key(&peer.shared_key)?;
            let name = if peer.name.is_empty() {
                peer.id.clone()
            } else {
                peer.name.clone()
            };
            peers.insert(
                peer.id.clone(),
                PeerAccess {
                    id: peer.id.clone(),
                    name,
                    host: peer.host.trim_end_matches('/').to_string(),
                    auth_token: peer.auth_token.clone(),
                    key,
                },
            );
        }

        Ok(Self {
            own: OrganizationSummary {
                id: config.organization_id.clone(),
                name: config.organization_name.clone(),
            },
            resource_path: config.resource_path.trim_end_matches('/').to_string(),
            peers,
        })
    }

    /// Organization id of this instance.
    pub fn own_organization_id(&self) -> &str {
        &self.own.id
    }

    /// Identity of this instance.
    pub fn own_organization(&self) -> &OrganizationSummary {
        &self.own
    }

    /// Path prefix of the peer-facing endpoints.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Look up a peer, failing for unconfigured organizations.
    pub fn peer(&self, organization_id: &str) -> ShareResult<&PeerAccess> {
        self.peers
            .get(organization_id)
            .ok_or_else(|| ShareError::share(format!("Unknown organization: {organization_id}")))
    }

    /// Every peer organization, sorted by id.
    pub fn organizations(&self) -> Vec<OrganizationSummary> {
        self.peers
            .values()
            .map(|p| OrganizationSummary {
                id: p.id.clone(),
                name: p.name.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use s2s_core::config::exchange::PeerOrganizationConfig;

    fn peer(id: &str, name: &str) -> PeerOrganizationConfig {
        PeerOrganizationConfig {
            id: id.to_string(),
            name: name.to_string(),
            host: format!("http://{id}.example/"),
            auth_token: format!("{id}-token"),
            shared_key: STANDARD.encode([3u8; KEY_LEN]),
        }
    }

    fn make_config(peers: Vec<PeerOrganizationConfig>) -> SormasToSormasConfig {
        SormasToSormasConfig {
            organization_id: "own".to_string(),
            organization_name: "Own Health Department".to_string(),
            resource_path: "/sormasToSormas/".to_string(),
            request_timeout_seconds: 5,
            peers,
        }
    }

    #[test]
    fn test_own_organization_is_excluded() {
        let registry =
            OrganizationRegistry::from_config(&make_config(vec![peer("own", ""), peer("b", "B")]))
                .unwrap();
        let ids: Vec<_> = registry.organizations().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec!["b"]);
        assert_eq!(registry.own_organization_id(), "own");
    }

    #[test]
    fn test_peer_lookup() {
        let registry =
            OrganizationRegistry::from_config(&make_config(vec![peer("b", "")])).unwrap();
        let access = registry.peer("b").unwrap();
        assert_eq!(access.host, "http://b.example");
        assert_eq!(access.name, "b");
        assert_eq!(access.auth_token(), "b-token");
        assert_eq!(registry.resource_path(), "/sormasToSormas");

        let err = registry.peer("unknown").unwrap_err();
        assert!(err.to_string().contains("Unknown organization"));
    }

    #[test]
    fn test_invalid_key_is_rejected() {
        let mut bad = peer("b", "B");
        bad.shared_key = "short".to_string();
        assert!(OrganizationRegistry::from_config(&make_config(vec![bad])).is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let registry =
            OrganizationRegistry::from_config(&make_config(vec![peer("b", "B")])).unwrap();
        let debug = format!("{:?}", registry.peer("b").unwrap());
        assert!(!debug.contains("b-token"));
    }
}
