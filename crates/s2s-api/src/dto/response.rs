//! Response DTOs.

use serde::{Deserialize, Serialize};

use s2s_transport::OrganizationSummary;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since start.
    pub uptime_seconds: u64,
}

/// Own organization and the peers it can exchange data with.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationsResponse {
    /// This instance.
    pub own: OrganizationSummary,
    /// Configured peers.
    pub peers: Vec<OrganizationSummary>,
}
