//! Request context carrying the identity of the sending user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use s2s_core::types::UserId;

/// Context for the current request.
///
/// Passed into outbound protocol operations so that every ledger record
/// knows *who* shared the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's display name.
    pub user_name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            request_time: Utc::now(),
        }
    }
}
