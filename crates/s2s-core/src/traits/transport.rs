//! Transport trait for delivering encrypted payloads to peer instances.

use async_trait::async_trait;

use crate::result::ShareResult;
use crate::types::encrypted::EncryptedData;

/// Delivers an encrypted payload to an endpoint of a peer instance.
///
/// The production implementation lives in `s2s-transport` and uses HTTP.
/// A rejection by the peer that carries a validation report must surface
/// as [`crate::ShareError::Validation`] so callers see per-entity detail;
/// every other failure surfaces as [`crate::ShareError::Share`].
#[async_trait]
pub trait S2sTransport: Send + Sync + std::fmt::Debug + 'static {
    /// POST the payload to `host` + `endpoint`.
    async fn post(
        &self,
        host: &str,
        endpoint: &str,
        auth_token: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()>;

    /// PUT the payload to `host` + `endpoint`.
    async fn put(
        &self,
        host: &str,
        endpoint: &str,
        auth_token: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()>;
}
