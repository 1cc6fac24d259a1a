//! HTTP transport to peer instances.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use s2s_core::error::{AppError, ErrorKind, ShareError};
use s2s_core::result::{AppResult, ShareResult};
use s2s_core::traits::S2sTransport;
use s2s_core::types::{EncryptedData, ValidationReport};

/// Error body returned by a peer instance.
#[derive(Debug, Deserialize)]
struct PeerErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<ValidationReport>,
}

/// [`S2sTransport`] over HTTP using reqwest.
#[derive(Debug, Clone)]
pub struct RestTransport {
    client: reqwest::Client,
}

impl RestTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self { client })
    }

    async fn send(
        &self,
        method: Method,
        host: &str,
        endpoint: &str,
        auth_token: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()> {
        let url = format!("{host}{endpoint}");
        debug!(%method, url = %url, "Sending S2S payload");

        let response = self
            .client
            .request(method, &url)
            .bearer_auth(auth_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "S2S request failed");
                ShareError::share(format!("Failed to reach {url}: {e}"))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.json::<PeerErrorBody>().await.ok();
        Err(rejection(status, body))
    }
}

fn rejection(status: StatusCode, body: Option<PeerErrorBody>) -> ShareError {
    match body {
        Some(PeerErrorBody {
            details: Some(report),
            ..
        }) if !report.is_empty() => ShareError::Validation(report),
        Some(PeerErrorBody {
            message: Some(message),
            ..
        }) => ShareError::share(format!("Peer rejected the request ({status}): {message}")),
        _ => ShareError::share(format!("Peer rejected the request ({status})")),
    }
}

#[async_trait]
impl S2sTransport for RestTransport {
    async fn post(
        &self,
        host: &str,
        endpoint: &str,
        auth_token: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()> {
        self.send(Method::POST, host, endpoint, auth_token, payload)
            .await
    }

    async fn put(
        &self,
        host: &str,
        endpoint: &str,
        auth_token: &str,
        payload: &EncryptedData,
    ) -> ShareResult<()> {
        self.send(Method::PUT, host, endpoint, auth_token, payload)
            .await
    }
}
