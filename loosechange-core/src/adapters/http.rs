//! reqwest-backed HTTP transport

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

use crate::domain::ErrorKind;
use crate::ports::HttpTransport;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Real network transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, bearer_token: &str) -> Result<Vec<u8>, ErrorKind> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", bearer_token))
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status().as_u16();
        check_status(status).inspect_err(|_| {
            tracing::warn!(url, status, "server responded with an error status");
        })?;

        let body = response.bytes().await.map_err(map_request_error)?;
        tracing::debug!(url, status, bytes = body.len(), "GET succeeded");

        Ok(body.to_vec())
    }
}

/// Classify an HTTP status code
pub fn check_status(status: u16) -> Result<(), ErrorKind> {
    match status {
        200 => Ok(()),
        401 => Err(ErrorKind::Unauthorized),
        status => Err(ErrorKind::InvalidResponse { status }),
    }
}

/// Map request errors to user-friendly messages
fn map_request_error(error: reqwest::Error) -> ErrorKind {
    if error.is_timeout() {
        ErrorKind::unknown(format!(
            "Connection timed out after {} seconds",
            REQUEST_TIMEOUT_SECS
        ))
    } else if error.is_connect() {
        ErrorKind::unknown("Unable to connect to Lunch Money servers")
    } else {
        ErrorKind::unknown(error.to_string())
    }
}
