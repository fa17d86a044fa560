//! HTTP transport port
//!
//! The core never talks to the network directly. Producers compose calls
//! against this single GET capability, which lets tests and demo mode swap
//! in canned responses.

use async_trait::async_trait;

use crate::domain::ErrorKind;

/// Authenticated GET against the remote ledger service
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch `url` with `Authorization: Bearer <bearer_token>`.
    ///
    /// Implementations classify failures themselves:
    /// * HTTP 401 -> `ErrorKind::Unauthorized`
    /// * any other non-200 status -> `ErrorKind::InvalidResponse`
    /// * connection or other transport failures -> `ErrorKind::Unknown`
    async fn get(&self, url: &str, bearer_token: &str) -> Result<Vec<u8>, ErrorKind>;
}
