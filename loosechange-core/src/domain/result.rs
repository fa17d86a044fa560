//! Result and error types for the core library

use thiserror::Error;

/// Why a remote fetch did not produce a value.
///
/// This is the only error type a `RemoteResource` records. Transport
/// failures, status codes and decode failures are classified by the
/// HTTP adapter; `DataIntegrity` is raised by the transaction join when
/// the service returns records that reference unknown accounts or
/// categories.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Authentication failed. Your access token may be invalid or revoked.")]
    Unauthorized,

    #[error("Invalid response from Lunch Money: HTTP {status}")]
    InvalidResponse { status: u16 },

    #[error("Lunch Money request failed: {0}")]
    Unknown(String),

    #[error("Inconsistent data from Lunch Money: {0}")]
    DataIntegrity(#[from] IntegrityError),
}

impl ErrorKind {
    /// Create an unknown error
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Whether the caller should send the user back to the login flow
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// A retained transaction could not be resolved against the accounts and
/// categories returned alongside it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("transaction {transaction_id} does not belong to any known account")]
    MissingAccount { transaction_id: i64 },

    #[error("transaction {transaction_id} references unknown category {category_id}")]
    MissingCategory {
        transaction_id: i64,
        category_id: i64,
    },

    #[error("transaction {transaction_id} has an unparseable date '{value}'")]
    InvalidDate { transaction_id: i64, value: String },
}
