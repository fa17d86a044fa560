//! Authentication precondition for fetching

use std::fmt;

/// The access token the user logged in with.
///
/// The token is opaque: it is only ever sent as a bearer token and never
/// inspected. Storing it between runs is the caller's concern.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    access_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into().trim().to_string(),
        }
    }

    /// A session with no token, which always requires login
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn requires_login(&self) -> bool {
        self.access_token.is_empty()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.requires_login()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
