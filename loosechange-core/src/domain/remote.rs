//! Lifecycle of a remote fetch

use super::result::ErrorKind;

/// The state of one remote query.
///
/// Exactly one variant is active at a time. Consumers are expected to
/// `match` on all four.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RemoteContent<T> {
    /// No fetch has been started, e.g. because the user is not logged in
    #[default]
    NotRequested,
    Loading,
    Done(T),
    Failed(ErrorKind),
}

impl<T> RemoteContent<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The value of a successful fetch
    pub fn done(&self) -> Option<&T> {
        match self {
            Self::Done(value) => Some(value),
            _ => None,
        }
    }

    /// The error of a failed fetch
    pub fn failure(&self) -> Option<&ErrorKind> {
        match self {
            Self::Failed(kind) => Some(kind),
            _ => None,
        }
    }

    /// Short state name for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Loading => "loading",
            Self::Done(_) => "done",
            Self::Failed(_) => "failed",
        }
    }
}

impl<T> From<Result<T, ErrorKind>> for RemoteContent<T> {
    fn from(result: Result<T, ErrorKind>) -> Self {
        match result {
            Ok(value) => Self::Done(value),
            Err(kind) => Self::Failed(kind),
        }
    }
}
