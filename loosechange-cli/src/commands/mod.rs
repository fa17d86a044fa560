//! CLI command implementations

pub mod accounts;
pub mod budget;
pub mod demo;
pub mod transactions;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use loosechange_core::{ErrorKind, LooseChangeContext, RemoteContent, RemoteResource, Session};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `LOOSECHANGE_LOG=debug`
const LOG_ENV: &str = "LOOSECHANGE_LOG";

const LOGIN_HINT: &str =
    "Not logged in. Pass --token or set LOOSECHANGE_TOKEN to your Lunch Money access token.";

/// Install the stderr log subscriber. Defaults to warnings only.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Get the LooseChange directory from environment or default
pub fn get_loosechange_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("LOOSECHANGE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".loosechange"))
        .ok_or_else(|| anyhow!("Could not find home directory"))
}

/// Create the context for a command
pub fn get_context(token: Option<String>) -> Result<LooseChangeContext> {
    let dir = get_loosechange_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create LooseChange directory: {:?}", dir))?;

    tracing::debug!(dir = %dir.display(), "using LooseChange directory");

    let session = token.map(Session::new).unwrap_or_default();
    LooseChangeContext::new(&dir, session).context("Failed to initialize LooseChange context")
}

/// Wait for a resource to settle and unwrap its value.
///
/// `Ok(None)` means the fetch never started because login is required;
/// the hint has already been printed.
pub async fn settle<T>(resource: &RemoteResource<T>) -> Result<Option<T>>
where
    T: Clone + Send + Sync + 'static,
{
    match resource.settled().await {
        RemoteContent::NotRequested => {
            crate::output::warning(LOGIN_HINT);
            Ok(None)
        }
        RemoteContent::Loading => Err(anyhow!("Request is still in progress")),
        RemoteContent::Done(value) => Ok(Some(value)),
        RemoteContent::Failed(kind) => Err(failure(kind)),
    }
}

fn failure(kind: ErrorKind) -> anyhow::Error {
    if kind.requires_login() {
        anyhow!("{}\n{}", kind, LOGIN_HINT)
    } else {
        anyhow!("{}\nPlease try again.", kind)
    }
}
