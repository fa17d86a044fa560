//! LooseChange Core - fetch and display logic for a Lunch Money client
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Entities (Account, BudgetGroup, Transaction, RemoteContent, etc.)
//! - **ports**: Traits for external collaborators (HttpTransport, DisplayFormatter)
//! - **services**: RemoteResource plus the account, budget and transaction pipelines
//! - **adapters**: Concrete implementations (reqwest, Lunch Money client, demo data)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::demo::DemoTransport;
use adapters::format::StandardFormatter;
use adapters::http::ReqwestTransport;
use adapters::lunchmoney::LunchMoneyClient;
use config::Config;
use ports::{DisplayFormatter, HttpTransport};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{ErrorKind, IntegrityError};
pub use domain::{
    Account, BudgetGroup, BudgetLine, BudgetStatus, Category, RemoteContent, Session, Transaction,
};
pub use services::RemoteResource;

/// Main context for LooseChange operations
///
/// Holds the configuration, the session and one service per query. The
/// services are cheap to clone so they can be moved into the producers
/// given to a `RemoteResource`.
pub struct LooseChangeContext {
    pub config: Config,
    pub session: Session,
    pub formatter: Arc<dyn DisplayFormatter>,
    pub accounts_service: AccountsService,
    pub budget_service: BudgetService,
    pub transactions_service: TransactionsService,
}

impl LooseChangeContext {
    /// Create a context from the settings in `dir`.
    ///
    /// Demo mode serves built-in data and does not need a token.
    pub fn new(dir: &Path, session: Session) -> Result<Self> {
        let config = Config::load(dir)?;

        let (transport, session): (Arc<dyn HttpTransport>, Session) = if config.demo_mode {
            tracing::info!("demo mode enabled, serving built-in data");
            (Arc::new(DemoTransport::new()), Session::new(adapters::demo::DEMO_TOKEN))
        } else {
            (Arc::new(ReqwestTransport::new()?), session)
        };

        Ok(Self::with_transport(config, session, transport))
    }

    /// Create a context on top of an arbitrary transport
    pub fn with_transport(
        config: Config,
        session: Session,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let formatter: Arc<dyn DisplayFormatter> = Arc::new(StandardFormatter::new());
        let client = Arc::new(LunchMoneyClient::new(
            transport,
            &config.base_url,
            session.clone(),
        ));

        Self {
            accounts_service: AccountsService::new(Arc::clone(&client), Arc::clone(&formatter)),
            budget_service: BudgetService::new(Arc::clone(&client), Arc::clone(&formatter)),
            transactions_service: TransactionsService::new(client, Arc::clone(&formatter)),
            config,
            session,
            formatter,
        }
    }

    /// Whether fetches may run
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
