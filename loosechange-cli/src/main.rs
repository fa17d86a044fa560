//! LooseChange CLI - Lunch Money in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{accounts, budget, demo, transactions};

/// LooseChange - your Lunch Money accounts, budget and transactions
#[derive(Parser)]
#[command(name = "lc", version, about, long_about = None)]
struct Cli {
    /// Lunch Money access token
    #[arg(long, global = true, env = "LOOSECHANGE_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show accounts and balances
    Accounts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this month's budget by category group
    Budget {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show this month's transactions
    Transactions {
        /// Only show transactions of this account ID
        #[arg(long)]
        account: Option<i64>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    commands::init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let token = cli.token;
    match cli.command {
        Commands::Accounts { json } => accounts::run(token, json).await,
        Commands::Budget { json } => budget::run(token, json).await,
        Commands::Transactions { account, json } => transactions::run(token, account, json).await,
        Commands::Demo { command } => demo::run(command),
    }
}
