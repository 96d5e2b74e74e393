// demos/storefront_app/src/main.rs

// Declare modules for the application
mod commands;
mod config;
mod errors;
mod services;
mod state;

use crate::config::AppConfig;
use crate::errors::{AppError, Result as AppResult};
use crate::state::AppState;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

/// Terminal client for the storefront back office and shop.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Fetch a collection and print it as a table (products, fashionfests).
  List { kind: String },
  /// Create an entity from a JSON form file ("-" reads standard input).
  Add { kind: String, form: String },
  /// Update an existing entity from a JSON form file.
  Edit { kind: String, id: String, form: String },
  /// Delete an entity after confirmation.
  Delete {
    kind: String,
    id: String,
    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,
  },
  /// Upvote a fashion fest. Requires STOREFRONT_AUTH_TOKEN.
  Upvote { id: String },
  /// Upload a photo and print outfit recommendations.
  Recommend {
    image: PathBuf,
    #[arg(long, default_value = "Summer")]
    season: String,
    #[arg(long, default_value = "Casual")]
    usage: String,
  },
  /// Fill a bag from the shop listing and print the checkout snapshot.
  CartDemo,
}

async fn run(cli: Cli) -> AppResult<()> {
  let config = AppConfig::from_env()?;
  let state = AppState::build(&config)?;

  match cli.command {
    Command::List { kind } => commands::list(&state, &kind).await,
    Command::Add { kind, form } => commands::save(&state, &kind, &form, None).await,
    Command::Edit { kind, id, form } => commands::save(&state, &kind, &form, Some(&id)).await,
    Command::Delete { kind, id, yes } => commands::delete(&state, &kind, &id, yes).await,
    Command::Upvote { id } => commands::upvote(&state, &id).await,
    Command::Recommend { image, season, usage } => commands::recommend(&state, &image, &season, &usage).await,
    Command::CartDemo => commands::cart_demo(&state).await,
  }
}

#[tokio::main]
async fn main() {
  // Logs go to stderr so command output stays pipeable.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  if let Err(err) = run(cli).await {
    match &err {
      AppError::Failed { source, .. } => tracing::error!(error = %source, "Command failed."),
      other => tracing::error!(error = %other, "Command failed."),
    }
    eprintln!("{}", err);
    std::process::exit(err.exit_code());
  }
}
