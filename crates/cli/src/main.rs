//! PawCart CLI - Browse pets, build a cart and add pets from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Start an interactive session (default)
//! pawcart
//! pawcart shell
//!
//! # Fetch one random image URL from the image service
//! pawcart fetch-image
//! ```
//!
//! # Commands
//!
//! - `shell` - Interactive session over one in-memory store
//! - `fetch-image` - One-off request to the image service
//!
//! Configuration comes from the environment (see `pawcart_app::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use pawcart_app::config::AppConfig;
use pawcart_app::{AppError, AppState};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "pawcart")]
#[command(author, version, about = "PawCart pet catalog and cart")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Shell,
    /// Fetch a random image URL and print it
    FetchImage,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AppConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Logs go to stderr so they never mix with command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pawcart_cli=info,pawcart_app=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, config).await {
        tracing::error!(error = %e, "Command failed");
        let _ = writeln!(io::stderr(), "{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: AppConfig) -> Result<(), AppError> {
    let state = AppState::new(config)?;
    let mut stdout = io::stdout().lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            commands::shell::run(&state, stdin, &mut stdout).await?;
        }
        Commands::FetchImage => commands::fetch_image::run(&state, &mut stdout).await?,
    }
    Ok(())
}
