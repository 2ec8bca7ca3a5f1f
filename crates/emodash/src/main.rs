//! `emodash` - terminal dashboard for mail, tasks and mood.
//!
//! Reads commands from standard input, renders to standard output and logs
//! to standard error.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod commands;
mod presenter;
mod settings;

use emodash_api::HttpStore;
use emodash_core::{Dashboard, Event, runtime};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::{Command, USAGE};
use presenter::TerminalPresenter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emodash=info,emodash_core=info,emodash_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = settings::config_path();
    let config = settings::load_config(&config_path).await?;
    info!(base_url = %config.base_url, config = %config_path.display(), "Starting emodash");

    let mut store = HttpStore::new(&config.base_url)?;
    if let Some(timeout) = config.request_timeout() {
        store = store.with_timeout(timeout)?;
    }

    let (tx, rx) = mpsc::channel(32);
    let input = tokio::spawn(read_commands(tx));
    let dashboard = Dashboard::new(store, TerminalPresenter::stdout(), config);
    runtime::run(dashboard, rx).await;
    input.abort();
    Ok(())
}

/// Forwards parsed stdin lines to the dashboard until `quit` or end of input.
async fn read_commands(tx: mpsc::Sender<Event>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                warn!(error = %err, "failed to read input");
                break;
            }
        };
        match commands::parse(&line) {
            Ok(Command::Dashboard(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(Command::Help) => println!("{USAGE}"),
            Ok(Command::Quit) => break,
            Err(commands::ParseError::Empty) => {}
            Err(err) => println!("! {err}"),
        }
    }
}
