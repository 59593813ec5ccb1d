//! Line-oriented front end for the to-do list.
//!
//! Reads one command per line from stdin (`help` lists them) and re-renders
//! the list whenever the session reports a change.

use std::sync::Arc;
use tasklist_core::environment::{MonotonicIdGenerator, SystemClock};
use todo::command::HELP;
use todo::{Command, Config, TodoApp, TodoEnvironment};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!(?config, "Starting todo session");

    let env = TodoEnvironment::new(Arc::new(MonotonicIdGenerator::new(SystemClock)));
    let app = TodoApp::with_config(env, config.initial_filter, config.store_config());
    let mut changes = app.subscribe();

    println!("=== Todo ===  (type 'help' for commands)\n");
    print!("{}", app.view().await.render_text(config.show_ids));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                eprintln!("{error}");
                continue;
            },
        };

        match command {
            Command::Dispatch(action) => {
                app.dispatch(action).await?;
                if drain(&mut changes) {
                    println!();
                    print!("{}", app.view().await.render_text(config.show_ids));
                }
            },
            Command::Json => {
                println!("{}", serde_json::to_string_pretty(&app.view().await)?);
            },
            Command::Help => print!("{HELP}"),
            Command::Quit => break,
        }
    }

    app.shutdown();
    tracing::info!("Session ended");
    Ok(())
}

/// Consumes pending change notifications, returning whether there were any
fn drain(changes: &mut broadcast::Receiver<todo::TodoAction>) -> bool {
    let mut changed = false;
    loop {
        match changes.try_recv() {
            Ok(action) => {
                tracing::debug!(?action, "State changed");
                changed = true;
            },
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Render notifications lagged");
                changed = true;
            },
            Err(TryRecvError::Empty | TryRecvError::Closed) => return changed,
        }
    }
}
