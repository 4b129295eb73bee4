use std::{path::PathBuf, time::Duration};

use clap::Parser;
use state_store::{ConnectionConfig, StateStore};
use termination::create_termination;
use ui_management::UiManager;

mod logging;
mod state_store;
mod termination;
mod ui_management;

pub use termination::{Interrupted, Terminator};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal client for two player trivia games", long_about = None)]
struct Cli {
    /// Address of the trivia server
    #[arg(long, default_value = "localhost:8000")]
    addr: String,

    /// Pause between two connection attempts, in milliseconds
    #[arg(long, default_value = "1000")]
    reconnect_delay_ms: u64,

    /// Give up on a connection attempt after this many milliseconds
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// File the logs are written to
    #[arg(long, default_value = "trivia-tui.log")]
    log_file: PathBuf,

    /// Increase the log verbosity
    #[arg(long, short, action(clap::ArgAction::Count))]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    logging::init(&args.log_file, args.verbose)?;
    tracing::info!(addr = %args.addr, "starting trivia-tui");

    let (terminator, interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new(ConnectionConfig {
        addr: args.addr,
        reconnect_delay: Duration::from_millis(args.reconnect_delay_ms),
        connect_timeout: Duration::from_millis(args.connect_timeout_ms),
    });
    let (ui_manager, action_rx) = UiManager::new();

    let (reason, _) = tokio::try_join!(
        state_store.main_loop(terminator, action_rx, interrupt_rx.resubscribe()),
        ui_manager.main_loop(state_rx, interrupt_rx.resubscribe()),
    )?;
    tracing::info!(?reason, "exited");

    Ok(())
}
