use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::Context;
use clap::Parser;
use comms::transport::client::RoomsClient;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Cli,
    state_store::{State, StateStore},
    termination::{create_termination, Interrupted, Terminator},
    ui_management::UiManager,
};

mod config;
mod state_store;
mod termination;
mod ui_management;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_file)?;

    tracing::info!(server_url = %cli.server_url, "starting drivechat");

    let initial_state = State::new(&cli.server_url, cli.username.as_deref().unwrap_or_default());
    let rooms_client = RoomsClient::new(&cli.server_url);

    let (terminator, mut interrupt_rx) = create_termination();
    let (state_store, state_rx) = StateStore::new(initial_state);
    let (ui_manager, action_rx) = UiManager::new();

    tokio::try_join!(
        state_store.main_loop(
            rooms_client,
            terminator,
            action_rx,
            interrupt_rx.resubscribe()
        ),
        ui_manager.main_loop(state_rx, interrupt_rx.resubscribe()),
    )?;

    if let Ok(reason) = interrupt_rx.recv().await {
        match reason {
            Interrupted::UserInt => tracing::info!("exited per user request"),
            Interrupted::OsSigInt => tracing::info!("exited because of an os sig int"),
        }
    } else {
        tracing::warn!("exited because of an unexpected error");
    }

    Ok(())
}

// logs go to a file, writing them to stdout would draw over the ui
fn init_tracing(log_file: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("could not open log file {}", log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
