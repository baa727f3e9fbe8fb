use std::{
    io::{self, Stdout},
    time::Duration,
};

use anyhow::Context;
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver},
};
use tokio_stream::StreamExt;

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{Component, ComponentRender},
    Interrupted,
};

use super::pages::AppRouter;

const RENDERING_TICK_RATE: Duration = Duration::from_millis(250);

pub struct UiManager {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl UiManager {
    pub fn new() -> (Self, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (Self { action_tx }, action_rx)
    }

    // the store keeps running until it hears about the exit
    fn request_exit(&self) {
        if self.action_tx.send(Action::Exit).is_err() {
            tracing::debug!("state store already stopped");
        }
    }

    pub async fn main_loop(
        self,
        mut state_rx: UnboundedReceiver<State>,
        mut interrupt_rx: broadcast::Receiver<Interrupted>,
    ) -> anyhow::Result<Interrupted> {
        // consume the first state to initialize the ui app
        let mut app_router = {
            let state = state_rx
                .recv()
                .await
                .context("the state store closed before sending the initial state")?;

            AppRouter::new(&state, self.action_tx.clone())
        };

        let mut terminal = setup_terminal()?;
        let mut ticker = tokio::time::interval(RENDERING_TICK_RATE);
        let mut crossterm_events = EventStream::new();

        let result: anyhow::Result<Interrupted> = loop {
            tokio::select! {
                // Tick to terminate the select every N milliseconds
                _ = ticker.tick() => (),
                // Catch and handle crossterm events
                maybe_event = crossterm_events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        app_router.handle_key_event(key);
                    },
                    None => {
                        tracing::warn!("terminal event stream ended");
                        self.request_exit();
                        break Ok(Interrupted::UserInt);
                    },
                    _ => (),
                },
                // Handle state updates
                Some(state) = state_rx.recv() => {
                    app_router = app_router.move_with_state(&state);
                },
                // Catch and handle interrupt signal to gracefully shutdown
                Ok(interrupted) = interrupt_rx.recv() => {
                    break Ok(interrupted);
                }
            }

            if let Err(err) = terminal
                .draw(|frame| app_router.render(frame, ()))
                .context("could not render to the terminal")
            {
                self.request_exit();
                break Err(err);
            }
        };

        restore_terminal(&mut terminal)?;

        result
    }
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();

    enable_raw_mode().context("could not enable raw mode")?;

    execute!(stdout, EnterAlternateScreen)?;

    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(terminal.show_cursor()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_exit_reaches_the_store() {
        let (ui_manager, mut action_rx) = UiManager::new();

        ui_manager.request_exit();

        assert!(matches!(action_rx.try_recv(), Ok(Action::Exit)));
    }

    #[test]
    fn test_request_exit_after_store_stopped() {
        let (ui_manager, action_rx) = UiManager::new();
        drop(action_rx);

        ui_manager.request_exit();
    }
}
