use std::{
    io::{self, Stdout},
    time::Duration,
};

use anyhow::Context;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::{
    broadcast,
    mpsc::{self, UnboundedReceiver},
};
use tokio_stream::StreamExt;
use tracing::{debug, info, trace, warn};

use crate::{
    state_store::{action::Action, State},
    ui_management::components::{Component, ComponentRender},
    Interrupted,
};

use super::pages::AppRouter;

/// Redraw at least this often, so a resized terminal is repainted without input
const RENDERING_TICK_RATE: Duration = Duration::from_millis(250);

pub struct UiManager {
    action_tx: mpsc::UnboundedSender<Action>,
}

impl UiManager {
    pub fn new() -> (Self, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (Self { action_tx }, action_rx)
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
        debug!(page = app_router.name(), "ui initialized");

        let mut terminal = TerminalGuard::enter()?;
        let mut ticker = tokio::time::interval(RENDERING_TICK_RATE);
        let mut crossterm_events = EventStream::new();
        let mut input = InputStatus::Open;

        let interrupted = loop {
            tokio::select! {
                _ = ticker.tick() => (),
                maybe_event = crossterm_events.next(), if input == InputStatus::Open => {
                    input = handle_terminal_event(&mut app_router, &self.action_tx, maybe_event);
                },
                Some(state) = state_rx.recv() => {
                    let previous_page = app_router.name().to_string();
                    app_router = app_router.move_with_state(&state);
                    if app_router.name() != previous_page {
                        debug!(from = %previous_page, to = app_router.name(), "page changed");
                    }
                },
                Ok(interrupted) = interrupt_rx.recv() => {
                    break interrupted;
                }
            }

            terminal
                .draw(&app_router)
                .context("could not render to the terminal")?;
        };

        terminal.leave()?;
        info!(?interrupted, "ui stopped");

        Ok(interrupted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum InputStatus {
    Open,
    Closed,
}

fn handle_terminal_event(
    app_router: &mut AppRouter,
    action_tx: &mpsc::UnboundedSender<Action>,
    maybe_event: Option<io::Result<Event>>,
) -> InputStatus {
    match maybe_event {
        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
            trace!(?key, page = app_router.name(), "key pressed");
            app_router.handle_key_event(key);
        }
        Some(Ok(_)) => (),
        Some(Err(err)) => warn!(%err, "could not read terminal input"),
        // without input the player can not do anything, stop the store as well
        None => {
            info!("terminal input closed");
            let _ = action_tx.send(Action::Exit);

            return InputStatus::Closed;
        }
    }

    InputStatus::Open
}

/// Owns the terminal in raw mode on the alternate screen.
/// The terminal is handed back to the shell when the guard is dropped, on errors too.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("could not enable raw mode")?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        install_panic_hook();

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        Ok(TerminalGuard {
            terminal,
            restored: false,
        })
    }

    fn draw(&mut self, app_router: &AppRouter) -> io::Result<()> {
        self.terminal
            .draw(|frame| app_router.render(frame, ()))
            .map(|_| ())
    }

    fn leave(mut self) -> anyhow::Result<()> {
        self.restored = true;
        restore_terminal()?;

        Ok(self.terminal.show_cursor()?)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored {
            if let Err(err) = restore_terminal() {
                warn!(%err, "could not restore the terminal");
            }
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show)
}

/// A panic message printed on the alternate screen in raw mode is lost, put the terminal back first
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc::error::TryRecvError;

    use super::*;

    fn router() -> (AppRouter, mpsc::UnboundedSender<Action>, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (
            AppRouter::new(&State::default(), action_tx.clone()),
            action_tx,
            action_rx,
        )
    }

    #[test]
    fn test_closed_input_stops_the_app() {
        let (mut app_router, action_tx, mut action_rx) = router();

        let input = handle_terminal_event(&mut app_router, &action_tx, None);

        assert_eq!(input, InputStatus::Closed);
        assert_eq!(action_rx.try_recv().ok(), Some(Action::Exit));
    }

    #[test]
    fn test_key_press_reaches_the_active_page() {
        let (mut app_router, action_tx, mut action_rx) = router();
        let key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

        let input = handle_terminal_event(&mut app_router, &action_tx, Some(Ok(Event::Key(key))));

        assert_eq!(input, InputStatus::Open);
        assert_eq!(action_rx.try_recv().ok(), Some(Action::Exit));
    }

    #[test]
    fn test_read_errors_and_other_events_are_ignored() {
        let (mut app_router, action_tx, mut action_rx) = router();

        let error = io::Error::new(io::ErrorKind::Other, "tty went away");
        assert_eq!(
            handle_terminal_event(&mut app_router, &action_tx, Some(Err(error))),
            InputStatus::Open
        );
        assert_eq!(
            handle_terminal_event(&mut app_router, &action_tx, Some(Ok(Event::Resize(80, 24)))),
            InputStatus::Open
        );
        assert_eq!(action_rx.try_recv(), Err(TryRecvError::Empty));
    }
}
