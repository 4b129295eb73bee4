use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, Screen, State};
use crate::ui_management::components::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{render_status, render_usage, split_page};

const RECONNECTING_NOTICE: &str = "Waiting for the server to come back...";

struct Props {
    message: String,
    /// Going back to the topics needs a live connection
    connected: bool,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            message: match &state.screen {
                Screen::Error { message } => message.clone(),
                _ => String::new(),
            },
            connected: state.is_connected(),
        }
    }
}

/// ErrorPage shows a server reported or connection error, recoverable by going back to the topics
pub struct ErrorPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl Component for ErrorPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        ErrorPage {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        ErrorPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Error"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let _ = self.action_tx.send(Action::RequestTopics);
            }
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ => {}
        }
    }
}

impl ComponentRender<()> for ErrorPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        let mut lines = vec![Line::from(Span::from(self.props.message.clone()).red())];
        if !self.props.connected {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::from(RECONNECTING_NOTICE).italic()));
        }

        render_status(frame, body, "Error", lines);
        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for ErrorPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: None,
            lines: vec![
                UsageInfoLine::new(&["Enter"], "to return to the main screen"),
                UsageInfoLine::new(&["q"], "to exit"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    use super::*;
    use crate::state_store::ServerConnectionStatus;
    use crate::ui_management::pages::layout::testing::render_to_string;

    fn error_state(message: &str) -> State {
        State {
            screen: Screen::Error {
                message: message.into(),
            },
            ..State::default()
        }
    }

    #[test]
    fn test_shows_message() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let page = ErrorPage::new(&error_state("Please enter your name"), action_tx);

        assert!(render_to_string(&page).contains("Please enter your name"));
    }

    #[test]
    fn test_reconnect_notice_follows_connection() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let mut state = error_state("Something went wrong");
        let page = ErrorPage::new(&state, action_tx);
        assert!(render_to_string(&page).contains(RECONNECTING_NOTICE));

        state.server_connection_status = ServerConnectionStatus::Connected {
            addr: "localhost:8000".into(),
        };
        let page = page.move_with_state(&state);
        assert!(!render_to_string(&page).contains(RECONNECTING_NOTICE));
    }

    #[test]
    fn test_enter_requests_topics() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let mut page = ErrorPage::new(&error_state("boom"), action_tx);

        page.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(action_rx.try_recv().ok(), Some(Action::RequestTopics));
    }
}
