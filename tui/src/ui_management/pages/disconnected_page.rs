use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};
use crate::ui_management::components::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{render_status, render_usage, split_page};

/// DisconnectedPage is shown while the connection to the server is down
pub struct DisconnectedPage {
    action_tx: UnboundedSender<Action>,
}

impl Component for DisconnectedPage {
    fn new(_state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        DisconnectedPage { action_tx }
    }

    fn move_with_state(self, _state: &State) -> Self
    where
        Self: Sized,
    {
        self
    }

    fn name(&self) -> &str {
        "Disconnected"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('q') {
            let _ = self.action_tx.send(Action::Exit);
        }
    }
}

impl ComponentRender<()> for DisconnectedPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        render_status(
            frame,
            body,
            "Connection lost",
            vec![
                Line::from("Trying to reconnect..."),
                Line::from(""),
                Line::from(Span::from("Please wait while we restore the connection to the server").italic()),
            ],
        );
        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for DisconnectedPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: None,
            lines: vec![UsageInfoLine::new(&["q"], "to exit")],
        }
    }
}
