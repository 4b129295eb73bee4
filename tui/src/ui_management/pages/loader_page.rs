use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, ServerConnectionStatus, State};
use crate::ui_management::components::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{render_status, render_usage, split_page};

struct Props {
    connection_status: ServerConnectionStatus,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            connection_status: state.server_connection_status.clone(),
        }
    }
}

/// LoaderPage is shown until the first topic list arrives
pub struct LoaderPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl Component for LoaderPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        LoaderPage {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        LoaderPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Loader"
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

impl ComponentRender<()> for LoaderPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        let status = match &self.props.connection_status {
            ServerConnectionStatus::Connected { addr } => format!("Connected to {addr}"),
            ServerConnectionStatus::Connecting => String::from("Connecting to the server..."),
            _ => String::new(),
        };
        render_status(
            frame,
            body,
            "Loading...",
            vec![Line::from(Span::from(status).italic())],
        );
        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for LoaderPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: None,
            lines: vec![UsageInfoLine::new(&["q"], "to exit")],
        }
    }
}
