use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};
use crate::ui_management::components::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{render_status, render_usage, split_page};

struct Props {
    topic_name: String,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            topic_name: state
                .selected_topic
                .as_ref()
                .map(|topic| topic.name.clone())
                .unwrap_or_default(),
        }
    }
}

/// WaitingPage is shown after joining, until the server pairs the player with an opponent
pub struct WaitingPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl Component for WaitingPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        WaitingPage {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        WaitingPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Waiting Room"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Esc => {
                let _ = self.action_tx.send(Action::BackToTopics);
            }
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ => {}
        }
    }
}

impl ComponentRender<()> for WaitingPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        render_status(
            frame,
            body,
            "Looking for an opponent",
            vec![
                Line::from(vec![
                    "Waiting for another player in ".into(),
                    Span::from(format!(r#""{}""#, self.props.topic_name)).bold(),
                ]),
                Line::from(""),
                Line::from(Span::from("The game starts as soon as an opponent joins").italic()),
            ],
        );
        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for WaitingPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: None,
            lines: vec![
                UsageInfoLine::new(&["Esc"], "to go back to the topics"),
                UsageInfoLine::new(&["q"], "to exit"),
            ],
        }
    }
}
