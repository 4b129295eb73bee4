use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};
use crate::ui_management::components::{
    input_box::{self, InputBox},
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{centered_rect, page_block, render_usage, split_page};

/// The server refuses longer names
const MAX_NAME_LENGTH: usize = 20;
const EMPTY_NAME_ALERT: &str = "Please enter your name";

struct Props {
    topic_name: Option<String>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            topic_name: state.selected_topic.as_ref().map(|topic| topic.name.clone()),
        }
    }
}

/// PlayerFormPage asks for the player name before joining a game of the selected topic
pub struct PlayerFormPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
    // Internal State
    input_box: InputBox,
    /// A blocking notice is on screen, the next key press only dismisses it
    show_alert: bool,
}

impl PlayerFormPage {
    fn submit(&mut self) {
        let name = self.input_box.text().trim();
        if name.is_empty() {
            self.show_alert = true;
            return;
        }

        let _ = self.action_tx.send(Action::JoinGame {
            name: String::from(name),
        });
        self.input_box.reset();
    }
}

impl Component for PlayerFormPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        PlayerFormPage {
            action_tx: action_tx.clone(),
            props: Props::from(state),
            input_box: InputBox::new(state, action_tx).with_max_length(MAX_NAME_LENGTH),
            show_alert: false,
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        PlayerFormPage {
            props: Props::from(state),
            input_box: self.input_box.move_with_state(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Player Form"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if self.show_alert {
            self.show_alert = false;
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Esc => {
                self.input_box.reset();
                let _ = self.action_tx.send(Action::BackToTopics);
            }
            _ => self.input_box.handle_key_event(key),
        }
    }
}

impl ComponentRender<()> for PlayerFormPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        let block = page_block("Enter your name");
        let inner = block.inner(body);
        frame.render_widget(block, body);

        let form = centered_rect(40, 5, inner);
        let [container_topic, _, container_input] = *Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                [
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Length(3),
                ]
                .as_ref(),
            )
            .split(form)
        else {
            panic!("The form layout should have 3 chunks")
        };

        let topic_line = Line::from(vec![
            "Topic: ".into(),
            Span::from(self.props.topic_name.clone().unwrap_or_default()).bold(),
        ]);
        frame.render_widget(Paragraph::new(topic_line), container_topic);

        self.input_box.render(
            frame,
            input_box::RenderProps {
                title: "Your name".into(),
                area: container_input,
                border_color: Color::Yellow,
                show_cursor: !self.show_alert,
            },
        );

        if self.show_alert {
            let popup = centered_rect(EMPTY_NAME_ALERT.len() as u16 + 6, 5, body);
            let alert = Paragraph::new(vec![
                Line::from(Span::from(EMPTY_NAME_ALERT).bold()),
                Line::from(""),
                Line::from(Span::from("press any key").italic()),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(Color::Red))
                    .title("Alert"),
            );

            frame.render_widget(Clear, popup);
            frame.render_widget(alert, popup);
        }

        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for PlayerFormPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: Some("Type the name other players will see".into()),
            lines: vec![
                UsageInfoLine::new(&["Enter"], "to start the game"),
                UsageInfoLine::new(&["Esc"], "to go back to the topics"),
            ],
        }
    }
}
