use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};
use crate::ui_management::components::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{page_block, render_usage, split_page};

const WAITING_PLAYER_LABEL: &str = "Looking for an opponent";
const NO_TOPICS_MESSAGE: &str = "The server has no topics to play right now.";

pub struct TopicItem {
    pub pk: i64,
    pub name: String,
    pub question_count: usize,
    pub has_players: bool,
}

struct Props {
    /// Topics in the order the server sent them
    topics: Vec<TopicItem>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        Props {
            topics: state
                .topics
                .iter()
                .map(|topic| TopicItem {
                    pk: topic.pk,
                    name: topic.name.clone(),
                    question_count: topic.question_count(),
                    has_players: topic.has_players,
                })
                .collect(),
        }
    }
}

/// TopicsPage lists the topics and lets the player pick one
pub struct TopicsPage {
    /// Sending actions to the state store
    action_tx: UnboundedSender<Action>,
    /// State Mapped TopicsPage Props
    props: Props,
    // Internal Component State
    /// Hovered topic
    list_state: ListState,
}

impl TopicsPage {
    fn next(&mut self) {
        let len = self.props.topics.len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.props.topics.len();
        if len == 0 {
            return;
        }

        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    /// keeps the hovered row inside the list after the list changed
    fn clamp_selection(mut self) -> Self {
        let selected = match (self.list_state.selected(), self.props.topics.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        self.list_state.select(selected);

        self
    }

    fn hovered_topic(&self) -> Option<&TopicItem> {
        self.props.topics.get(self.list_state.selected()?)
    }
}

impl Component for TopicsPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self {
        TopicsPage {
            action_tx,
            props: Props::from(state),
            //
            list_state: ListState::default(),
        }
        .clamp_selection()
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        TopicsPage {
            props: Props::from(state),
            ..self
        }
        .clamp_selection()
    }

    fn name(&self) -> &str {
        "Topics"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Up => self.previous(),
            KeyCode::Down => self.next(),
            KeyCode::Enter => {
                if let Some(topic) = self.hovered_topic() {
                    let _ = self.action_tx.send(Action::SelectTopic { pk: topic.pk });
                }
            }
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ => (),
        }
    }
}

fn topic_to_list_item(topic: &TopicItem) -> ListItem<'static> {
    let mut spans = vec![
        Span::from(topic.name.clone()).bold(),
        Span::raw(format!(" ({} questions)", topic.question_count)),
    ];
    if topic.has_players {
        spans.push(Span::raw("  "));
        spans.push(Span::from(WAITING_PLAYER_LABEL).green().italic());
    }

    ListItem::new(Line::from(spans))
}

impl ComponentRender<()> for TopicsPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        let block = page_block("Choose a topic");

        if self.props.topics.is_empty() {
            let empty = Paragraph::new(NO_TOPICS_MESSAGE)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, body);
        } else {
            let topic_list = List::new(
                self.props
                    .topics
                    .iter()
                    .map(topic_to_list_item)
                    .collect::<Vec<_>>(),
            )
            .block(block)
            .highlight_style(
                Style::default()
                    // yellow that would work for both dark / light modes
                    .bg(Color::Rgb(255, 223, 102))
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

            let mut list_state = self.list_state.clone();
            frame.render_stateful_widget(topic_list, body, &mut list_state);
        }

        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for TopicsPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: Some("Pick a topic to play".into()),
            lines: vec![
                UsageInfoLine::new(&["↑", "↓"], "to navigate"),
                UsageInfoLine::new(&["Enter"], "to choose the topic"),
                UsageInfoLine::new(&["q"], "to exit"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;
    use trivia_comms::event::{Question, ServerEvent, Topic};

    use super::*;
    use crate::ui_management::pages::layout::testing::render_to_string;

    fn topic(pk: i64, name: &str, question_count: usize, has_players: bool) -> Topic {
        Topic {
            pk,
            name: name.into(),
            questions: (0..question_count)
                .map(|i| Question {
                    text: format!("question {i}"),
                    options: vec![],
                    correct_index: None,
                })
                .collect(),
            has_players,
        }
    }

    fn state_with(topics: Vec<Topic>) -> State {
        let mut state = State::default();
        state.handle_server_event(&ServerEvent::Topics(topics));

        state
    }

    fn press(page: &mut TopicsPage, code: KeyCode) {
        page.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_renders_every_topic() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let state = state_with(vec![
            topic(1, "Astronomy", 3, false),
            topic(2, "Football", 10, true),
            topic(3, "Cooking", 0, true),
        ]);

        let screen = render_to_string(&TopicsPage::new(&state, action_tx));

        assert!(screen.contains("Astronomy (3 questions)"));
        assert!(screen.contains("Football (10 questions)"));
        assert!(screen.contains("Cooking (0 questions)"));
        assert_eq!(screen.matches(WAITING_PLAYER_LABEL).count(), 2);
    }

    #[test]
    fn test_waiting_label_only_on_flagged_topics() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let state = state_with(vec![topic(1, "Astronomy", 3, false)]);

        let screen = render_to_string(&TopicsPage::new(&state, action_tx));

        assert!(!screen.contains(WAITING_PLAYER_LABEL));
    }

    #[test]
    fn test_empty_topic_list() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();

        let screen = render_to_string(&TopicsPage::new(&state_with(vec![]), action_tx));

        assert!(screen.contains(NO_TOPICS_MESSAGE));
    }

    #[test]
    fn test_enter_selects_hovered_topic() {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();
        let state = state_with(vec![
            topic(1, "Astronomy", 3, false),
            topic(7, "Football", 10, true),
        ]);
        let mut page = TopicsPage::new(&state, action_tx);

        press(&mut page, KeyCode::Down);
        press(&mut page, KeyCode::Enter);
        assert_eq!(action_rx.try_recv().ok(), Some(Action::SelectTopic { pk: 7 }));

        // wraps around
        press(&mut page, KeyCode::Down);
        press(&mut page, KeyCode::Enter);
        assert_eq!(action_rx.try_recv().ok(), Some(Action::SelectTopic { pk: 1 }));
    }

    #[test]
    fn test_selection_survives_shorter_list() {
        let (action_tx, _action_rx) = mpsc::unbounded_channel();
        let mut page = TopicsPage::new(
            &state_with(vec![topic(1, "a", 1, false), topic(2, "b", 1, false)]),
            action_tx,
        );
        press(&mut page, KeyCode::Down);

        let page = page.move_with_state(&state_with(vec![topic(1, "a", 1, false)]));

        assert_eq!(page.hovered_topic().map(|topic| topic.pk), Some(1));
    }
}
