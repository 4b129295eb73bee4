use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, widgets::*, Frame};
use tokio::sync::mpsc::UnboundedSender;
use trivia_comms::event::{AnswerFeedback, PlayerScore, Question};

use crate::state_store::{action::Action, AnswerState, State};
use crate::ui_management::components::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{page_block, render_usage, split_page};

const YOUR_ANSWER_LABEL: &str = "your answer";
const CORRECT_LABEL: &str = "correct";

struct Props {
    players: Vec<PlayerScore>,
    /// Name of the local player, to tell them apart on the scoreboard
    player_name: Option<String>,
    question: Option<Question>,
    question_count: u32,
    answer: AnswerState,
    feedback: Option<AnswerFeedback>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        let game = state.game.as_ref();

        Props {
            players: game.map(|game| game.players.clone()).unwrap_or_default(),
            player_name: state.player_name.clone(),
            question: state.question.clone(),
            question_count: game.map(|game| game.question_count).unwrap_or_default(),
            answer: state.answer.clone(),
            feedback: game.and_then(|game| game.feedback.clone()),
        }
    }
}

/// GamePage shows the scoreboard and the question in play, and takes the player's answer
pub struct GamePage {
    action_tx: UnboundedSender<Action>,
    props: Props,
    // Internal State
    /// Option under the cursor, 0-based
    hovered: usize,
}

impl GamePage {
    fn option_count(&self) -> usize {
        self.props
            .question
            .as_ref()
            .map(|question| question.options.len())
            .unwrap_or(0)
    }

    fn hover_next(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.hovered = (self.hovered + 1) % count;
        }
    }

    fn hover_previous(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.hovered = (self.hovered + count - 1) % count;
        }
    }

    fn select(&mut self, index: usize) {
        if index >= self.option_count() || self.props.answer.is_locked() {
            return;
        }

        self.hovered = index;
        let _ = self.action_tx.send(Action::SelectAnswer { index });
    }

    fn render_scoreboard<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let mut spans: Vec<Span> = vec![];
        for (idx, player) in self.props.players.iter().enumerate() {
            if idx > 0 {
                spans.push("   |   ".into());
            }

            let is_local = self.props.player_name.as_deref() == Some(player.name.as_str());
            let name = if is_local {
                Span::from(format!("{} (you)", player.name)).bold()
            } else {
                Span::from(player.name.clone())
            };
            spans.push(name);
            spans.push(Span::raw(format!(": {} pts", player.score)));
        }

        let scoreboard = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(page_block("Game"));
        frame.render_widget(scoreboard, area);
    }

    fn render_options<B: Backend>(&self, frame: &mut Frame<B>, area: Rect, question: &Question) {
        let AnswerState {
            selected,
            revealed_correct,
        } = self.props.answer;

        let items = question
            .options
            .iter()
            .enumerate()
            .map(|(idx, option)| {
                let mut spans = vec![Span::raw(format!("{}. {}", idx + 1, option))];
                let mut style = Style::default();

                if selected == Some(idx) {
                    spans.push(Span::raw(format!("  <- {YOUR_ANSWER_LABEL}")));
                    style = match revealed_correct {
                        Some(correct) if correct != idx => style.fg(Color::Red),
                        _ => style.fg(Color::Yellow),
                    }
                    .add_modifier(Modifier::BOLD);
                }
                if revealed_correct == Some(idx) {
                    spans.push(Span::raw(format!("  ✔ {CORRECT_LABEL}")));
                    style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                }

                ListItem::new(Line::from(spans)).style(style)
            })
            .collect::<Vec<_>>();

        let mut list = List::new(items).block(Block::default().borders(Borders::ALL).title("Options"));
        let mut list_state = ListState::default();
        if !self.props.answer.is_locked() {
            list = list
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            list_state.select(Some(self.hovered));
        }

        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_feedback<B: Backend>(
        &self,
        frame: &mut Frame<B>,
        area: Rect,
        feedback: &AnswerFeedback,
    ) {
        let lines = feedback
            .results
            .iter()
            .map(|result| {
                let verdict = if result.is_correct {
                    Span::from("right").green()
                } else {
                    Span::from("wrong").red()
                };

                Line::from(vec![
                    Span::from(result.name.clone()).bold(),
                    " answered ".into(),
                    verdict,
                    Span::raw(format!(", {} pts", result.score)),
                ])
            })
            .collect::<Vec<_>>();

        let feedback = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Round results"),
        );
        frame.render_widget(feedback, area);
    }
}

impl Component for GamePage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        GamePage {
            action_tx,
            props: Props::from(state),
            hovered: 0,
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        let props = Props::from(state);
        // a new question brings the cursor back to the top
        let hovered = if props.question == self.props.question {
            self.hovered
        } else {
            0
        };

        GamePage {
            props,
            hovered,
            ..self
        }
    }

    fn name(&self) -> &str {
        "Game"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.select(digit as usize - 1);
                }
            }
            KeyCode::Up => self.hover_previous(),
            KeyCode::Down => self.hover_next(),
            KeyCode::Enter => self.select(self.hovered),
            KeyCode::Char('q') => {
                let _ = self.action_tx.send(Action::Exit);
            }
            _ => {}
        }
    }
}

impl ComponentRender<()> for GamePage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        let feedback_height = self
            .props
            .feedback
            .as_ref()
            .map(|feedback| feedback.results.len() as u16 + 2)
            .unwrap_or(0);

        let [container_scoreboard, container_question, container_options, container_feedback] =
            *Layout::default()
                .direction(Direction::Vertical)
                .constraints(
                    [
                        Constraint::Length(3),
                        Constraint::Length(5),
                        Constraint::Min(3),
                        Constraint::Length(feedback_height),
                    ]
                    .as_ref(),
                )
                .split(body)
        else {
            panic!("The game layout should have 4 chunks")
        };

        self.render_scoreboard(frame, container_scoreboard);

        let Some(question) = self.props.question.as_ref() else {
            let waiting = Paragraph::new("Waiting for the next question...")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Question"));
            frame.render_widget(waiting, container_question);
            render_usage(frame, usage, footer);
            return;
        };

        let question_text = Paragraph::new(vec![
            Line::from(Span::from(question.text.clone()).bold()),
            Line::from(""),
            Line::from(Span::from(format!("Questions left: {}", self.props.question_count)).italic()),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
        frame.render_widget(question_text, container_question);

        self.render_options(frame, container_options, question);

        if let Some(feedback) = self.props.feedback.as_ref() {
            self.render_feedback(frame, container_feedback, feedback);
        }

        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for GamePage {
    fn usage_info(&self) -> UsageInfo {
        if self.props.answer.is_locked() {
            UsageInfo {
                description: Some("Waiting for the other players".into()),
                lines: vec![UsageInfoLine::new(&["q"], "to exit")],
            }
        } else {
            UsageInfo {
                description: Some("Pick your answer".into()),
                lines: vec![
                    UsageInfoLine::new(&["1-9"], "to answer directly"),
                    UsageInfoLine::new(&["↑", "↓"], "to navigate"),
                    UsageInfoLine::new(&["Enter"], "to answer"),
                    UsageInfoLine::new(&["q"], "to exit"),
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};
    use trivia_comms::event::{AnswerResult, Game, ServerEvent};

    use super::*;
    use crate::ui_management::pages::layout::testing::render_to_string;

    fn game(question: Option<&str>) -> Game {
        Game {
            uid: "game-9".into(),
            players: vec![
                PlayerScore {
                    name: "alice".into(),
                    score: 2,
                },
                PlayerScore {
                    name: "bob".into(),
                    score: 1,
                },
            ],
            current_question: question.map(|text| Question {
                text: text.into(),
                options: vec!["Paris".into(), "Lyon".into(), "Nice".into()],
                correct_index: None,
            }),
            question_count: 4,
            feedback: None,
        }
    }

    fn in_game() -> State {
        let mut state = State::default();
        state.player_name = Some("alice".into());
        state.handle_server_event(&ServerEvent::Game(game(Some("Capital of France?"))));

        state
    }

    fn page(state: &State) -> (GamePage, UnboundedReceiver<Action>) {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        (GamePage::new(state, action_tx), action_rx)
    }

    fn press(page: &mut GamePage, code: KeyCode) {
        page.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_renders_question_and_scores() {
        let (page, _action_rx) = page(&in_game());

        let screen = render_to_string(&page);

        assert!(screen.contains("Capital of France?"));
        assert!(screen.contains("Questions left: 4"));
        assert!(screen.contains("alice (you): 2 pts"));
        assert!(screen.contains("bob: 1 pts"));
        assert!(screen.contains("1. Paris"));
        assert!(screen.contains("3. Nice"));
    }

    #[test]
    fn test_digit_answers_directly() {
        let (mut page, mut action_rx) = page(&in_game());

        press(&mut page, KeyCode::Char('2'));

        assert_eq!(action_rx.try_recv().ok(), Some(Action::SelectAnswer { index: 1 }));
    }

    #[test]
    fn test_out_of_range_digit_is_ignored() {
        let (mut page, mut action_rx) = page(&in_game());

        press(&mut page, KeyCode::Char('4'));

        assert_eq!(action_rx.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn test_enter_answers_hovered_option() {
        let (mut page, mut action_rx) = page(&in_game());

        press(&mut page, KeyCode::Up);
        press(&mut page, KeyCode::Enter);

        assert_eq!(action_rx.try_recv().ok(), Some(Action::SelectAnswer { index: 2 }));
    }

    #[test]
    fn test_selected_answer_locks_the_options() {
        let mut state = in_game();
        let (mut page, mut action_rx) = page(&state);

        press(&mut page, KeyCode::Char('1'));
        let action = action_rx.try_recv().unwrap();
        state.apply_action(&action);
        let mut page = page.move_with_state(&state);

        press(&mut page, KeyCode::Char('3'));
        assert_eq!(action_rx.try_recv(), Err(TryRecvError::Empty));

        let screen = render_to_string(&page);
        assert_eq!(screen.matches(YOUR_ANSWER_LABEL).count(), 1);
        assert!(screen.contains(&format!("1. Paris  <- {YOUR_ANSWER_LABEL}")));
    }

    #[test]
    fn test_feedback_reveals_correct_answer() {
        let mut state = in_game();
        state.apply_action(&Action::SelectAnswer { index: 0 });
        let mut feedback = game(None);
        feedback.feedback = Some(AnswerFeedback {
            answer: 1,
            results: vec![
                AnswerResult {
                    name: "alice".into(),
                    is_correct: true,
                    score: 3,
                },
                AnswerResult {
                    name: "bob".into(),
                    is_correct: false,
                    score: 1,
                },
            ],
        });
        state.handle_server_event(&ServerEvent::Game(feedback));
        let (page, _action_rx) = page(&state);

        let screen = render_to_string(&page);

        assert!(screen.contains("Capital of France?"));
        assert!(screen.contains(CORRECT_LABEL));
        assert!(screen.contains("alice answered right, 3 pts"));
        assert!(screen.contains("bob answered wrong, 1 pts"));
    }

    #[test]
    fn test_new_question_resets_cursor() {
        let state = in_game();
        let (mut page, mut action_rx) = page(&state);
        press(&mut page, KeyCode::Down);

        let mut next = state.clone();
        next.handle_server_event(&ServerEvent::Game(game(Some("Capital of Italy?"))));
        let mut page = page.move_with_state(&next);
        press(&mut page, KeyCode::Enter);

        assert_eq!(action_rx.try_recv().ok(), Some(Action::SelectAnswer { index: 0 }));
    }
}
