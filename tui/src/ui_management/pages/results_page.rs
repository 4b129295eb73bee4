use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{prelude::*, Frame};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, GameResults, Screen, State};
use crate::ui_management::components::{
    usage::{HasUsageInfo, UsageInfo, UsageInfoLine},
    Component, ComponentRender,
};

use super::layout::{render_status, render_usage, split_page};

const WINNER_MARK: &str = "🏆";
const CONGRATULATIONS: &str = "Congratulations, you won!";

struct Props {
    results: Option<GameResults>,
    player_name: Option<String>,
}

impl From<&State> for Props {
    fn from(state: &State) -> Self {
        let results = match &state.screen {
            Screen::Results(results) => Some(results.clone()),
            _ => None,
        };

        Props {
            results,
            player_name: state.player_name.clone(),
        }
    }
}

/// ResultsPage shows the final scores and who won the game
pub struct ResultsPage {
    action_tx: UnboundedSender<Action>,
    props: Props,
}

impl Component for ResultsPage {
    fn new(state: &State, action_tx: UnboundedSender<Action>) -> Self
    where
        Self: Sized,
    {
        ResultsPage {
            action_tx,
            props: Props::from(state),
        }
    }

    fn move_with_state(self, state: &State) -> Self
    where
        Self: Sized,
    {
        ResultsPage {
            props: Props::from(state),
            ..self
        }
    }

    fn name(&self) -> &str {
        "Results"
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

impl ComponentRender<()> for ResultsPage {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, _props: ()) {
        let usage = self.usage_info();
        let (body, footer) = split_page(frame.size(), &usage);

        let mut lines = vec![];
        if let Some(results) = self.props.results.as_ref() {
            lines.push(Line::from(Span::from(results.message.clone()).bold()));
            let local_winner = results
                .winner()
                .is_some_and(|winner| self.props.player_name.as_deref() == Some(winner.name.as_str()));
            if local_winner {
                lines.push(Line::from(Span::from(CONGRATULATIONS).green().italic()));
            }
            lines.push(Line::from(""));

            for player in results.players.iter() {
                let mut spans = vec![];
                if player.winner {
                    spans.push(Span::raw(format!("{WINNER_MARK} ")));
                }

                let is_local = self.props.player_name.as_deref() == Some(player.name.as_str());
                let name = Span::from(player.name.clone());
                spans.push(if is_local { name.bold() } else { name });
                spans.push(Span::raw(format!(": {} points", player.score)));

                if player.winner {
                    spans = spans.into_iter().map(|span| span.green()).collect();
                }
                lines.push(Line::from(spans));
            }
        }

        render_status(frame, body, "Game over!", lines);
        render_usage(frame, usage, footer);
    }
}

impl HasUsageInfo for ResultsPage {
    fn usage_info(&self) -> UsageInfo {
        UsageInfo {
            description: Some("Thanks for playing".into()),
            lines: vec![
                UsageInfoLine::new(&["Enter"], "to play again"),
                UsageInfoLine::new(&["q"], "to exit"),
            ],
        }
    }
}
