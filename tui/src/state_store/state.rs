use trivia_comms::{
    command::{self, ClientCommand},
    event::{self, ErrorCode, ServerEvent},
};

use super::{action::Action, results::GameResults};

pub const CONNECTION_FAILED_MESSAGE: &str =
    "Could not connect to the server. Check your connection.";
const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Player facing message for an error reported by the server
pub fn error_message(error: &event::ServerError) -> String {
    let message = match error.code() {
        ErrorCode::InvalidName => "Please enter your name",
        ErrorCode::InvalidTopic => "The selected topic is invalid",
        ErrorCode::OpponentDisconnected => "Your opponent disconnected. The game is over.",
        ErrorCode::GameNotFound => "The game no longer exists",
        _ => GENERIC_ERROR_MESSAGE,
    };

    String::from(message)
}

/// The screen currently shown, exactly one at any time
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loader,
    Topics,
    PlayerForm,
    Waiting,
    Game,
    Results(GameResults),
    Disconnected,
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServerConnectionStatus {
    Uninitialized,
    Connecting,
    Connected { addr: String },
    Disconnected,
    Errored { err: String },
}

/// Answer marks on the displayed question, as 0-based option positions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerState {
    /// Option the player picked
    pub selected: Option<usize>,
    /// Option the server revealed as correct
    pub revealed_correct: Option<usize>,
}

impl AnswerState {
    /// No more answers are accepted for the displayed question
    pub fn is_locked(&self) -> bool {
        self.selected.is_some() || self.revealed_correct.is_some()
    }
}

/// State holds the state of the application
#[derive(Debug, Clone)]
pub struct State {
    pub server_connection_status: ServerConnectionStatus,
    /// The screen to render
    pub screen: Screen,
    /// Last topic list received from the server
    pub topics: Vec<Topic>,
    /// Topic picked by the player, always one of `topics`
    pub selected_topic: Option<Topic>,
    /// Last game snapshot received from the server
    pub game: Option<event::Game>,
    /// Question on display, survives feedback snapshots which carry no question
    pub question: Option<event::Question>,
    pub answer: AnswerState,
    /// Name the player joined the last game with
    pub player_name: Option<String>,
}

type Topic = event::Topic;

impl Default for State {
    fn default() -> Self {
        State {
            server_connection_status: ServerConnectionStatus::Uninitialized,
            screen: Screen::Loader,
            topics: Vec::new(),
            selected_topic: None,
            game: None,
            question: None,
            answer: AnswerState::default(),
            player_name: None,
        }
    }
}

impl State {
    pub fn handle_server_event(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::Connected(_) => (),
            ServerEvent::Topics(topics) => {
                self.topics = topics.clone();
                // keep the selection pointing into the fresh list
                self.selected_topic = self.selected_topic.take().and_then(|selected| {
                    self.topics
                        .iter()
                        .find(|topic| topic.pk == selected.pk)
                        .cloned()
                });
                self.screen = Screen::Topics;
            }
            ServerEvent::Game(game) => {
                if let Some(question) = game.current_question.as_ref() {
                    self.question = Some(question.clone());
                    self.answer = AnswerState::default();
                }
                if let Some(feedback) = game.feedback.as_ref() {
                    self.answer.revealed_correct = feedback.answer.checked_sub(1);
                }

                self.game = Some(game.clone());
                self.screen = Screen::Game;
            }
            ServerEvent::Over(over) => {
                self.screen = Screen::Results(GameResults::from_players(&over.players));
            }
            ServerEvent::Error(error) => {
                self.screen = Screen::Error {
                    message: error_message(error),
                };
            }
        }
    }

    /// Applies a user action to the state.
    /// Returns the command to send to the server, if the action requires one.
    pub fn apply_action(&mut self, action: &Action) -> Option<ClientCommand> {
        match action {
            Action::SelectTopic { pk } => {
                let topic = self.topics.iter().find(|topic| topic.pk == *pk)?;

                self.selected_topic = Some(topic.clone());
                self.screen = Screen::PlayerForm;

                None
            }
            Action::BackToTopics => {
                self.screen = Screen::Topics;

                None
            }
            Action::JoinGame { name } => {
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                let topic_pk = self.selected_topic.as_ref()?.pk;

                self.player_name = Some(String::from(name));
                self.screen = Screen::Waiting;

                Some(ClientCommand::JoinGame(command::JoinGameCommand {
                    topic_pk,
                    name: String::from(name),
                }))
            }
            Action::SelectAnswer { index } => {
                if self.answer.is_locked() {
                    return None;
                }
                let game = self.game.as_ref()?;
                let option_count = self.question.as_ref()?.options.len();
                if *index >= option_count {
                    return None;
                }

                self.answer.selected = Some(*index);

                Some(ClientCommand::Answer(command::AnswerCommand {
                    index: index + 1,
                    game_uid: game.uid.clone(),
                }))
            }
            Action::RequestTopics => Some(ClientCommand::GetTopics),
            Action::Exit => None,
        }
    }

    pub fn mark_connection_request_start(&mut self) {
        self.server_connection_status = ServerConnectionStatus::Connecting;
    }

    /// Processes the result of a connection request to change the state of the application.
    /// Returns the command to send right after a successful connection.
    pub fn process_connection_request_result(
        &mut self,
        result: anyhow::Result<String>,
    ) -> Option<ClientCommand> {
        match result {
            Ok(addr) => {
                self.server_connection_status = ServerConnectionStatus::Connected { addr };

                Some(ClientCommand::GetTopics)
            }
            Err(err) => {
                self.server_connection_status = ServerConnectionStatus::Errored {
                    err: format!("{err:#}"),
                };
                self.screen = Screen::Error {
                    message: String::from(CONNECTION_FAILED_MESSAGE),
                };

                None
            }
        }
    }

    /// The connection was lost. Everything but the connection status is kept
    /// so that a reconnect can resume from it.
    pub fn mark_disconnected(&mut self) {
        self.server_connection_status = ServerConnectionStatus::Disconnected;
        self.screen = Screen::Disconnected;
    }

    pub fn is_connected(&self) -> bool {
        matches!(
            self.server_connection_status,
            ServerConnectionStatus::Connected { .. }
        )
    }
}
