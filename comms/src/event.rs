use serde::{Deserialize, Serialize};

/// A single question of a topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// The question itself
    pub text: String,
    /// Answer options in display order
    pub options: Vec<String>,
    /// 1-based position of the correct option, only sent as part of topic listings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<usize>,
}

/// A quiz subject players can pick to get matched against each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique identifier of the topic
    pub pk: i64,
    /// Display name of the topic
    pub name: String,
    /// Questions asked in a game of this topic
    pub questions: Vec<Question>,
    /// Someone is already waiting for an opponent in this topic
    #[serde(default)]
    pub has_players: bool,
}

impl Topic {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// Name and running score of a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub score: u32,
}

/// Outcome of a single player's answer to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub name: String,
    pub is_correct: bool,
    pub score: u32,
}

/// Sent once every player has answered the current question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    /// 1-based position of the correct option
    pub answer: usize,
    /// Per player outcome, in the same order as the players of the game
    pub results: Vec<AnswerResult>,
}

/// Snapshot of an in-progress game. Every snapshot replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Unique identifier of the game
    pub uid: String,
    /// Players and their running scores
    pub players: Vec<PlayerScore>,
    /// Question to answer, missing on snapshots which only carry feedback
    #[serde(default)]
    pub current_question: Option<Question>,
    /// Number of questions left, the current one included
    pub question_count: u32,
    /// Outcome of the question which was just answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<AnswerFeedback>,
}

/// Final scores of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameOver {
    pub players: Vec<PlayerScore>,
}

/// Greeting sent by the server right after a connection is accepted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connected {
    pub message: String,
}

/// Known error codes the server reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidName,
    InvalidTopic,
    InvalidData,
    GameNotFound,
    InvalidAnswerIndex,
    OpponentDisconnected,
    Other(String),
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "invalid_name" => ErrorCode::InvalidName,
            "invalid_topic" => ErrorCode::InvalidTopic,
            "invalid_data" => ErrorCode::InvalidData,
            "game_not_found" => ErrorCode::GameNotFound,
            "invalid_answer_index" => ErrorCode::InvalidAnswerIndex,
            "opponent_disconnected" => ErrorCode::OpponentDisconnected,
            other => ErrorCode::Other(String::from(other)),
        }
    }
}

/// A domain error reported by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerError {
    /// Machine readable error code
    pub error: String,
    /// Developer facing description, not meant for players
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServerError {
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from(self.error.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
/// Events that can be sent to the client
/// The receipient is always a single player session
pub enum ServerEvent {
    Connected(Connected),
    Topics(Vec<Topic>),
    Game(Game),
    Over(GameOver),
    Error(ServerError),
}

#[cfg(test)]
mod tests {
    use super::*;

    // given an event enum, and an expect string, asserts that event is serialized / deserialized appropiately
    fn assert_event_serialization(event: &ServerEvent, expected: &str) {
        let serialized = serde_json::to_string(&event).unwrap();
        assert_eq!(serialized, expected);
        let deserialized: ServerEvent = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, *event);
    }

    #[test]
    fn test_topics_event() {
        let event = ServerEvent::Topics(vec![Topic {
            pk: 1,
            name: "Space".to_string(),
            questions: vec![Question {
                text: "Closest planet to the sun?".to_string(),
                options: vec!["Mercury".to_string(), "Venus".to_string()],
                correct_index: Some(1),
            }],
            has_players: true,
        }]);

        assert_event_serialization(
            &event,
            r#"{"event":"topics","data":[{"pk":1,"name":"Space","questions":[{"text":"Closest planet to the sun?","options":["Mercury","Venus"],"correct_index":1}],"has_players":true}]}"#,
        );
    }

    #[test]
    fn test_topic_without_waiting_flag() {
        let event: ServerEvent = serde_json::from_str(
            r#"{"event":"topics","data":[{"pk":7,"name":"Rust","questions":[]}]}"#,
        )
        .unwrap();

        let ServerEvent::Topics(topics) = event else {
            panic!("expected a topics event");
        };
        assert!(!topics[0].has_players);
        assert_eq!(topics[0].question_count(), 0);
    }

    #[test]
    fn test_game_event() {
        let event = ServerEvent::Game(Game {
            uid: "game-1".to_string(),
            players: vec![
                PlayerScore {
                    name: "alice".to_string(),
                    score: 0,
                },
                PlayerScore {
                    name: "bob".to_string(),
                    score: 1,
                },
            ],
            current_question: Some(Question {
                text: "2 + 2?".to_string(),
                options: vec!["3".to_string(), "4".to_string()],
                correct_index: None,
            }),
            question_count: 3,
            feedback: None,
        });

        assert_event_serialization(
            &event,
            r#"{"event":"game","data":{"uid":"game-1","players":[{"name":"alice","score":0},{"name":"bob","score":1}],"current_question":{"text":"2 + 2?","options":["3","4"]},"question_count":3}}"#,
        );
    }

    #[test]
    fn test_feedback_only_game_event() {
        let event: ServerEvent = serde_json::from_str(
            r#"{"event":"game","data":{"uid":"game-1","question_count":2,"feedback":{"answer":2,"results":[{"name":"alice","is_correct":true,"score":1}]},"players":[{"name":"alice","score":1}]}}"#,
        )
        .unwrap();

        let ServerEvent::Game(game) = event else {
            panic!("expected a game event");
        };
        assert_eq!(game.current_question, None);
        assert_eq!(game.feedback.map(|feedback| feedback.answer), Some(2));
    }

    #[test]
    fn test_over_event() {
        let event = ServerEvent::Over(GameOver {
            players: vec![PlayerScore {
                name: "alice".to_string(),
                score: 4,
            }],
        });

        assert_event_serialization(
            &event,
            r#"{"event":"over","data":{"players":[{"name":"alice","score":4}]}}"#,
        );
    }

    #[test]
    fn test_error_event() {
        let event = ServerEvent::Error(ServerError {
            error: "invalid_name".to_string(),
            message: Some("Invalid player name".to_string()),
        });

        assert_event_serialization(
            &event,
            r#"{"event":"error","data":{"error":"invalid_name","message":"Invalid player name"}}"#,
        );
    }

    #[test]
    fn test_error_codes() {
        let error = |code: &str| ServerError {
            error: code.to_string(),
            message: None,
        };

        assert_eq!(error("invalid_name").code(), ErrorCode::InvalidName);
        assert_eq!(error("invalid_topic").code(), ErrorCode::InvalidTopic);
        assert_eq!(
            error("opponent_disconnected").code(),
            ErrorCode::OpponentDisconnected
        );
        assert_eq!(
            error("teapot").code(),
            ErrorCode::Other("teapot".to_string())
        );
    }
}
