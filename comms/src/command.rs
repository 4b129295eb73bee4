use serde::{Deserialize, Serialize};

/// Command for joining the matchmaking queue of a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinGameCommand {
    /// Identifier of the topic to play.
    pub topic_pk: i64,
    /// Name of the player, already trimmed.
    pub name: String,
}

/// Command for answering the current question of a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCommand {
    /// 1-based position of the chosen option.
    pub index: usize,
    /// The game the answer belongs to.
    pub game_uid: String,
}

/// A command which can be sent to the server by a single player session.
/// Commands are fire and forget, the server answers with events whenever it sees fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientCommand {
    GetTopics,
    JoinGame(JoinGameCommand),
    Answer(AnswerCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    // given a command enum, and an expect string, asserts that command is serialized / deserialized appropiately
    fn assert_command_serialization(command: &ClientCommand, expected: &str) {
        let serialized = serde_json::to_string(&command).unwrap();
        assert_eq!(serialized, expected);
        let deserialized: ClientCommand = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, *command);
    }

    #[test]
    fn test_get_topics_command() {
        assert_command_serialization(&ClientCommand::GetTopics, r#"{"event":"get_topics"}"#);
    }

    #[test]
    fn test_join_game_command() {
        let command = ClientCommand::JoinGame(JoinGameCommand {
            topic_pk: 3,
            name: "alice".to_string(),
        });

        assert_command_serialization(
            &command,
            r#"{"event":"join_game","data":{"topic_pk":3,"name":"alice"}}"#,
        );
    }

    #[test]
    fn test_answer_command() {
        let command = ClientCommand::Answer(AnswerCommand {
            index: 2,
            game_uid: "game-1".to_string(),
        });

        assert_command_serialization(
            &command,
            r#"{"event":"answer","data":{"index":2,"game_uid":"game-1"}}"#,
        );
    }
}
