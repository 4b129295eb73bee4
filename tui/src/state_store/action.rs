/// User intents sent by the pages to the state store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Pick a topic from the last received list, handled locally
    SelectTopic { pk: i64 },
    /// Go back to the last received topic list, handled locally
    BackToTopics,
    /// Join the matchmaking queue of the selected topic
    JoinGame { name: String },
    /// Answer the displayed question with the option at the given 0-based position
    SelectAnswer { index: usize },
    /// Ask the server for a fresh topic list, used by "play again" and "return to main"
    RequestTopics,
    Exit,
}
