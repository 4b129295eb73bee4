use trivia_comms::event::PlayerScore;

const DRAW_MESSAGE: &str = "Draw!";
const NO_PLAYERS_MESSAGE: &str = "Game over";

/// A player on the results screen
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPlayer {
    pub name: String,
    pub score: u32,
    pub winner: bool,
}

/// Final message and annotated players of a finished game
#[derive(Debug, Clone, PartialEq)]
pub struct GameResults {
    pub message: String,
    pub players: Vec<RankedPlayer>,
}

impl GameResults {
    /// Computes the winner of a game.
    ///
    /// The game is a draw when the best score is shared by more than one player,
    /// which for the usual two player game means both scores are equal.
    /// Otherwise the single best scorer is flagged as the winner.
    pub fn from_players(players: &[PlayerScore]) -> Self {
        let max_score = players.iter().map(|player| player.score).max();
        let leaders = players
            .iter()
            .filter(|player| Some(player.score) == max_score)
            .collect::<Vec<_>>();

        let (message, winner) = match leaders.as_slice() {
            [] => (String::from(NO_PLAYERS_MESSAGE), None),
            [winner] => (format!("{} wins!", winner.name), Some(*winner)),
            _ => (String::from(DRAW_MESSAGE), None),
        };

        GameResults {
            message,
            players: players
                .iter()
                .map(|player| RankedPlayer {
                    name: player.name.clone(),
                    score: player.score,
                    winner: winner.is_some_and(|winner| std::ptr::eq(winner, player)),
                })
                .collect(),
        }
    }

    pub fn winner(&self) -> Option<&RankedPlayer> {
        self.players.iter().find(|player| player.winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(scores: &[(&str, u32)]) -> Vec<PlayerScore> {
        scores
            .iter()
            .map(|(name, score)| PlayerScore {
                name: name.to_string(),
                score: *score,
            })
            .collect()
    }

    #[test]
    fn test_equal_scores_are_a_draw() {
        let results = GameResults::from_players(&players(&[("alice", 3), ("bob", 3)]));

        assert_eq!(results.message, DRAW_MESSAGE);
        assert!(results.players.iter().all(|player| !player.winner));
    }

    #[test]
    fn test_best_scorer_wins() {
        let results = GameResults::from_players(&players(&[("alice", 1), ("bob", 4)]));

        assert_eq!(results.message, "bob wins!");
        assert_eq!(
            results
                .players
                .iter()
                .filter(|player| player.winner)
                .count(),
            1
        );
        assert_eq!(results.winner().map(|winner| winner.name.as_str()), Some("bob"));
    }

    #[test]
    fn test_player_order_is_kept() {
        let results = GameResults::from_players(&players(&[("alice", 5), ("bob", 2)]));

        assert_eq!(
            results
                .players
                .iter()
                .map(|player| (player.name.as_str(), player.score, player.winner))
                .collect::<Vec<_>>(),
            vec![("alice", 5, true), ("bob", 2, false)]
        );
    }

    #[test]
    fn test_shared_lead_among_more_players_is_a_draw() {
        let results =
            GameResults::from_players(&players(&[("alice", 1), ("bob", 4), ("carol", 4)]));

        assert_eq!(results.message, DRAW_MESSAGE);
        assert!(results.winner().is_none());
    }

    #[test]
    fn test_no_players() {
        let results = GameResults::from_players(&[]);

        assert_eq!(results.message, NO_PLAYERS_MESSAGE);
        assert!(results.players.is_empty());
    }
}
