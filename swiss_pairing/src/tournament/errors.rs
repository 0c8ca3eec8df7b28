//! Standings and pairing error types.

use super::models::{MatchId, PlayerId, TournamentId};
use thiserror::Error;

/// Defects found while reading a match history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryDefect {
    /// Match references a player/tournament pair that is not an entrant
    #[error("match {match_id} references player {player} in tournament {tournament}, which is not an entrant")]
    UnknownEntrant {
        match_id: MatchId,
        player: PlayerId,
        tournament: TournamentId,
    },

    /// Player listed more than once as an entrant
    #[error("player {player} is entered more than once")]
    DuplicateEntrant { player: PlayerId },

    /// Entrants belong to more than one tournament
    #[error("entrants span tournaments {first} and {second}")]
    MixedTournaments {
        first: TournamentId,
        second: TournamentId,
    },

    /// A played result with no opposing side
    #[error("match {match_id} has no opponent record")]
    MissingOpponent { match_id: MatchId },

    /// More than two records share a match ID
    #[error("match {match_id} has more than two records")]
    OverfullMatch { match_id: MatchId },

    /// A player appears on both sides of a match
    #[error("player {player} is recorded twice in match {match_id}")]
    SelfMatch { match_id: MatchId, player: PlayerId },

    /// A bye shares its match ID with another record
    #[error("bye {match_id} shares its match id with another record")]
    ByeWithOpponent { match_id: MatchId },

    /// The two sides of a match disagree on the outcome
    #[error("match {match_id} has inconsistent results")]
    InconsistentResults { match_id: MatchId },
}

/// Swiss computation errors. All are terminal for a single call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwissError {
    #[error("Invalid match history: {0}")]
    InvalidHistory(#[from] HistoryDefect),

    #[error("No eligible bye candidate: all {players} players have used their bye")]
    NoEligibleByeCandidate { players: usize },

    #[error("No valid pairing for {players} players without a rematch")]
    NoValidPairing { players: usize },
}

/// Result type for standings and pairing operations
pub type SwissResult<T> = Result<T, SwissError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_defect_converts() {
        let err: SwissError = HistoryDefect::MissingOpponent { match_id: 3 }.into();
        assert_eq!(
            err.to_string(),
            "Invalid match history: match 3 has no opponent record"
        );
    }

    #[test]
    fn test_pairing_error_messages() {
        assert_eq!(
            SwissError::NoEligibleByeCandidate { players: 3 }.to_string(),
            "No eligible bye candidate: all 3 players have used their bye"
        );
        assert_eq!(
            SwissError::NoValidPairing { players: 4 }.to_string(),
            "No valid pairing for 4 players without a rematch"
        );
    }
}
