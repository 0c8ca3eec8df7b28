//! Registry error types.

use crate::tournament::{PlayerId, SwissError, TournamentId};
use thiserror::Error;

/// Registry errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Player not found
    #[error("Player not found: {0}")]
    PlayerNotFound(PlayerId),

    /// Tournament not found
    #[error("Tournament not found: {0}")]
    TournamentNotFound(TournamentId),

    /// Player already entered
    #[error("Player {player} already registered in tournament {tournament}")]
    AlreadyRegistered {
        player: PlayerId,
        tournament: TournamentId,
    },

    /// Declared player count reached
    #[error("Tournament is full: {declared} players declared")]
    TournamentFull { declared: usize },

    /// Player is not an entrant of the tournament
    #[error("Player {player} is not entered in tournament {tournament}")]
    NotRegistered {
        player: PlayerId,
        tournament: TournamentId,
    },

    /// Both sides of a match are the same player
    #[error("Player {0} cannot play against themselves")]
    SamePlayer(PlayerId),

    /// The two players have already met in this tournament
    #[error("Players {first} and {second} have already played each other")]
    Rematch { first: PlayerId, second: PlayerId },

    /// Second bye for the same player
    #[error("Player {0} has already received a bye")]
    ByeAlreadyUsed(PlayerId),

    /// Current round was paired but not every game has been reported
    #[error("Tournament {tournament} has {unreported} unreported pairs from the current round")]
    RoundInProgress {
        tournament: TournamentId,
        unreported: usize,
    },

    /// Standings or pairing failure
    #[error("Pairing error: {0}")]
    Swiss(#[from] SwissError),
}

impl RegistryError {
    /// Get a message safe to show to players
    ///
    /// Internal player and tournament IDs are redacted.
    pub fn client_message(&self) -> String {
        match self {
            RegistryError::PlayerNotFound(_) => "Player not found".to_string(),
            RegistryError::TournamentNotFound(_) => "Tournament not found".to_string(),
            RegistryError::AlreadyRegistered { .. } => "Player already registered".to_string(),
            RegistryError::NotRegistered { .. } => "Player is not entered".to_string(),
            RegistryError::SamePlayer(_) => "A player cannot play themselves".to_string(),
            RegistryError::Rematch { .. } => "Players have already played".to_string(),
            RegistryError::ByeAlreadyUsed(_) => "Bye already used".to_string(),
            RegistryError::RoundInProgress { .. } => {
                "Current round has unreported games".to_string()
            }
            RegistryError::Swiss(SwissError::InvalidHistory(_)) => {
                "Tournament history is inconsistent".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;
