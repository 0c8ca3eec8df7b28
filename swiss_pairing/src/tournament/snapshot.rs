//! Explicit tournament state handed to the pairing engine.

use super::errors::SwissResult;
use super::models::{Entrant, MatchRecord, PairingEntry, PlayedPairs, Standing};
use super::pairing::{PairingOptions, pair_round_with};
use super::standings::{compute_standings, played_pairs};
use serde::{Deserialize, Serialize};

/// Consistent view of a tournament between rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    /// Round about to be paired (1-indexed)
    pub round: u32,
    /// Ranked standings, strongest first
    pub standings: Vec<Standing>,
    /// Opponent pairs already contested
    pub played_pairs: PlayedPairs,
}

impl TournamentSnapshot {
    /// Build a snapshot from the full match history.
    ///
    /// Every entrant takes part in each round, either in a game or on a bye,
    /// so the number of completed rounds is the highest match count.
    ///
    /// # Errors
    ///
    /// Returns `SwissError::InvalidHistory` if the history is inconsistent with
    /// the entrants.
    pub fn from_history(history: &[MatchRecord], entrants: &[Entrant]) -> SwissResult<Self> {
        let standings = compute_standings(history, entrants)?;
        let completed = standings.iter().map(|s| s.matches).max().unwrap_or(0);

        Ok(Self {
            round: completed + 1,
            standings,
            played_pairs: played_pairs(history),
        })
    }

    /// Pair the next round with default options
    pub fn pair_next_round(&self) -> SwissResult<Vec<PairingEntry>> {
        self.pair_next_round_with(&PairingOptions::default())
    }

    /// Pair the next round with explicit search limits
    pub fn pair_next_round_with(
        &self,
        options: &PairingOptions,
    ) -> SwissResult<Vec<PairingEntry>> {
        pair_round_with(&self.standings, &self.played_pairs, options)
    }
}
