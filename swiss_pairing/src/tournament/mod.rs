//! Swiss-system standings and pairing.
//!
//! This module is the pure core of the crate:
//! - Standings aggregation (wins, matches, OMW tie-break, bye usage)
//! - Next-round pairing with no rematches and at most one bye per player
//!
//! Nothing here performs I/O. Callers pass a match history and entrant list
//! and get values back.
//!
//! ## Example
//!
//! ```
//! use swiss_pairing::tournament::{
//!     Entrant, MatchRecord, MatchResult, PairingEntry, compute_standings, pair_round, played_pairs,
//! };
//!
//! let entrants: Vec<Entrant> = (1..=4).map(|player| Entrant::new(player, 1)).collect();
//! let history = vec![
//!     MatchRecord::new(1, 1, 1, MatchResult::Win),
//!     MatchRecord::new(1, 2, 1, MatchResult::Loss),
//!     MatchRecord::new(2, 3, 1, MatchResult::Win),
//!     MatchRecord::new(2, 4, 1, MatchResult::Loss),
//! ];
//!
//! let standings = compute_standings(&history, &entrants)?;
//! let pairings = pair_round(&standings, &played_pairs(&history))?;
//!
//! assert_eq!(pairings[0], PairingEntry::Pair { first: 1, second: 3 });
//! # Ok::<(), swiss_pairing::tournament::SwissError>(())
//! ```

pub mod errors;
mod matching;
pub mod models;
pub mod pairing;
pub mod snapshot;
pub mod standings;

pub use errors::{HistoryDefect, SwissError, SwissResult};
pub use models::{
    Entrant, MatchId, MatchRecord, MatchResult, PairingEntry, PlayedPairs, PlayerId, Points,
    Standing, TournamentId, UnorderedPair,
};
pub use pairing::{DEFAULT_COMPARISON_BUDGET_FACTOR, PairingOptions, pair_round, pair_round_with};
pub use snapshot::TournamentSnapshot;
pub use standings::{compute_standings, played_pairs};
