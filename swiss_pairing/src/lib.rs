//! # Swiss Pairing
//!
//! Standings and next-round pairings for Swiss-system tournaments.
//!
//! A Swiss tournament never eliminates anyone. Each round players meet an
//! opponent with a similar record whom they have not met before, and an odd
//! player out receives a bye (at most once per tournament).
//!
//! ## Architecture
//!
//! Data flows one way:
//!
//! - **Match history** (one record per side, sides share a match ID)
//! - **Standings Aggregator**: wins, matches, opponent match wins (OMW) and bye usage
//! - **Pairing Engine**: rematch-free adjacent-rank pairing with backtracking
//! - **Pairing list**: pairs strongest first, bye last
//!
//! ## Core Modules
//!
//! - [`tournament`]: Pure standings and pairing computation
//! - [`registry`]: In-memory store of players, tournaments, entrants and matches
//!
//! ## Example
//!
//! ```
//! use swiss_pairing::{PairingEntry, TournamentRegistry};
//!
//! let mut registry = TournamentRegistry::new();
//! let tournament = registry.register_tournament("Club Night", 5);
//! let players: Vec<_> = ["A", "B", "C", "D", "E"]
//!     .into_iter()
//!     .map(|name| registry.register_player(name))
//!     .collect();
//! for &player in &players {
//!     registry.register_entrant(player, tournament)?;
//! }
//!
//! let round_one = registry.pair_next_round(tournament)?;
//! assert_eq!(round_one.last(), Some(&PairingEntry::Bye { player: players[4] }));
//! # Ok::<(), swiss_pairing::RegistryError>(())
//! ```

/// Pure Swiss standings and pairing.
pub mod tournament;
pub use tournament::{
    Entrant, HistoryDefect, MatchRecord, MatchResult, PairingEntry, PairingOptions, PlayedPairs,
    Points, Standing, SwissError, SwissResult, TournamentSnapshot, UnorderedPair,
    compute_standings, pair_round, played_pairs,
};

/// In-memory tournament bookkeeping.
pub mod registry;
pub use registry::{RegistryError, RegistryResult, TournamentRegistry};
