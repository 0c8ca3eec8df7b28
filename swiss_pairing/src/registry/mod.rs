//! In-memory tournament registry.
//!
//! This module provides the bookkeeping around the Swiss core:
//! - Player and tournament registration
//! - Entering players into tournaments up to the declared player count
//! - Reporting wins, ties and byes
//! - Computing standings and pairing the next round
//!
//! ## Example
//!
//! ```
//! use swiss_pairing::registry::TournamentRegistry;
//!
//! let mut registry = TournamentRegistry::new();
//! let tournament = registry.register_tournament("Friday Night", 4);
//! for name in ["Markov Chaney", "Joe Malik", "Mao Tsu-hsi", "Atlanta Hope"] {
//!     let player = registry.register_player(name);
//!     registry.register_entrant(player, tournament)?;
//! }
//!
//! let pairings = registry.pair_next_round(tournament)?;
//! assert_eq!(pairings.len(), 2);
//! # Ok::<(), swiss_pairing::registry::RegistryError>(())
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{RegistryError, RegistryResult};
pub use manager::TournamentRegistry;
pub use models::{Player, Tournament};
