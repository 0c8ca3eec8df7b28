//! Registry records for players and tournaments.

use crate::tournament::{PlayerId, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name
    pub name: String,
    pub registered_at: DateTime<Utc>,
}

/// Registered tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Number of entrants the tournament accepts
    pub declared_players: usize,
    pub created_at: DateTime<Utc>,
}
