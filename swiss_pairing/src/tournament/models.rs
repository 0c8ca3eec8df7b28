//! Swiss tournament data models.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Player ID type
pub type PlayerId = i64;

/// Tournament ID type
pub type TournamentId = i64;

/// Match ID type. Both sides of a played game share one match ID.
pub type MatchId = i64;

/// Score kept in half points so that ties stay exact and totally ordered.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Points(u32);

impl Points {
    pub const ZERO: Self = Self(0);
    pub const HALF: Self = Self(1);
    pub const ONE: Self = Self(2);

    /// Create points from a number of half points
    pub const fn from_halves(halves: u32) -> Self {
        Self(halves)
    }

    /// Number of half points
    pub const fn halves(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Add for Points {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

/// Outcome of one side of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchResult {
    Win,
    Loss,
    Tie,
    /// Automatic win with no opponent
    Bye,
}

impl MatchResult {
    /// Points credited towards the win total
    pub fn points(self) -> Points {
        match self {
            MatchResult::Win | MatchResult::Bye => Points::ONE,
            MatchResult::Tie => Points::HALF,
            MatchResult::Loss => Points::ZERO,
        }
    }

    /// Whether `self` and `other` can be the two sides of one game
    pub fn complements(self, other: MatchResult) -> bool {
        matches!(
            (self, other),
            (MatchResult::Win, MatchResult::Loss)
                | (MatchResult::Loss, MatchResult::Win)
                | (MatchResult::Tie, MatchResult::Tie)
        )
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Win => write!(f, "win"),
            MatchResult::Loss => write!(f, "loss"),
            MatchResult::Tie => write!(f, "tie"),
            MatchResult::Bye => write!(f, "bye"),
        }
    }
}

/// One side of a match as recorded by the tournament store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: MatchId,
    pub player: PlayerId,
    pub tournament: TournamentId,
    pub result: MatchResult,
}

impl MatchRecord {
    pub fn new(
        match_id: MatchId,
        player: PlayerId,
        tournament: TournamentId,
        result: MatchResult,
    ) -> Self {
        Self {
            match_id,
            player,
            tournament,
            result,
        }
    }
}

/// A player registered into a specific tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub player: PlayerId,
    pub tournament: TournamentId,
    /// At most one bye per player per tournament
    pub used_bye: bool,
}

impl Entrant {
    pub fn new(player: PlayerId, tournament: TournamentId) -> Self {
        Self {
            player,
            tournament,
            used_bye: false,
        }
    }

    /// Mark the entrant as having already received its bye
    pub fn with_bye_used(mut self) -> Self {
        self.used_bye = true;
        self
    }
}

/// Derived standing of one entrant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    /// Win total (win and bye = 1, tie = 0.5)
    pub wins: Points,
    /// Matches played, byes included
    pub matches: u32,
    /// Opponent match wins: sum of every distinct opponent's current win total
    pub omw: Points,
    pub used_bye: bool,
}

impl Standing {
    /// A standing with no history
    pub fn fresh(player: PlayerId) -> Self {
        Self {
            player,
            wins: Points::ZERO,
            matches: 0,
            omw: Points::ZERO,
            used_bye: false,
        }
    }
}

/// Unordered pair of player IDs, normalized so the smaller ID comes first
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "(PlayerId, PlayerId)", into = "(PlayerId, PlayerId)")]
pub struct UnorderedPair(PlayerId, PlayerId);

impl UnorderedPair {
    pub fn new(a: PlayerId, b: PlayerId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn low(&self) -> PlayerId {
        self.0
    }

    pub fn high(&self) -> PlayerId {
        self.1
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.0 == player || self.1 == player
    }
}

impl From<(PlayerId, PlayerId)> for UnorderedPair {
    fn from((a, b): (PlayerId, PlayerId)) -> Self {
        Self::new(a, b)
    }
}

impl From<UnorderedPair> for (PlayerId, PlayerId) {
    fn from(pair: UnorderedPair) -> Self {
        (pair.0, pair.1)
    }
}

/// Opponent pairs already contested in a tournament
pub type PlayedPairs = HashSet<UnorderedPair>;

/// One entry of a round's pairing list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PairingEntry {
    /// Two players meet; `first` is the higher ranked
    Pair { first: PlayerId, second: PlayerId },
    /// Player sits out and is credited a bye
    Bye { player: PlayerId },
}

impl PairingEntry {
    pub fn is_bye(&self) -> bool {
        matches!(self, PairingEntry::Bye { .. })
    }

    /// Players appearing in this entry
    pub fn players(&self) -> Vec<PlayerId> {
        match *self {
            PairingEntry::Pair { first, second } => vec![first, second],
            PairingEntry::Bye { player } => vec![player],
        }
    }

    /// Normalized pair for two-player entries
    pub fn as_pair(&self) -> Option<UnorderedPair> {
        match *self {
            PairingEntry::Pair { first, second } => Some(UnorderedPair::new(first, second)),
            PairingEntry::Bye { .. } => None,
        }
    }
}

impl fmt::Display for PairingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingEntry::Pair { first, second } => write!(f, "{first} vs {second}"),
            PairingEntry::Bye { player } => write!(f, "{player} (bye)"),
        }
    }
}
