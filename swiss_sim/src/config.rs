//! Simulator configuration.
//!
//! Provides the settings for a simulated Swiss tournament.

use anyhow::{Result, bail};
use std::env;

/// Simulator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Number of entrants
    pub players: usize,

    /// Rounds to play; `None` plays `ceil(log2(players))` rounds
    pub rounds: Option<usize>,

    /// RNG seed; `None` picks a random seed
    pub seed: Option<u64>,

    /// Probability that a game ends in a tie
    pub tie_rate: f64,

    /// Print the report as JSON
    pub json: bool,
}

impl SimConfig {
    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `SWISS_PLAYERS`: Number of entrants (default: 8)
    /// - `SWISS_ROUNDS`: Rounds to play (default: ceil(log2(players)))
    /// - `SWISS_SEED`: RNG seed (default: random)
    /// - `SWISS_TIE_RATE`: Tie probability (default: 0.1)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            players: parse(&lookup, "SWISS_PLAYERS")?.unwrap_or(defaults.players),
            rounds: parse(&lookup, "SWISS_ROUNDS")?,
            seed: parse(&lookup, "SWISS_SEED")?,
            tie_rate: parse(&lookup, "SWISS_TIE_RATE")?.unwrap_or(defaults.tie_rate),
            json: defaults.json,
        })
    }

    /// Rounds to play
    pub fn rounds(&self) -> usize {
        self.rounds.unwrap_or_else(|| default_rounds(self.players))
    }

    /// Check the configuration can drive a simulation
    pub fn validate(&self) -> Result<()> {
        if self.players == 0 {
            bail!("At least one player is required");
        }
        if !(0.0..=1.0).contains(&self.tie_rate) {
            bail!("Tie rate must be between 0 and 1, got {}", self.tie_rate);
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            players: 8,
            rounds: None,
            seed: None,
            tie_rate: 0.1,
            json: false,
        }
    }
}

/// Rounds needed to find a single undefeated player: `ceil(log2(players))`, at least 1
pub fn default_rounds(players: usize) -> usize {
    if players <= 2 {
        1
    } else {
        (usize::BITS - (players - 1).leading_zeros()) as usize
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => Ok(Some(value)),
            Err(e) => bail!("{key} must be valid: {e}"),
        },
        None => Ok(None),
    }
}
