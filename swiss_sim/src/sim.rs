//! Round-by-round tournament simulation.

use crate::config::SimConfig;
use anyhow::Result;
use rand::Rng;
use serde::Serialize;
use swiss_pairing::{
    PairingEntry, RegistryError, Standing, TournamentRegistry,
    tournament::{PlayerId, TournamentId},
};

/// Pairings played in one round
#[derive(Debug, Clone, Serialize)]
pub struct RoundReport {
    pub round: u32,
    pub pairings: Vec<PairingEntry>,
}

/// Outcome of a simulation
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub rounds: Vec<RoundReport>,
    pub standings: Vec<Standing>,
    /// Why the simulation stopped before the configured round count
    pub stopped_early: Option<String>,
}

/// Simulated tournament
pub struct Simulation {
    registry: TournamentRegistry,
    tournament: TournamentId,
}

impl Simulation {
    /// Register `players` entrants into a fresh tournament
    pub fn new(players: usize) -> Result<Self> {
        let mut registry = TournamentRegistry::new();
        let tournament = registry.register_tournament("Simulated Swiss", players);
        for i in 1..=players {
            let player = registry.register_player(format!("Player {i}"));
            registry.register_entrant(player, tournament)?;
        }
        Ok(Self {
            registry,
            tournament,
        })
    }

    /// Display name of a player
    pub fn name(&self, player: PlayerId) -> String {
        self.registry
            .player(player)
            .map_or_else(|| format!("#{player}"), |p| p.name.clone())
    }

    /// Play the configured number of rounds with random results
    ///
    /// Pairing failures end the simulation early and are kept in the report.
    pub fn run(&mut self, config: &SimConfig, rng: &mut impl Rng) -> Result<SimReport> {
        let mut rounds = Vec::new();
        let mut stopped_early = None;

        for _ in 0..config.rounds() {
            let round = self.registry.snapshot(self.tournament)?.round;
            let pairings = match self.registry.pair_next_round(self.tournament) {
                Ok(pairings) => pairings,
                Err(RegistryError::Swiss(e)) => {
                    log::warn!("Stopping before round {round}: {e}");
                    stopped_early = Some(e.to_string());
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            for entry in &pairings {
                if let PairingEntry::Pair { first, second } = *entry {
                    self.play(first, second, config.tie_rate, rng)?;
                }
            }
            rounds.push(RoundReport { round, pairings });
        }

        Ok(SimReport {
            rounds,
            standings: self.registry.standings(self.tournament)?,
            stopped_early,
        })
    }

    fn play(
        &mut self,
        first: PlayerId,
        second: PlayerId,
        tie_rate: f64,
        rng: &mut impl Rng,
    ) -> Result<()> {
        let tie = rng.random_bool(tie_rate);
        let (winner, loser) = if rng.random_bool(0.5) {
            (first, second)
        } else {
            (second, first)
        };
        self.registry
            .report_match(self.tournament, winner, loser, tie)?;
        Ok(())
    }
}
