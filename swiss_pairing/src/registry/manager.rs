//! In-memory tournament registry.
//!
//! Holds players, tournaments, entrants and match records, and runs the
//! standings and pairing core over them. All state lives in the struct; there
//! is no global registry.

use super::errors::{RegistryError, RegistryResult};
use super::models::{Player, Tournament};
use crate::tournament::{
    Entrant, MatchId, MatchRecord, MatchResult, PairingEntry, PairingOptions, PlayedPairs,
    PlayerId, Standing, TournamentId, TournamentSnapshot, UnorderedPair,
};
use chrono::Utc;
use std::collections::BTreeMap;

/// Tournament registry
#[derive(Debug, Clone, Default)]
pub struct TournamentRegistry {
    players: BTreeMap<PlayerId, Player>,
    tournaments: BTreeMap<TournamentId, Tournament>,
    /// Entrants in registration order
    entrants: Vec<Entrant>,
    matches: Vec<MatchRecord>,
    /// Pairs handed out by `pair_next_round` and not yet reported
    pending: BTreeMap<TournamentId, Vec<UnorderedPair>>,
    pairing_options: PairingOptions,
    last_player_id: PlayerId,
    last_tournament_id: TournamentId,
    last_match_id: MatchId,
}

fn next_id(last: &mut i64) -> i64 {
    *last += 1;
    *last
}

impl TournamentRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with explicit pairing limits
    pub fn with_pairing_options(pairing_options: PairingOptions) -> Self {
        Self {
            pairing_options,
            ..Self::default()
        }
    }

    /// Register a player
    ///
    /// # Returns
    ///
    /// * `PlayerId` - ID of the new player
    pub fn register_player(&mut self, name: impl Into<String>) -> PlayerId {
        let id = next_id(&mut self.last_player_id);
        let name = name.into();
        log::info!("Registered player {id} ({name})");
        self.players.insert(
            id,
            Player {
                id,
                name,
                registered_at: Utc::now(),
            },
        );
        id
    }

    /// Change a player's display name
    pub fn rename_player(&mut self, id: PlayerId, name: impl Into<String>) -> RegistryResult<()> {
        let player = self
            .players
            .get_mut(&id)
            .ok_or(RegistryError::PlayerNotFound(id))?;
        player.name = name.into();
        Ok(())
    }

    /// Get a player by ID
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Count all registered players
    pub fn count_players(&self) -> usize {
        self.players.len()
    }

    /// Delete every player, together with their entries and matches
    ///
    /// # Returns
    ///
    /// * `usize` - Number of players deleted
    pub fn delete_players(&mut self) -> usize {
        let deleted = self.players.len();
        self.players.clear();
        self.entrants.clear();
        self.matches.clear();
        self.pending.clear();
        log::info!("Deleted {deleted} players");
        deleted
    }

    /// Delete every match record and reset bye usage
    ///
    /// # Returns
    ///
    /// * `usize` - Number of match records deleted
    pub fn delete_matches(&mut self) -> usize {
        let deleted = self.matches.len();
        self.matches.clear();
        self.pending.clear();
        for entrant in &mut self.entrants {
            entrant.used_bye = false;
        }
        log::info!("Deleted {deleted} match records");
        deleted
    }

    /// Register a tournament
    ///
    /// # Arguments
    ///
    /// * `name` - Tournament name
    /// * `declared_players` - Number of entrants the tournament accepts
    pub fn register_tournament(
        &mut self,
        name: impl Into<String>,
        declared_players: usize,
    ) -> TournamentId {
        let id = next_id(&mut self.last_tournament_id);
        let name = name.into();
        log::info!("Created tournament {id} ({name}) for {declared_players} players");
        self.tournaments.insert(
            id,
            Tournament {
                id,
                name,
                declared_players,
                created_at: Utc::now(),
            },
        );
        id
    }

    /// Get a tournament by ID
    pub fn tournament(&self, id: TournamentId) -> Option<&Tournament> {
        self.tournaments.get(&id)
    }

    /// Enter a player into a tournament
    pub fn register_entrant(
        &mut self,
        player: PlayerId,
        tournament: TournamentId,
    ) -> RegistryResult<()> {
        if !self.players.contains_key(&player) {
            return Err(RegistryError::PlayerNotFound(player));
        }
        let declared = self.tournament_record(tournament)?.declared_players;

        let mut entered = 0;
        for entrant in self.entrants.iter().filter(|e| e.tournament == tournament) {
            if entrant.player == player {
                return Err(RegistryError::AlreadyRegistered { player, tournament });
            }
            entered += 1;
        }
        if entered >= declared {
            return Err(RegistryError::TournamentFull { declared });
        }

        self.entrants.push(Entrant::new(player, tournament));
        Ok(())
    }

    /// Entrants of a tournament in registration order
    pub fn entrants(&self, tournament: TournamentId) -> Vec<Entrant> {
        self.entrants
            .iter()
            .filter(|e| e.tournament == tournament)
            .copied()
            .collect()
    }

    /// Match records of a tournament in reporting order
    pub fn matches(&self, tournament: TournamentId) -> Vec<MatchRecord> {
        self.matches
            .iter()
            .filter(|m| m.tournament == tournament)
            .copied()
            .collect()
    }

    /// Record the outcome of a game between two entrants
    ///
    /// Both sides are stored under one match ID: win and loss, or two ties.
    ///
    /// # Returns
    ///
    /// * `MatchId` - ID shared by both records
    pub fn report_match(
        &mut self,
        tournament: TournamentId,
        winner: PlayerId,
        loser: PlayerId,
        tie: bool,
    ) -> RegistryResult<MatchId> {
        self.tournament_record(tournament)?;
        if winner == loser {
            return Err(RegistryError::SamePlayer(winner));
        }
        self.entrant_slot(winner, tournament)?;
        self.entrant_slot(loser, tournament)?;

        let pair = UnorderedPair::new(winner, loser);
        if self.played_pairs_unchecked(tournament).contains(&pair) {
            return Err(RegistryError::Rematch {
                first: pair.low(),
                second: pair.high(),
            });
        }

        let (winner_result, loser_result) = if tie {
            (MatchResult::Tie, MatchResult::Tie)
        } else {
            (MatchResult::Win, MatchResult::Loss)
        };

        let match_id = next_id(&mut self.last_match_id);
        self.matches.push(MatchRecord::new(
            match_id,
            winner,
            tournament,
            winner_result,
        ));
        self.matches
            .push(MatchRecord::new(match_id, loser, tournament, loser_result));
        if let Some(pending) = self.pending.get_mut(&tournament) {
            pending.retain(|&p| p != pair);
            if pending.is_empty() {
                self.pending.remove(&tournament);
            }
        }

        log::debug!(
            "Match {match_id} in tournament {tournament}: {winner} {winner_result} vs {loser}"
        );
        Ok(match_id)
    }

    /// Record a bye for an entrant
    ///
    /// # Returns
    ///
    /// * `MatchId` - ID of the bye record
    pub fn report_bye(
        &mut self,
        tournament: TournamentId,
        player: PlayerId,
    ) -> RegistryResult<MatchId> {
        self.tournament_record(tournament)?;
        let slot = self.entrant_slot(player, tournament)?;
        let entrant = &mut self.entrants[slot];
        if entrant.used_bye {
            return Err(RegistryError::ByeAlreadyUsed(player));
        }
        entrant.used_bye = true;

        let match_id = next_id(&mut self.last_match_id);
        self.matches.push(MatchRecord::new(
            match_id,
            player,
            tournament,
            MatchResult::Bye,
        ));

        log::debug!("Bye {match_id} in tournament {tournament} for player {player}");
        Ok(match_id)
    }

    /// Current standings of a tournament
    pub fn standings(&self, tournament: TournamentId) -> RegistryResult<Vec<Standing>> {
        Ok(self.snapshot(tournament)?.standings)
    }

    /// Opponent pairs already contested in a tournament
    pub fn played_pairs(&self, tournament: TournamentId) -> RegistryResult<PlayedPairs> {
        self.tournament_record(tournament)?;
        Ok(self.played_pairs_unchecked(tournament))
    }

    /// Fresh snapshot of a tournament, recomputed from the full history
    pub fn snapshot(&self, tournament: TournamentId) -> RegistryResult<TournamentSnapshot> {
        self.tournament_record(tournament)?;
        let history = self.matches(tournament);
        let entrants = self.entrants(tournament);
        Ok(TournamentSnapshot::from_history(&history, &entrants)?)
    }

    /// Pair the next round of a tournament
    ///
    /// The bye, if any, is recorded immediately; the returned pairs are left
    /// for the caller to play and report. Pairing again fails with
    /// `RoundInProgress` until every returned pair has been reported.
    pub fn pair_next_round(
        &mut self,
        tournament: TournamentId,
    ) -> RegistryResult<Vec<PairingEntry>> {
        let snapshot = self.snapshot(tournament)?;
        if let Some(pending) = self.pending.get(&tournament) {
            return Err(RegistryError::RoundInProgress {
                tournament,
                unreported: pending.len(),
            });
        }
        let pairings = snapshot.pair_next_round_with(&self.pairing_options)?;

        for entry in &pairings {
            if let PairingEntry::Bye { player } = *entry {
                self.report_bye(tournament, player)?;
            }
        }

        let handed_out: Vec<UnorderedPair> =
            pairings.iter().filter_map(PairingEntry::as_pair).collect();
        if !handed_out.is_empty() {
            self.pending.insert(tournament, handed_out);
        }

        log::info!(
            "Paired round {} of tournament {tournament}: {} entries",
            snapshot.round,
            pairings.len()
        );
        Ok(pairings)
    }

    fn tournament_record(&self, id: TournamentId) -> RegistryResult<&Tournament> {
        self.tournaments
            .get(&id)
            .ok_or(RegistryError::TournamentNotFound(id))
    }

    fn entrant_slot(&self, player: PlayerId, tournament: TournamentId) -> RegistryResult<usize> {
        self.entrants
            .iter()
            .position(|e| e.player == player && e.tournament == tournament)
            .ok_or(RegistryError::NotRegistered { player, tournament })
    }

    fn played_pairs_unchecked(&self, tournament: TournamentId) -> PlayedPairs {
        crate::tournament::played_pairs(&self.matches(tournament))
    }
}
