//! Swiss pairing engine.
//!
//! Pairs adjacent ranks greedily, strongest first, and backtracks through an
//! explicit decision stack when a player has already met every remaining
//! opponent. A decision that leaves some unpaired player without a legal
//! opponent is undone at once. Candidate comparisons are capped at O(n²);
//! when the cap is hit the pool is settled by a maximum matching instead, so
//! `NoValidPairing` always means no rematch-free pairing exists.

use super::errors::{SwissError, SwissResult};
use super::matching::maximum_matching;
use super::models::{PairingEntry, PlayedPairs, PlayerId, Standing, UnorderedPair};
use serde::{Deserialize, Serialize};

/// Default multiplier for the comparison budget
pub const DEFAULT_COMPARISON_BUDGET_FACTOR: usize = 8;

/// Pairing engine limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingOptions {
    /// Ranked search budget is `factor * n * n` comparisons for a pool of `n`
    /// players
    pub comparison_budget_factor: usize,
}

impl PairingOptions {
    /// Maximum candidate comparisons allowed for a pool of `pool_size` players
    pub fn comparison_budget(&self, pool_size: usize) -> usize {
        self.comparison_budget_factor
            .saturating_mul(pool_size.saturating_mul(pool_size).max(1))
    }
}

impl Default for PairingOptions {
    fn default() -> Self {
        Self {
            comparison_budget_factor: DEFAULT_COMPARISON_BUDGET_FACTOR,
        }
    }
}

/// Pair the next round with default options.
///
/// See [`pair_round_with`].
pub fn pair_round(
    standings: &[Standing],
    played: &PlayedPairs,
) -> SwissResult<Vec<PairingEntry>> {
    pair_round_with(standings, played, &PairingOptions::default())
}

/// Pair the next round.
///
/// # Arguments
///
/// * `standings` - Ranked standings, strongest first
/// * `played` - Opponent pairs already contested in this tournament
/// * `options` - Search limits
///
/// # Returns
///
/// * `Vec<PairingEntry>` - Pairs ordered by the rank of their higher-ranked
///   member, followed by the bye when the player count is odd
///
/// # Errors
///
/// * `SwissError::NoEligibleByeCandidate` - Odd player count and every player
///   has already received a bye
/// * `SwissError::NoValidPairing` - No rematch-free pairing of the remaining
///   players exists
pub fn pair_round_with(
    standings: &[Standing],
    played: &PlayedPairs,
    options: &PairingOptions,
) -> SwissResult<Vec<PairingEntry>> {
    let mut pool: Vec<PlayerId> = standings.iter().map(|s| s.player).collect();

    let bye = if pool.len() % 2 == 1 {
        let slot = select_bye(standings)?;
        log::debug!("Player {} receives the bye", pool[slot]);
        Some(pool.remove(slot))
    } else {
        None
    };

    let mut pairings = match_pool(&pool, played, options)?;
    if let Some(player) = bye {
        pairings.push(PairingEntry::Bye { player });
    }

    Ok(pairings)
}

/// Lowest-ranked player who has not used a bye
fn select_bye(standings: &[Standing]) -> SwissResult<usize> {
    standings
        .iter()
        .rposition(|s| !s.used_bye)
        .ok_or(SwissError::NoEligibleByeCandidate {
            players: standings.len(),
        })
}

/// Pairing decision: pool slots of the paired players
#[derive(Debug, Clone, Copy)]
struct Decision {
    player: usize,
    opponent: usize,
}

fn match_pool(
    pool: &[PlayerId],
    played: &PlayedPairs,
    options: &PairingOptions,
) -> SwissResult<Vec<PairingEntry>> {
    let size = pool.len();
    let no_pairing = || SwissError::NoValidPairing { players: size };
    let has_played = |a: usize, b: usize| played.contains(&UnorderedPair::new(pool[a], pool[b]));
    // Unpaired player with no unpaired opponent left to meet
    let stranded = |paired: &[bool]| {
        (0..size).find(|&a| {
            !paired[a] && (0..size).all(|b| a == b || paired[b] || has_played(a, b))
        })
    };

    if let Some(stuck) = stranded(&vec![false; size]) {
        log::warn!(
            "Player {} has already played every remaining opponent",
            pool[stuck]
        );
        return Err(no_pairing());
    }

    let budget = options.comparison_budget(size);
    let mut comparisons = 0usize;
    let mut paired = vec![false; size];
    let mut decisions: Vec<Decision> = Vec::with_capacity(size / 2);
    let mut retry: Option<Decision> = None;

    loop {
        let (player, first_candidate) = match retry.take() {
            Some(undone) => (undone.player, undone.opponent + 1),
            None => match paired.iter().position(|&p| !p) {
                Some(player) => (player, player + 1),
                None => break,
            },
        };

        let mut opponent = None;
        for candidate in first_candidate..size {
            if paired[candidate] {
                continue;
            }
            comparisons += 1;
            if comparisons > budget {
                log::debug!(
                    "Pairing search for {size} players exhausted its budget of {budget} comparisons"
                );
                return exact_pairing(pool, &has_played);
            }
            if !has_played(player, candidate) {
                opponent = Some(candidate);
                break;
            }
        }

        match opponent {
            Some(opponent) => {
                let decision = Decision { player, opponent };
                paired[player] = true;
                paired[opponent] = true;
                match stranded(&paired) {
                    None => decisions.push(decision),
                    Some(left) => {
                        log::trace!(
                            "Pairing {} with {} strands {}",
                            pool[player],
                            pool[opponent],
                            pool[left]
                        );
                        paired[player] = false;
                        paired[opponent] = false;
                        retry = Some(decision);
                    }
                }
            }
            None => {
                let Some(undone) = decisions.pop() else {
                    log::warn!("No rematch-free pairing exists for {size} players");
                    return Err(no_pairing());
                };
                log::debug!(
                    "Backtracking: unpairing {} and {}",
                    pool[undone.player],
                    pool[undone.opponent]
                );
                paired[undone.player] = false;
                paired[undone.opponent] = false;
                retry = Some(undone);
            }
        }
    }

    Ok(to_entries(pool, decisions))
}

/// Settle the pool with a maximum matching once the ranked search gives up
fn exact_pairing(
    pool: &[PlayerId],
    has_played: impl Fn(usize, usize) -> bool,
) -> SwissResult<Vec<PairingEntry>> {
    let mate = maximum_matching(pool.len(), |a, b| !has_played(a, b));

    let mut decisions = Vec::with_capacity(pool.len() / 2);
    for (player, partner) in mate.into_iter().enumerate() {
        match partner {
            Some(opponent) if opponent > player => decisions.push(Decision { player, opponent }),
            Some(_) => {}
            None => {
                log::warn!("No rematch-free pairing exists for {} players", pool.len());
                return Err(SwissError::NoValidPairing {
                    players: pool.len(),
                });
            }
        }
    }

    Ok(to_entries(pool, decisions))
}

fn to_entries(pool: &[PlayerId], decisions: Vec<Decision>) -> Vec<PairingEntry> {
    decisions
        .into_iter()
        .map(|d| PairingEntry::Pair {
            first: pool[d.player],
            second: pool[d.opponent],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standings(players: &[PlayerId]) -> Vec<Standing> {
        players.iter().map(|&p| Standing::fresh(p)).collect()
    }

    fn played(pairs: &[(PlayerId, PlayerId)]) -> PlayedPairs {
        pairs.iter().map(|&(a, b)| UnorderedPair::new(a, b)).collect()
    }

    fn pair(first: PlayerId, second: PlayerId) -> PairingEntry {
        PairingEntry::Pair { first, second }
    }

    #[test]
    fn test_empty_pool() {
        assert!(pair_round(&[], &PlayedPairs::new()).unwrap().is_empty());
    }

    #[test]
    fn test_single_player_gets_bye() {
        let result = pair_round(&standings(&[1]), &PlayedPairs::new()).unwrap();
        assert_eq!(result, vec![PairingEntry::Bye { player: 1 }]);
    }

    #[test]
    fn test_single_player_with_bye_used() {
        let mut list = standings(&[1]);
        list[0].used_bye = true;
        assert_eq!(
            pair_round(&list, &PlayedPairs::new()).unwrap_err(),
            SwissError::NoEligibleByeCandidate { players: 1 }
        );
    }

    #[test]
    fn test_two_players() {
        let result = pair_round(&standings(&[1, 2]), &PlayedPairs::new()).unwrap();
        assert_eq!(result, vec![pair(1, 2)]);
    }

    #[test]
    fn test_adjacent_ranks_paired() {
        let result = pair_round(&standings(&[4, 3, 2, 1]), &PlayedPairs::new()).unwrap();
        assert_eq!(result, vec![pair(4, 3), pair(2, 1)]);
    }

    #[test]
    fn test_skips_played_opponent() {
        let result = pair_round(&standings(&[1, 2, 3, 4]), &played(&[(1, 2)])).unwrap();
        assert_eq!(result, vec![pair(1, 3), pair(2, 4)]);
    }

    #[test]
    fn test_backtracks_when_last_pair_is_rematch() {
        // Greedy gives (1,2) then (3,4), which is a rematch
        let result = pair_round(&standings(&[1, 2, 3, 4]), &played(&[(3, 4)])).unwrap();
        assert_eq!(result, vec![pair(1, 3), pair(2, 4)]);
    }

    #[test]
    fn test_deep_backtrack() {
        // (1,4) then (2,3) strands 5 against 6, so 2 has to move down
        let result = pair_round(
            &standings(&[1, 2, 3, 4, 5, 6]),
            &played(&[(1, 2), (1, 3), (5, 6), (2, 4)]),
        )
        .unwrap();
        assert_eq!(result, vec![pair(1, 4), pair(2, 5), pair(3, 6)]);
    }

    #[test]
    fn test_player_who_met_everyone() {
        let err = pair_round(&standings(&[1, 2, 3, 4]), &played(&[(1, 2), (1, 3), (1, 4)]))
            .unwrap_err();
        assert_eq!(err, SwissError::NoValidPairing { players: 4 });
    }

    #[test]
    fn test_no_perfect_matching() {
        // Every player has an opponent left, but no perfect matching exists
        let err = pair_round(
            &standings(&[1, 2, 3, 4]),
            &played(&[(1, 2), (1, 3), (2, 3)]),
        )
        .unwrap_err();
        assert_eq!(err, SwissError::NoValidPairing { players: 4 });
    }

    #[test]
    fn test_bye_goes_to_lowest_eligible() {
        let mut list = standings(&[1, 2, 3]);
        list[2].used_bye = true;
        let result = pair_round(&list, &PlayedPairs::new()).unwrap();
        assert_eq!(result, vec![pair(1, 3), PairingEntry::Bye { player: 2 }]);
    }

    #[test]
    fn test_prunes_choice_that_strands_a_player() {
        // 12 has met 2..=11, so only 1 is left for them
        let players: Vec<PlayerId> = (1..=12).collect();
        let rematches: Vec<_> = (2..=11).map(|p| (p, 12)).collect();
        let result = pair_round(&standings(&players), &played(&rematches)).unwrap();
        assert_eq!(
            result,
            vec![pair(1, 12), pair(2, 3), pair(4, 5), pair(6, 7), pair(8, 9), pair(10, 11)]
        );
    }

    #[test]
    fn test_exhausted_budget_settles_with_matching() {
        let options = PairingOptions {
            comparison_budget_factor: 0,
        };
        let result = pair_round_with(&standings(&[1, 2]), &PlayedPairs::new(), &options).unwrap();
        assert_eq!(result, vec![pair(1, 2)]);

        let result =
            pair_round_with(&standings(&[1, 2, 3, 4]), &played(&[(1, 2), (1, 3)]), &options)
                .unwrap();
        assert_eq!(result, vec![pair(1, 4), pair(2, 3)]);
    }

    #[test]
    fn test_exhausted_budget_still_reports_impossible_pool() {
        let options = PairingOptions {
            comparison_budget_factor: 0,
        };
        let err = pair_round_with(
            &standings(&[1, 2, 3, 4]),
            &played(&[(1, 2), (1, 3), (2, 3)]),
            &options,
        )
        .unwrap_err();
        assert_eq!(err, SwissError::NoValidPairing { players: 4 });
    }

    #[test]
    fn test_comparison_budget() {
        let options = PairingOptions::default();
        assert_eq!(options.comparison_budget(0), DEFAULT_COMPARISON_BUDGET_FACTOR);
        assert_eq!(options.comparison_budget(4), DEFAULT_COMPARISON_BUDGET_FACTOR * 16);
    }
}
