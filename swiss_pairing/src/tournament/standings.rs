//! Standings aggregation over a tournament's match history.
//!
//! Standings are always derived from the full history on every call so the
//! OMW tie-break never goes stale between rounds.

use super::errors::{HistoryDefect, SwissResult};
use super::models::{
    Entrant, MatchId, MatchRecord, MatchResult, PlayedPairs, PlayerId, Points, Standing,
    TournamentId, UnorderedPair,
};
use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, HashMap};

#[derive(Debug, Clone, Default)]
struct Tally {
    wins: Points,
    matches: u32,
    used_bye: bool,
    /// Entrant indices of distinct opponents
    opponents: BTreeSet<usize>,
}

/// Compute ranked standings for a tournament.
///
/// Wins count 1, byes 1, ties 0.5 and losses 0. OMW is the sum of the current
/// win totals of every distinct opponent; byes contribute no opponent.
///
/// # Arguments
///
/// * `history` - Every match record of the tournament
/// * `entrants` - Entrants in registration order
///
/// # Returns
///
/// * `Vec<Standing>` - Sorted by wins, then OMW (both descending), then entrant order
///
/// # Errors
///
/// Returns `SwissError::InvalidHistory` if a record references a player that is
/// not an entrant of the tournament, or if the records of a match are malformed.
pub fn compute_standings(
    history: &[MatchRecord],
    entrants: &[Entrant],
) -> SwissResult<Vec<Standing>> {
    let (tournament, index) = index_entrants(entrants)?;

    let mut tallies = vec![Tally::default(); entrants.len()];
    for (slot, entrant) in tallies.iter_mut().zip(entrants) {
        slot.used_bye = entrant.used_bye;
    }

    for record in history {
        let slot = lookup(&index, tournament, record)?;
        let tally = &mut tallies[slot];
        tally.wins += record.result.points();
        tally.matches += 1;
        if record.result == MatchResult::Bye {
            tally.used_bye = true;
        }
    }

    for (match_id, sides) in group_by_match(history) {
        if let Some([first, second]) = check_match(match_id, &sides)? {
            let first = lookup(&index, tournament, first)?;
            let second = lookup(&index, tournament, second)?;
            tallies[first].opponents.insert(second);
            tallies[second].opponents.insert(first);
        }
    }

    let mut standings: Vec<Standing> = entrants
        .iter()
        .zip(&tallies)
        .map(|(entrant, tally)| Standing {
            player: entrant.player,
            wins: tally.wins,
            matches: tally.matches,
            omw: tally.opponents.iter().map(|&o| tallies[o].wins).sum(),
            used_bye: tally.used_bye,
        })
        .collect();

    // Stable sort keeps entrant order for full ties
    standings.sort_by_key(|s| (Reverse(s.wins), Reverse(s.omw)));

    log::debug!(
        "Computed standings for {} entrants from {} match records",
        standings.len(),
        history.len()
    );

    Ok(standings)
}

/// Collect the unordered opponent pairs contested in `history`.
///
/// Byes and malformed matches contribute nothing.
pub fn played_pairs(history: &[MatchRecord]) -> PlayedPairs {
    group_by_match(history)
        .into_values()
        .filter_map(|sides| match sides.as_slice() {
            [first, second] if first.player != second.player => {
                Some(UnorderedPair::new(first.player, second.player))
            }
            _ => None,
        })
        .collect()
}

fn index_entrants(
    entrants: &[Entrant],
) -> SwissResult<(Option<TournamentId>, HashMap<PlayerId, usize>)> {
    let tournament = entrants.first().map(|e| e.tournament);
    let mut index = HashMap::with_capacity(entrants.len());

    for (slot, entrant) in entrants.iter().enumerate() {
        if let Some(first) = tournament.filter(|&t| t != entrant.tournament) {
            return Err(HistoryDefect::MixedTournaments {
                first,
                second: entrant.tournament,
            }
            .into());
        }
        if index.insert(entrant.player, slot).is_some() {
            return Err(HistoryDefect::DuplicateEntrant {
                player: entrant.player,
            }
            .into());
        }
    }

    Ok((tournament, index))
}

fn lookup(
    index: &HashMap<PlayerId, usize>,
    tournament: Option<TournamentId>,
    record: &MatchRecord,
) -> SwissResult<usize> {
    index
        .get(&record.player)
        .copied()
        .filter(|_| tournament == Some(record.tournament))
        .ok_or_else(|| {
            HistoryDefect::UnknownEntrant {
                match_id: record.match_id,
                player: record.player,
                tournament: record.tournament,
            }
            .into()
        })
}

fn group_by_match(history: &[MatchRecord]) -> BTreeMap<MatchId, Vec<&MatchRecord>> {
    let mut matches: BTreeMap<MatchId, Vec<&MatchRecord>> = BTreeMap::new();
    for record in history {
        matches.entry(record.match_id).or_default().push(record);
    }
    matches
}

/// Validate the records of one match, returning them when it is a played game
fn check_match<'a>(
    match_id: MatchId,
    sides: &[&'a MatchRecord],
) -> SwissResult<Option<[&'a MatchRecord; 2]>> {
    match *sides {
        [single] if single.result == MatchResult::Bye => Ok(None),
        [_] => Err(HistoryDefect::MissingOpponent { match_id }.into()),
        [first, second] => {
            if first.result == MatchResult::Bye || second.result == MatchResult::Bye {
                return Err(HistoryDefect::ByeWithOpponent { match_id }.into());
            }
            if first.player == second.player {
                return Err(HistoryDefect::SelfMatch {
                    match_id,
                    player: first.player,
                }
                .into());
            }
            if !first.result.complements(second.result) {
                return Err(HistoryDefect::InconsistentResults { match_id }.into());
            }
            Ok(Some([first, second]))
        }
        _ => Err(HistoryDefect::OverfullMatch { match_id }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::errors::SwissError;

    const T: TournamentId = 1;

    fn entrants(players: &[PlayerId]) -> Vec<Entrant> {
        players.iter().map(|&p| Entrant::new(p, T)).collect()
    }

    fn game(match_id: MatchId, winner: PlayerId, loser: PlayerId) -> [MatchRecord; 2] {
        [
            MatchRecord::new(match_id, winner, T, MatchResult::Win),
            MatchRecord::new(match_id, loser, T, MatchResult::Loss),
        ]
    }

    fn order(standings: &[Standing]) -> Vec<PlayerId> {
        standings.iter().map(|s| s.player).collect()
    }

    #[test]
    fn test_no_history_keeps_entrant_order() {
        let standings = compute_standings(&[], &entrants(&[3, 1, 2])).unwrap();
        assert_eq!(order(&standings), vec![3, 1, 2]);
        assert!(standings.iter().all(|s| s.wins == Points::ZERO && s.matches == 0));
    }

    #[test]
    fn test_empty_entrants() {
        assert!(compute_standings(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_wins_and_matches() {
        let mut history = Vec::new();
        history.extend(game(1, 2, 1));
        history.extend(game(2, 3, 4));
        let standings = compute_standings(&history, &entrants(&[1, 2, 3, 4])).unwrap();

        assert_eq!(order(&standings), vec![2, 3, 1, 4]);
        assert_eq!(standings[0].wins, Points::ONE);
        assert_eq!(standings[0].matches, 1);
        assert_eq!(standings[2].wins, Points::ZERO);
        assert_eq!(standings[2].matches, 1);
    }

    #[test]
    fn test_tie_counts_half() {
        let history = [
            MatchRecord::new(1, 1, T, MatchResult::Tie),
            MatchRecord::new(1, 2, T, MatchResult::Tie),
        ];
        let standings = compute_standings(&history, &entrants(&[1, 2])).unwrap();
        assert!(standings.iter().all(|s| s.wins == Points::HALF));
        assert!(standings.iter().all(|s| s.omw == Points::HALF));
    }

    #[test]
    fn test_bye_counts_as_win_and_sets_flag() {
        let history = [MatchRecord::new(1, 2, T, MatchResult::Bye)];
        let standings = compute_standings(&history, &entrants(&[1, 2])).unwrap();

        assert_eq!(standings[0].player, 2);
        assert_eq!(standings[0].wins, Points::ONE);
        assert_eq!(standings[0].matches, 1);
        assert!(standings[0].used_bye);
        assert_eq!(standings[0].omw, Points::ZERO);
        assert!(!standings[1].used_bye);
    }

    #[test]
    fn test_entrant_bye_flag_carries_over() {
        let list = vec![Entrant::new(1, T).with_bye_used(), Entrant::new(2, T)];
        let standings = compute_standings(&[], &list).unwrap();
        assert!(standings[0].used_bye);
        assert!(!standings[1].used_bye);
    }

    #[test]
    fn test_omw_breaks_ties() {
        // 1 beats 2, 3 beats 4, then 2 beats 4: 1, 2 and 3 all on one win,
        // but 3's only opponent never won.
        let mut history = Vec::new();
        history.extend(game(1, 1, 2));
        history.extend(game(2, 3, 4));
        history.extend(game(3, 2, 4));
        let standings = compute_standings(&history, &entrants(&[3, 1, 2, 4])).unwrap();

        assert_eq!(order(&standings), vec![1, 2, 3, 4]);
        assert_eq!(standings[0].omw, Points::ONE);
        assert_eq!(standings[1].omw, Points::ONE);
        assert_eq!(standings[2].omw, Points::ZERO);
    }

    #[test]
    fn test_omw_uses_current_totals() {
        let mut history = Vec::new();
        history.extend(game(1, 1, 2));
        history.extend(game(2, 2, 3));
        history.extend(game(3, 2, 4));
        let standings = compute_standings(&history, &entrants(&[1, 2, 3, 4])).unwrap();
        let first = standings.iter().find(|s| s.player == 1).unwrap();
        assert_eq!(first.omw, Points::from_halves(4));
    }

    #[test]
    fn test_unknown_player() {
        let history = game(1, 1, 9);
        let err = compute_standings(&history, &entrants(&[1, 2])).unwrap_err();
        assert_eq!(
            err,
            SwissError::InvalidHistory(HistoryDefect::UnknownEntrant {
                match_id: 1,
                player: 9,
                tournament: T,
            })
        );
    }

    #[test]
    fn test_unknown_tournament() {
        let history = [
            MatchRecord::new(1, 1, 2, MatchResult::Win),
            MatchRecord::new(1, 2, 2, MatchResult::Loss),
        ];
        let err = compute_standings(&history, &entrants(&[1, 2])).unwrap_err();
        assert!(matches!(
            err,
            SwissError::InvalidHistory(HistoryDefect::UnknownEntrant { tournament: 2, .. })
        ));
    }

    #[test]
    fn test_history_without_entrants() {
        let history = [MatchRecord::new(1, 1, T, MatchResult::Bye)];
        assert!(compute_standings(&history, &[]).is_err());
    }

    #[test]
    fn test_duplicate_and_mixed_entrants() {
        let duplicate = vec![Entrant::new(1, T), Entrant::new(1, T)];
        assert_eq!(
            compute_standings(&[], &duplicate).unwrap_err(),
            SwissError::InvalidHistory(HistoryDefect::DuplicateEntrant { player: 1 })
        );

        let mixed = vec![Entrant::new(1, T), Entrant::new(2, 5)];
        assert_eq!(
            compute_standings(&[], &mixed).unwrap_err(),
            SwissError::InvalidHistory(HistoryDefect::MixedTournaments {
                first: T,
                second: 5
            })
        );
    }

    #[test]
    fn test_malformed_matches() {
        let list = entrants(&[1, 2, 3]);

        let lone_win = [MatchRecord::new(1, 1, T, MatchResult::Win)];
        assert_eq!(
            compute_standings(&lone_win, &list).unwrap_err(),
            SwissError::InvalidHistory(HistoryDefect::MissingOpponent { match_id: 1 })
        );

        let mut overfull = game(2, 1, 2).to_vec();
        overfull.push(MatchRecord::new(2, 3, T, MatchResult::Loss));
        assert_eq!(
            compute_standings(&overfull, &list).unwrap_err(),
            SwissError::InvalidHistory(HistoryDefect::OverfullMatch { match_id: 2 })
        );

        let self_match = game(3, 1, 1);
        assert_eq!(
            compute_standings(&self_match, &list).unwrap_err(),
            SwissError::InvalidHistory(HistoryDefect::SelfMatch {
                match_id: 3,
                player: 1
            })
        );

        let bye_pair = [
            MatchRecord::new(4, 1, T, MatchResult::Bye),
            MatchRecord::new(4, 2, T, MatchResult::Loss),
        ];
        assert_eq!(
            compute_standings(&bye_pair, &list).unwrap_err(),
            SwissError::InvalidHistory(HistoryDefect::ByeWithOpponent { match_id: 4 })
        );

        let two_winners = [
            MatchRecord::new(5, 1, T, MatchResult::Win),
            MatchRecord::new(5, 2, T, MatchResult::Win),
        ];
        assert_eq!(
            compute_standings(&two_winners, &list).unwrap_err(),
            SwissError::InvalidHistory(HistoryDefect::InconsistentResults { match_id: 5 })
        );
    }

    #[test]
    fn test_deterministic() {
        let mut history = Vec::new();
        history.extend(game(1, 1, 2));
        history.extend(game(2, 3, 4));
        history.extend(game(3, 5, 6));
        let list = entrants(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(
            compute_standings(&history, &list).unwrap(),
            compute_standings(&history, &list).unwrap()
        );
    }

    #[test]
    fn test_played_pairs() {
        let mut history = Vec::new();
        history.extend(game(1, 2, 1));
        history.extend(game(2, 3, 4));
        history.push(MatchRecord::new(3, 5, T, MatchResult::Bye));
        let played = played_pairs(&history);

        assert_eq!(played.len(), 2);
        assert!(played.contains(&UnorderedPair::new(1, 2)));
        assert!(played.contains(&UnorderedPair::new(4, 3)));
    }
}
