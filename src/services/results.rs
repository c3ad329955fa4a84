//! Scoreboard aggregation.
//!
//! Pure functions over catalog acts and ballots so the ranking rules can be tested
//! without any store behind them.

use std::collections::HashMap;

use crate::models::{Act, Party, PartyResults, Vote, VoteResult};

/// Sum points per act over all ballots.
///
/// Every act of the slice appears, in slice order, with 0 when nobody awarded it.
/// Points given to ids outside the slice are dropped. Ranks are left at 0.
pub fn tally_points(acts: &[Act], votes: &[Vote]) -> Vec<VoteResult> {
    let mut totals: HashMap<&str, u32> = acts.iter().map(|act| (act.id.as_str(), 0)).collect();

    for vote in votes {
        for (points, act_id) in vote.votes.awards() {
            if let Some(total) = totals.get_mut(act_id) {
                *total += u32::from(points);
            }
        }
    }

    acts.iter()
        .map(|act| VoteResult {
            act_id: act.id.clone(),
            country: act.country.clone(),
            artist: act.artist.clone(),
            song: act.song.clone(),
            total_points: totals.get(act.id.as_str()).copied().unwrap_or(0),
            rank: 0,
        })
        .collect()
}

/// Standard competition ranks for totals already sorted in descending order:
/// equal totals share a rank and the next distinct total skips ahead
/// (`[24, 24, 16, 0]` ranks as `[1, 1, 3, 4]`).
pub fn assign_competition_ranks(sorted_totals: &[u32]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted_totals.len());
    for (index, total) in sorted_totals.iter().enumerate() {
        let rank = match index {
            0 => 1,
            _ if sorted_totals[index - 1] == *total => ranks[index - 1],
            _ => index as u32 + 1,
        };
        ranks.push(rank);
    }
    ranks
}

/// Order by points descending (ties keep their input order) and fill in ranks
pub fn rank_results(mut results: Vec<VoteResult>) -> Vec<VoteResult> {
    results.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    let totals: Vec<u32> = results.iter().map(|r| r.total_points).collect();
    for (result, rank) in results.iter_mut().zip(assign_competition_ranks(&totals)) {
        result.rank = rank;
    }
    results
}

pub fn build_party_results(party: &Party, acts: &[Act], votes: &[Vote]) -> PartyResults {
    PartyResults {
        party_id: party.id,
        party_name: party.name.clone(),
        total_voters: votes.len(),
        results: rank_results(tally_points(acts, votes)),
    }
}
