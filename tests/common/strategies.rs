//! Proptest strategies for ballots and scoreboards.

use proptest::prelude::*;
use vote_party_core::constants::POINT_VALUES;
use vote_party_core::models::VoteMap;

/// Ten distinct act ids drawn from a pool of `pool_size`
pub fn distinct_act_ids(pool_size: usize) -> impl Strategy<Value = Vec<String>> {
    Just((1..=pool_size).map(|i| format!("act-{i}")).collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|ids| ids.into_iter().take(POINT_VALUES.len()).collect())
}

/// Always-valid ballot
pub fn valid_ballot() -> impl Strategy<Value = VoteMap> {
    distinct_act_ids(26).prop_map(|ids| POINT_VALUES.iter().copied().zip(ids).collect())
}

/// Arbitrary key/value maps, valid or not
pub fn arbitrary_ballot() -> impl Strategy<Value = VoteMap> {
    prop::collection::btree_map(0u8..=13, "(act-[1-9]|)", 0..=12).prop_map(VoteMap::from)
}

/// Per-act totals, unordered
pub fn totals() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..60, 0..30)
}
