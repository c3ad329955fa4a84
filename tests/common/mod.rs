#![allow(dead_code)] // Each test binary uses a different subset of the helpers

pub mod builders;
pub mod interleaving;
pub mod strategies;

#[allow(unused_imports)]
pub use builders::*;

use std::sync::Arc;
use vote_party_core::catalog::JsonActCatalog;
use vote_party_core::constants::POINT_VALUES;
use vote_party_core::models::{Act, EventType, VoteMap};
use vote_party_core::VotePartySystem;

pub const ADMIN: &str = "admin-1";
pub const OTHER_ADMIN: &str = "admin-2";

/// Number of fixture acts per show
pub fn act_count(event_type: EventType) -> u32 {
    match event_type {
        EventType::Semifinal1 | EventType::Semifinal2 => 10,
        EventType::Grandfinal => 12,
    }
}

pub fn act_id(event_type: EventType, running_order: u32) -> String {
    let prefix = match event_type {
        EventType::Semifinal1 => "sf1",
        EventType::Semifinal2 => "sf2",
        EventType::Grandfinal => "gf",
    };
    format!("{prefix}-{running_order}")
}

pub fn fixture_acts() -> Vec<Act> {
    EventType::ALL
        .into_iter()
        .flat_map(|event_type| {
            (1..=act_count(event_type)).map(move |running_order| Act {
                id: act_id(event_type, running_order),
                country: format!("Country {running_order}"),
                artist: format!("Artist {running_order}"),
                song: format!("Song {running_order}"),
                running_order,
                event_type,
            })
        })
        .collect()
}

pub fn fixture_catalog() -> Arc<JsonActCatalog> {
    Arc::new(JsonActCatalog::from_acts(fixture_acts()).expect("fixture catalog is valid"))
}

pub fn in_memory_system() -> VotePartySystem {
    VotePartySystem::in_memory(fixture_catalog())
}

/// Ballot over acts `first..first+9` of the show (wrapping), 12 points to `first`
pub fn ballot(event_type: EventType, first: u32) -> VoteMap {
    let count = act_count(event_type);
    POINT_VALUES
        .iter()
        .enumerate()
        .map(|(offset, points)| {
            let running_order = (first - 1 + offset as u32) % count + 1;
            (*points, act_id(event_type, running_order))
        })
        .collect()
}
