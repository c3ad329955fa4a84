use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregated outcome for one act within a party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResult {
    pub act_id: String,
    pub country: String,
    pub artist: String,
    pub song: String,
    pub total_points: u32,
    /// Standard competition rank (1, 1, 3, ...)
    pub rank: u32,
}

/// Scoreboard for a closed party. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyResults {
    pub party_id: Uuid,
    pub party_name: String,
    pub total_voters: usize,
    pub results: Vec<VoteResult>,
}

impl PartyResults {
    /// Entries sharing rank 1
    pub fn leaders(&self) -> impl Iterator<Item = &VoteResult> {
        self.results.iter().filter(|result| result.rank == 1)
    }

    pub fn result_for(&self, act_id: &str) -> Option<&VoteResult> {
        self.results.iter().find(|result| result.act_id == act_id)
    }
}
