use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use crate::constants::POINT_VALUES;
use crate::error::{Result, ServiceError};

/// A ballot: point value -> act id.
///
/// Serialized as a JSON object keyed by the point value (`{"12": "se", ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteMap(BTreeMap<u8, String>);

impl VoteMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, points: u8, act_id: impl Into<String>) -> Option<String> {
        self.0.insert(points, act_id.into())
    }

    pub fn get(&self, points: u8) -> Option<&str> {
        self.0.get(&points).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// (points, act id) pairs, lowest points first
    pub fn awards(&self) -> impl Iterator<Item = (u8, &str)> {
        self.0.iter().map(|(points, act_id)| (*points, act_id.as_str()))
    }

    pub fn act_ids(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// Check the ballot shape: exactly the ten scoring values, each mapped to a
    /// distinct non-blank act id.
    pub fn validate_shape(&self) -> Result<()> {
        if self.0.len() != POINT_VALUES.len() {
            return Err(ServiceError::InvalidVotes(format!(
                "exactly {} votes required, got {}",
                POINT_VALUES.len(),
                self.0.len()
            )));
        }

        for points in POINT_VALUES {
            match self.0.get(&points) {
                None => {
                    return Err(ServiceError::InvalidVotes(format!(
                        "missing vote for point value {points}"
                    )))
                }
                Some(act_id) if act_id.trim().is_empty() => {
                    return Err(ServiceError::InvalidVotes(format!(
                        "act id is required for points {points}"
                    )))
                }
                Some(_) => {}
            }
        }

        let mut seen = HashSet::with_capacity(self.0.len());
        for (points, act_id) in &self.0 {
            if !seen.insert(act_id.as_str()) {
                return Err(ServiceError::InvalidVotes(format!(
                    "duplicate act id {act_id:?} for points {points}"
                )));
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate_shape().is_ok()
    }
}

impl FromIterator<(u8, String)> for VoteMap {
    fn from_iter<I: IntoIterator<Item = (u8, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<BTreeMap<u8, String>> for VoteMap {
    fn from(map: BTreeMap<u8, String>) -> Self {
        Self(map)
    }
}

/// One guest's ballot within one party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub party_id: Uuid,
    pub votes: VoteMap,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn new(guest_id: Uuid, party_id: Uuid, votes: VoteMap) -> Self {
        Self {
            id: Uuid::new_v4(),
            guest_id,
            party_id,
            votes,
            created_at: Utc::now(),
        }
    }
}

/// Input for submitting or replacing a ballot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    pub guest_id: Uuid,
    pub votes: VoteMap,
}
