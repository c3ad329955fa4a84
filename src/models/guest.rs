use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, ServiceError};
use crate::state_machine::GuestStatus;

/// A participant scoped to exactly one party
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub party_id: Uuid,
    /// Unique within the owning party only
    pub username: String,
    pub status: GuestStatus,
    pub created_at: DateTime<Utc>,
}

impl Guest {
    /// Build a pending join request
    pub fn new(party_id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            party_id,
            username: username.into(),
            status: GuestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(ServiceError::InvalidUsername(
                "username is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn belongs_to(&self, party_id: Uuid) -> bool {
        self.party_id == party_id
    }

    /// Approved member of the given party
    pub fn is_approved_in(&self, party_id: Uuid) -> bool {
        self.belongs_to(party_id) && self.status.may_vote()
    }
}
