use serde::{Deserialize, Serialize};

use super::EventType;
use crate::error::{Result, ServiceError};

/// A competing entry. Reference data loaded from the catalog; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Act {
    pub id: String,
    pub country: String,
    pub artist: String,
    pub song: String,
    pub running_order: u32,
    pub event_type: EventType,
}

impl Act {
    /// Check that the act carries the information needed to present it
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("id", &self.id),
            ("country", &self.country),
            ("artist", &self.artist),
            ("song", &self.song),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ServiceError::Validation(format!("{field} is required")));
            }
        }
        if self.running_order == 0 {
            return Err(ServiceError::Validation(
                "running order must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
