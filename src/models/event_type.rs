use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ServiceError;

/// Which show of the contest a party follows. Partitions the act catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Semifinal1,
    Semifinal2,
    Grandfinal,
}

impl EventType {
    pub const ALL: [EventType; 3] = [Self::Semifinal1, Self::Semifinal2, Self::Grandfinal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semifinal1 => "semifinal1",
            Self::Semifinal2 => "semifinal2",
            Self::Grandfinal => "grandfinal",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "semifinal1" => Ok(Self::Semifinal1),
            "semifinal2" => Ok(Self::Semifinal2),
            "grandfinal" => Ok(Self::Grandfinal),
            other => Err(ServiceError::InvalidEventType(other.to_string())),
        }
    }
}
