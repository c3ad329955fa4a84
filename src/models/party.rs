use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::EventType;
use crate::error::{Result, ServiceError};
use crate::state_machine::PartyStatus;

/// A watch party owned by one admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: Uuid,
    pub name: String,
    /// Public join code, unique across every party ever created
    pub code: String,
    pub event_type: EventType,
    pub admin_id: String,
    pub status: PartyStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for party creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyRequest {
    pub name: String,
    pub event_type: EventType,
}

impl CreatePartyRequest {
    pub fn new(name: impl Into<String>, event_type: EventType) -> Self {
        Self {
            name: name.into(),
            event_type,
        }
    }
}

impl Party {
    /// Build a new active party
    pub fn new(admin_id: &str, request: CreatePartyRequest, code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            code,
            event_type: request.event_type,
            admin_id: admin_id.to_string(),
            status: PartyStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation("party name is required".to_string()));
        }
        if self.code.trim().is_empty() {
            return Err(ServiceError::Validation("party code is required".to_string()));
        }
        if self.admin_id.trim().is_empty() {
            return Err(ServiceError::Validation("admin id is required".to_string()));
        }
        Ok(())
    }

    pub fn is_owned_by(&self, admin_id: &str) -> bool {
        self.admin_id == admin_id
    }

    /// Subset of the party that is safe to show to unauthenticated callers
    pub fn public_view(&self) -> PublicPartyView {
        PublicPartyView {
            id: self.id,
            name: self.name.clone(),
            code: self.code.clone(),
            event_type: self.event_type,
            status: self.status,
        }
    }
}

/// Party fields exposed through a code lookup; omits the admin identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPartyView {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub event_type: EventType,
    pub status: PartyStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party() -> Party {
        Party::new(
            "admin-1",
            CreatePartyRequest::new("Watch Party", EventType::Grandfinal),
            "ABC234".to_string(),
        )
    }

    #[test]
    fn test_new_party_is_active() {
        let party = party();
        assert_eq!(party.status, PartyStatus::Active);
        assert!(party.is_owned_by("admin-1"));
        assert!(!party.is_owned_by("admin-2"));
        assert!(party.validate().is_ok());
    }

    #[test]
    fn test_blank_fields_fail_validation() {
        let blank_name = Party {
            name: "  ".to_string(),
            ..party()
        };
        assert_eq!(
            blank_name.validate(),
            Err(ServiceError::Validation("party name is required".to_string()))
        );

        let blank_admin = Party {
            admin_id: String::new(),
            ..party()
        };
        assert!(blank_admin.validate().is_err());
    }

    #[test]
    fn test_public_view_omits_admin() {
        let party = party();
        let view = party.public_view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["code"], "ABC234");
        assert_eq!(json["eventType"], "grandfinal");
        assert!(json.get("adminId").is_none());
    }
}
