//! Builders that drive the services into a known party state.

use super::{in_memory_system, ADMIN};
use vote_party_core::identity::CallerIdentity;
use vote_party_core::models::{CreatePartyRequest, EventType, Guest, Party, SubmitVoteRequest, VoteMap};
use vote_party_core::{GuestStatus, VotePartySystem};

/// A party with guests in chosen states, built through the public services
pub struct PartyBuilder {
    name: String,
    event_type: EventType,
    admin_id: String,
    guests: Vec<(String, GuestStatus)>,
}

pub struct BuiltParty {
    pub system: VotePartySystem,
    pub party: Party,
    pub guests: Vec<Guest>,
}

impl PartyBuilder {
    pub fn new() -> Self {
        Self {
            name: "Watch Party".to_string(),
            event_type: EventType::Grandfinal,
            admin_id: ADMIN.to_string(),
            guests: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }

    pub fn with_guest(mut self, username: &str, status: GuestStatus) -> Self {
        self.guests.push((username.to_string(), status));
        self
    }

    pub async fn build(self) -> BuiltParty {
        self.build_in(in_memory_system()).await
    }

    pub async fn build_in(self, system: VotePartySystem) -> BuiltParty {
        let party = system
            .parties()
            .create_party(&self.admin_id, CreatePartyRequest::new(self.name, self.event_type))
            .await
            .expect("Failed to create test party");

        let mut guests = Vec::with_capacity(self.guests.len());
        for (username, status) in self.guests {
            let guest = system
                .guests()
                .join_party(&party.code, &username)
                .await
                .expect("Failed to join test party");
            let guest = match status {
                GuestStatus::Pending => guest,
                GuestStatus::Approved => system
                    .guests()
                    .approve_guest(&self.admin_id, party.id, guest.id)
                    .await
                    .expect("Failed to approve test guest"),
                GuestStatus::Rejected => system
                    .guests()
                    .reject_guest(&self.admin_id, party.id, guest.id)
                    .await
                    .expect("Failed to reject test guest"),
            };
            guests.push(guest);
        }

        BuiltParty {
            system,
            party,
            guests,
        }
    }
}

impl Default for PartyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltParty {
    pub fn guest(&self, username: &str) -> &Guest {
        self.guests
            .iter()
            .find(|guest| guest.username == username)
            .expect("unknown test guest")
    }

    pub fn owner(&self) -> CallerIdentity {
        CallerIdentity::admin(self.party.admin_id.clone())
    }

    pub fn ballot_request(&self, username: &str, votes: VoteMap) -> SubmitVoteRequest {
        SubmitVoteRequest {
            guest_id: self.guest(username).id,
            votes,
        }
    }

    pub async fn close(&self) -> Party {
        self.system
            .votes()
            .end_voting(&self.owner(), self.party.id)
            .await
            .expect("Failed to close test party")
    }
}
