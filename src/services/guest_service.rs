use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use super::authorization::ensure_owner;
use crate::constants::events;
use crate::error::{Result, ServiceError, StoreError};
use crate::models::{Guest, Party};
use crate::state_machine::{next_guest_status, GuestEvent, GuestStatus};
use crate::store::{GuestStore, PartyStore};

/// Guest admission workflow: join by code, admin approval and removal.
#[derive(Clone)]
pub struct GuestService {
    guests: Arc<dyn GuestStore>,
    parties: Arc<dyn PartyStore>,
}

impl fmt::Debug for GuestService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuestService").finish_non_exhaustive()
    }
}

impl GuestService {
    pub fn new(guests: Arc<dyn GuestStore>, parties: Arc<dyn PartyStore>) -> Self {
        Self { guests, parties }
    }

    /// Request to join the party behind `code`. No authentication; the guest starts pending.
    pub async fn join_party(&self, code: &str, username: &str) -> Result<Guest> {
        let party = self.party_by_code(code).await?;

        let guest = Guest::new(party.id, username);
        guest.validate()?;

        if self
            .guests
            .exists_by_party_and_username(party.id, username)
            .await?
        {
            return Err(ServiceError::DuplicateUsername);
        }

        match self.guests.create(&guest).await {
            Ok(()) => {}
            Err(StoreError::Conflict { .. }) => return Err(ServiceError::DuplicateUsername),
            Err(e) => return Err(e.into()),
        }

        info!(
            event = events::GUEST_JOINED,
            party_id = %party.id,
            guest_id = %guest.id,
            username = %guest.username,
            "Guest requested to join"
        );
        Ok(guest)
    }

    /// Approved guests, for the owning admin
    pub async fn list_guests(&self, admin_id: &str, party_id: Uuid) -> Result<Vec<Guest>> {
        self.owned_party(admin_id, party_id).await?;
        self.list_with_status(party_id, GuestStatus::Approved).await
    }

    /// Approved guests, for an approved guest of the same party
    pub async fn list_guests_as_guest(&self, guest_id: Uuid, party_id: Uuid) -> Result<Vec<Guest>> {
        let guest = self
            .guests
            .get_by_id(guest_id)
            .await?
            .ok_or(ServiceError::Unauthorized)?;

        if !guest.is_approved_in(party_id) {
            debug!(guest_id = %guest_id, party_id = %party_id, "Guest may not list party members");
            return Err(ServiceError::Unauthorized);
        }

        self.list_with_status(party_id, GuestStatus::Approved).await
    }

    /// Pending join requests, for the owning admin
    pub async fn list_join_requests(&self, admin_id: &str, party_id: Uuid) -> Result<Vec<Guest>> {
        self.owned_party(admin_id, party_id).await?;
        self.list_with_status(party_id, GuestStatus::Pending).await
    }

    pub async fn approve_guest(
        &self,
        admin_id: &str,
        party_id: Uuid,
        guest_id: Uuid,
    ) -> Result<Guest> {
        self.decide(admin_id, party_id, guest_id, GuestEvent::Approve)
            .await
    }

    pub async fn reject_guest(
        &self,
        admin_id: &str,
        party_id: Uuid,
        guest_id: Uuid,
    ) -> Result<Guest> {
        self.decide(admin_id, party_id, guest_id, GuestEvent::Reject)
            .await
    }

    /// Delete a guest of the party regardless of its status
    pub async fn remove_guest(&self, admin_id: &str, party_id: Uuid, guest_id: Uuid) -> Result<()> {
        self.owned_party(admin_id, party_id).await?;
        let guest = self.guest_in_party(guest_id, party_id).await?;

        self.guests.delete(guest.id).await?;

        info!(
            event = events::GUEST_REMOVED,
            party_id = %party_id,
            guest_id = %guest_id,
            previous_status = %guest.status,
            "Guest removed"
        );
        Ok(())
    }

    /// Unauthenticated status poll for a guest waiting on approval
    pub async fn get_guest_status(&self, code: &str, guest_id: Uuid) -> Result<Guest> {
        let party = self.party_by_code(code).await?;
        let guest = self.guest_in_party(guest_id, party.id).await?;
        debug!(guest_id = %guest_id, status = %guest.status, "Fetched guest status");
        Ok(guest)
    }

    async fn decide(
        &self,
        admin_id: &str,
        party_id: Uuid,
        guest_id: Uuid,
        event: GuestEvent,
    ) -> Result<Guest> {
        self.owned_party(admin_id, party_id).await?;
        let mut guest = self.guest_in_party(guest_id, party_id).await?;

        // Only pending requests are addressable for a decision
        let next = next_guest_status(guest.status, event).map_err(|_| ServiceError::NotFound)?;
        // A concurrent decision that landed first leaves nothing pending to decide
        self.guests
            .update_status(guest_id, guest.status, next)
            .await
            .map_err(|err| {
                if err.is_conflict() {
                    ServiceError::NotFound
                } else {
                    err.into()
                }
            })?;
        guest.status = next;

        let event_name = match event {
            GuestEvent::Approve => events::GUEST_APPROVED,
            GuestEvent::Reject => events::GUEST_REJECTED,
        };
        info!(
            event = event_name,
            party_id = %party_id,
            guest_id = %guest_id,
            status = %guest.status,
            "Guest request decided"
        );
        Ok(guest)
    }

    async fn party_by_code(&self, code: &str) -> Result<Party> {
        self.parties
            .get_by_code(code)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    async fn owned_party(&self, admin_id: &str, party_id: Uuid) -> Result<Party> {
        let party = self
            .parties
            .get_by_id(party_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        ensure_owner(&party, admin_id)?;
        Ok(party)
    }

    async fn guest_in_party(&self, guest_id: Uuid, party_id: Uuid) -> Result<Guest> {
        self.guests
            .get_by_id(guest_id)
            .await?
            .filter(|guest| guest.belongs_to(party_id))
            .ok_or(ServiceError::NotFound)
    }

    async fn list_with_status(&self, party_id: Uuid, status: GuestStatus) -> Result<Vec<Guest>> {
        let guests = self
            .guests
            .list_by_party_and_status(party_id, status)
            .await?;
        debug!(party_id = %party_id, status = %status, count = guests.len(), "Listed guests");
        Ok(guests)
    }
}
