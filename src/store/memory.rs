//! In-process store backed by sharded concurrent maps.
//!
//! Used by the test suite and for local development. Every method finishes its
//! map work synchronously before returning, so no shard guard is ever held across
//! an await point. Uniqueness rules are enforced with map entries (votes,
//! usernames) and the issued-code ledger lock (party codes).

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::HashSet;
use tracing::debug;
use uuid::Uuid;

use super::{GuestStore, PartyStore, ProfileStore, VoteStore};
use crate::error::{StoreError, StoreResult};
use crate::models::{Guest, Party, UserProfile, Vote};
use crate::state_machine::{GuestStatus, PartyStatus};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    parties: DashMap<Uuid, Party>,
    /// Live parties by code
    party_codes: DashMap<String, Uuid>,
    /// Every code ever issued; survives party deletion
    issued_codes: Mutex<HashSet<String>>,
    guests: DashMap<Uuid, Guest>,
    /// (party id, username) -> guest id
    guest_usernames: DashMap<(Uuid, String), Uuid>,
    /// (guest id, party id) -> ballot
    votes: DashMap<(Uuid, Uuid), Vote>,
    profiles: DashMap<String, UserProfile>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn party_count(&self) -> usize {
        self.parties.len()
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }
}

#[async_trait]
impl PartyStore for InMemoryStore {
    async fn create(&self, party: &Party) -> StoreResult<()> {
        let mut issued = self.issued_codes.lock();
        if issued.contains(&party.code) {
            return Err(StoreError::conflict("party", &party.code));
        }
        if self.parties.contains_key(&party.id) {
            return Err(StoreError::conflict("party", party.id));
        }

        issued.insert(party.code.clone());
        self.party_codes.insert(party.code.clone(), party.id);
        self.parties.insert(party.id, party.clone());
        debug!(party_id = %party.id, code = %party.code, "Stored party");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Party>> {
        Ok(self.parties.get(&id).map(|entry| entry.value().clone()))
    }

    async fn get_by_code(&self, code: &str) -> StoreResult<Option<Party>> {
        let Some(id) = self.party_codes.get(code).map(|entry| *entry.value()) else {
            return Ok(None);
        };
        Ok(self.parties.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_admin(&self, admin_id: &str) -> StoreResult<Vec<Party>> {
        let mut parties: Vec<Party> = self
            .parties
            .iter()
            .filter(|entry| entry.admin_id == admin_id)
            .map(|entry| entry.value().clone())
            .collect();
        parties.sort_by_key(|party| party.created_at);
        Ok(parties)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let (_, party) = self
            .parties
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("party", id))?;
        self.party_codes.remove(&party.code);
        Ok(())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: PartyStatus,
        status: PartyStatus,
    ) -> StoreResult<()> {
        let mut party = self
            .parties
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("party", id))?;
        if party.status != expected {
            return Err(StoreError::conflict("party", format!("{id} is {}", party.status)));
        }
        party.status = status;
        Ok(())
    }

    async fn code_exists(&self, code: &str) -> StoreResult<bool> {
        Ok(self.issued_codes.lock().contains(code))
    }
}

#[async_trait]
impl GuestStore for InMemoryStore {
    async fn create(&self, guest: &Guest) -> StoreResult<()> {
        match self
            .guest_usernames
            .entry((guest.party_id, guest.username.clone()))
        {
            Entry::Occupied(_) => Err(StoreError::conflict("guest", &guest.username)),
            Entry::Vacant(slot) => {
                slot.insert(guest.id);
                self.guests.insert(guest.id, guest.clone());
                Ok(())
            }
        }
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Guest>> {
        Ok(self.guests.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_by_party(&self, party_id: Uuid) -> StoreResult<Vec<Guest>> {
        let mut guests: Vec<Guest> = self
            .guests
            .iter()
            .filter(|entry| entry.party_id == party_id)
            .map(|entry| entry.value().clone())
            .collect();
        guests.sort_by_key(|guest| guest.created_at);
        Ok(guests)
    }

    async fn list_by_party_and_status(
        &self,
        party_id: Uuid,
        status: GuestStatus,
    ) -> StoreResult<Vec<Guest>> {
        let guests = GuestStore::list_by_party(self, party_id).await?;
        Ok(guests
            .into_iter()
            .filter(|guest| guest.status == status)
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: GuestStatus,
        status: GuestStatus,
    ) -> StoreResult<()> {
        let mut guest = self
            .guests
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("guest", id))?;
        if guest.status != expected {
            return Err(StoreError::conflict("guest", format!("{id} is {}", guest.status)));
        }
        guest.status = status;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let (_, guest) = self
            .guests
            .remove(&id)
            .ok_or_else(|| StoreError::not_found("guest", id))?;
        self.guest_usernames.remove(&(guest.party_id, guest.username));
        Ok(())
    }

    async fn exists_by_party_and_username(
        &self,
        party_id: Uuid,
        username: &str,
    ) -> StoreResult<bool> {
        Ok(self
            .guest_usernames
            .contains_key(&(party_id, username.to_string())))
    }
}

#[async_trait]
impl VoteStore for InMemoryStore {
    async fn create(&self, vote: &Vote) -> StoreResult<()> {
        match self.votes.entry((vote.guest_id, vote.party_id)) {
            Entry::Occupied(_) => Err(StoreError::conflict(
                "vote",
                format!("{}/{}", vote.guest_id, vote.party_id),
            )),
            Entry::Vacant(slot) => {
                slot.insert(vote.clone());
                Ok(())
            }
        }
    }

    async fn get_by_guest_and_party(
        &self,
        guest_id: Uuid,
        party_id: Uuid,
    ) -> StoreResult<Option<Vote>> {
        Ok(self
            .votes
            .get(&(guest_id, party_id))
            .map(|entry| entry.value().clone()))
    }

    async fn update(&self, vote: &Vote) -> StoreResult<()> {
        match self.votes.get_mut(&(vote.guest_id, vote.party_id)) {
            Some(mut existing) if existing.id == vote.id => {
                *existing = vote.clone();
                Ok(())
            }
            _ => Err(StoreError::not_found("vote", vote.id)),
        }
    }

    async fn list_by_party(&self, party_id: Uuid) -> StoreResult<Vec<Vote>> {
        let mut votes: Vec<Vote> = self
            .votes
            .iter()
            .filter(|entry| entry.party_id == party_id)
            .map(|entry| entry.value().clone())
            .collect();
        votes.sort_by_key(|vote| vote.created_at);
        Ok(votes)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn upsert(&self, profile: &UserProfile) -> StoreResult<()> {
        self.profiles.insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        Ok(self.profiles.get(id).map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINT_VALUES;
    use crate::models::{CreatePartyRequest, EventType, VoteMap};

    fn party(code: &str) -> Party {
        Party::new(
            "admin-1",
            CreatePartyRequest::new("Watch Party", EventType::Grandfinal),
            code.to_string(),
        )
    }

    fn ballot() -> VoteMap {
        POINT_VALUES
            .iter()
            .map(|points| (*points, format!("act-{points}")))
            .collect()
    }

    #[tokio::test]
    async fn test_party_code_is_never_reissued() {
        let store = InMemoryStore::new();
        let first = party("ABC234");
        PartyStore::create(&store, &first).await.unwrap();
        PartyStore::delete(&store, first.id).await.unwrap();

        assert!(store.code_exists("ABC234").await.unwrap());
        assert!(store.get_by_code("ABC234").await.unwrap().is_none());

        let err = PartyStore::create(&store, &party("ABC234")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_party_status_update_and_missing_rows() {
        let store = InMemoryStore::new();
        let p = party("XYZ789");
        PartyStore::create(&store, &p).await.unwrap();

        PartyStore::update_status(&store, p.id, PartyStatus::Active, PartyStatus::Closed)
            .await
            .unwrap();
        let stored = PartyStore::get_by_id(&store, p.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PartyStatus::Closed);

        // A second close read the party while it was still active
        assert!(
            PartyStore::update_status(&store, p.id, PartyStatus::Active, PartyStatus::Closed)
                .await
                .unwrap_err()
                .is_conflict()
        );

        let missing = Uuid::new_v4();
        assert!(matches!(
            PartyStore::update_status(&store, missing, PartyStatus::Active, PartyStatus::Closed)
                .await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            PartyStore::delete(&store, missing).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_guest_username_unique_per_party() {
        let store = InMemoryStore::new();
        let party_a = Uuid::new_v4();
        let party_b = Uuid::new_v4();

        GuestStore::create(&store, &Guest::new(party_a, "Alice"))
            .await
            .unwrap();
        assert!(store
            .exists_by_party_and_username(party_a, "Alice")
            .await
            .unwrap());
        assert!(GuestStore::create(&store, &Guest::new(party_a, "Alice"))
            .await
            .unwrap_err()
            .is_conflict());
        GuestStore::create(&store, &Guest::new(party_b, "Alice"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_guest_delete_frees_username() {
        let store = InMemoryStore::new();
        let party_id = Uuid::new_v4();
        let guest = Guest::new(party_id, "Bob");
        GuestStore::create(&store, &guest).await.unwrap();
        GuestStore::delete(&store, guest.id).await.unwrap();

        assert!(!store
            .exists_by_party_and_username(party_id, "Bob")
            .await
            .unwrap());
        assert!(GuestStore::get_by_id(&store, guest.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_guests_by_status() {
        let store = InMemoryStore::new();
        let party_id = Uuid::new_v4();
        let alice = Guest::new(party_id, "Alice");
        let bob = Guest::new(party_id, "Bob");
        GuestStore::create(&store, &alice).await.unwrap();
        GuestStore::create(&store, &bob).await.unwrap();
        GuestStore::update_status(&store, bob.id, GuestStatus::Pending, GuestStatus::Approved)
            .await
            .unwrap();
        assert!(
            GuestStore::update_status(&store, bob.id, GuestStatus::Pending, GuestStatus::Rejected)
                .await
                .unwrap_err()
                .is_conflict()
        );

        let pending = store
            .list_by_party_and_status(party_id, GuestStatus::Pending)
            .await
            .unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, alice.id);

        let all = GuestStore::list_by_party(&store, party_id).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_one_vote_per_guest_and_party() {
        let store = InMemoryStore::new();
        let guest_id = Uuid::new_v4();
        let party_id = Uuid::new_v4();
        let vote = Vote::new(guest_id, party_id, ballot());

        VoteStore::create(&store, &vote).await.unwrap();
        let duplicate = Vote::new(guest_id, party_id, ballot());
        assert!(VoteStore::create(&store, &duplicate)
            .await
            .unwrap_err()
            .is_conflict());
        assert_eq!(store.vote_count(), 1);
    }

    #[tokio::test]
    async fn test_vote_update_requires_matching_id() {
        let store = InMemoryStore::new();
        let mut vote = Vote::new(Uuid::new_v4(), Uuid::new_v4(), ballot());
        VoteStore::create(&store, &vote).await.unwrap();

        vote.votes.insert(12, "act-new");
        VoteStore::update(&store, &vote).await.unwrap();
        let stored = store
            .get_by_guest_and_party(vote.guest_id, vote.party_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.votes.get(12), Some("act-new"));

        let stranger = Vote::new(vote.guest_id, vote.party_id, ballot());
        assert!(matches!(
            VoteStore::update(&store, &stranger).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_profile_upsert_overwrites() {
        let store = InMemoryStore::new();
        let mut profile = UserProfile {
            id: "uid-1".to_string(),
            username: "host".to_string(),
            email: "host@example.com".to_string(),
        };
        store.upsert(&profile).await.unwrap();
        profile.username = "host_renamed".to_string();
        store.upsert(&profile).await.unwrap();

        let stored = ProfileStore::get_by_id(&store, "uid-1").await.unwrap().unwrap();
        assert_eq!(stored.username, "host_renamed");
    }
}
