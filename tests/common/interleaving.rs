//! A store that yields to the scheduler after every lookup, so concurrent service
//! calls interleave between their read and their write the way they do against a
//! networked database.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use vote_party_core::config::VotePartyConfig;
use vote_party_core::error::StoreResult;
use vote_party_core::models::{Guest, Party};
use vote_party_core::store::{GuestStore, InMemoryStore, PartyStore};
use vote_party_core::{GuestStatus, PartyStatus, Stores, VotePartySystem};

use super::fixture_catalog;

#[derive(Debug, Default)]
pub struct InterleavingStore {
    inner: InMemoryStore,
}

impl InterleavingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Services over this store for parties and guests, plain memory for the rest
    pub fn system(self: Arc<Self>) -> VotePartySystem {
        let rest = Arc::new(InMemoryStore::new());
        let stores = Stores {
            parties: self.clone(),
            guests: self,
            votes: rest.clone(),
            profiles: rest,
        };
        VotePartySystem::new(stores, fixture_catalog(), &VotePartyConfig::default())
    }

    pub async fn guest_status(&self, id: Uuid) -> Option<GuestStatus> {
        GuestStore::get_by_id(&self.inner, id)
            .await
            .ok()
            .flatten()
            .map(|guest| guest.status)
    }

    pub async fn party_status(&self, id: Uuid) -> Option<PartyStatus> {
        PartyStore::get_by_id(&self.inner, id)
            .await
            .ok()
            .flatten()
            .map(|party| party.status)
    }
}

#[async_trait]
impl PartyStore for InterleavingStore {
    async fn create(&self, party: &Party) -> StoreResult<()> {
        PartyStore::create(&self.inner, party).await
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Party>> {
        let party = PartyStore::get_by_id(&self.inner, id).await;
        tokio::task::yield_now().await;
        party
    }

    async fn get_by_code(&self, code: &str) -> StoreResult<Option<Party>> {
        let party = self.inner.get_by_code(code).await;
        tokio::task::yield_now().await;
        party
    }

    async fn list_by_admin(&self, admin_id: &str) -> StoreResult<Vec<Party>> {
        self.inner.list_by_admin(admin_id).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        PartyStore::delete(&self.inner, id).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: PartyStatus,
        status: PartyStatus,
    ) -> StoreResult<()> {
        PartyStore::update_status(&self.inner, id, expected, status).await
    }

    async fn code_exists(&self, code: &str) -> StoreResult<bool> {
        self.inner.code_exists(code).await
    }
}

#[async_trait]
impl GuestStore for InterleavingStore {
    async fn create(&self, guest: &Guest) -> StoreResult<()> {
        GuestStore::create(&self.inner, guest).await
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Guest>> {
        let guest = GuestStore::get_by_id(&self.inner, id).await;
        tokio::task::yield_now().await;
        guest
    }

    async fn list_by_party(&self, party_id: Uuid) -> StoreResult<Vec<Guest>> {
        GuestStore::list_by_party(&self.inner, party_id).await
    }

    async fn list_by_party_and_status(
        &self,
        party_id: Uuid,
        status: GuestStatus,
    ) -> StoreResult<Vec<Guest>> {
        self.inner.list_by_party_and_status(party_id, status).await
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: GuestStatus,
        status: GuestStatus,
    ) -> StoreResult<()> {
        GuestStore::update_status(&self.inner, id, expected, status).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        GuestStore::delete(&self.inner, id).await
    }

    async fn exists_by_party_and_username(
        &self,
        party_id: Uuid,
        username: &str,
    ) -> StoreResult<bool> {
        self.inner
            .exists_by_party_and_username(party_id, username)
            .await
    }
}
