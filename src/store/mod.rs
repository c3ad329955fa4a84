//! # Store Contracts
//!
//! Persistence capabilities consumed by the services. The services only ever see
//! these traits; concrete adapters live in [`memory`] and [`postgres`].
//!
//! Lookups return `Ok(None)` for a missing row. Mutations of a missing row fail with
//! [`StoreError::NotFound`]. Writes that would break a uniqueness rule (party code,
//! one ballot per guest and party, username per party) fail with
//! [`StoreError::Conflict`] so the check-then-create sequences in the services stay
//! correct under concurrent requests.
//!
//! [`StoreError::NotFound`]: crate::error::StoreError::NotFound
//! [`StoreError::Conflict`]: crate::error::StoreError::Conflict

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::models::{Guest, Party, UserProfile, Vote};
use crate::state_machine::{GuestStatus, PartyStatus};

pub use memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PgStore;

#[async_trait]
pub trait PartyStore: Send + Sync {
    /// Persist a new party. Fails with a conflict if the code was ever issued before.
    async fn create(&self, party: &Party) -> StoreResult<()>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Party>>;

    async fn get_by_code(&self, code: &str) -> StoreResult<Option<Party>>;

    /// Parties owned by `admin_id`, oldest first
    async fn list_by_admin(&self, admin_id: &str) -> StoreResult<Vec<Party>>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Move the party from `expected` to `status`. Fails with a conflict if the stored
    /// status is no longer `expected`.
    async fn update_status(
        &self,
        id: Uuid,
        expected: PartyStatus,
        status: PartyStatus,
    ) -> StoreResult<()>;

    /// Whether the code has ever been issued, including to deleted parties
    async fn code_exists(&self, code: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait GuestStore: Send + Sync {
    /// Persist a new guest. Fails with a conflict if the username is taken in that party.
    async fn create(&self, guest: &Guest) -> StoreResult<()>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Guest>>;

    /// Guests of a party in join order
    async fn list_by_party(&self, party_id: Uuid) -> StoreResult<Vec<Guest>>;

    async fn list_by_party_and_status(
        &self,
        party_id: Uuid,
        status: GuestStatus,
    ) -> StoreResult<Vec<Guest>>;

    /// Move the guest from `expected` to `status`. Fails with a conflict if the stored
    /// status is no longer `expected`.
    async fn update_status(
        &self,
        id: Uuid,
        expected: GuestStatus,
        status: GuestStatus,
    ) -> StoreResult<()>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    async fn exists_by_party_and_username(
        &self,
        party_id: Uuid,
        username: &str,
    ) -> StoreResult<bool>;
}

#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Persist a new ballot. Fails with a conflict if the guest already voted in the party.
    async fn create(&self, vote: &Vote) -> StoreResult<()>;

    async fn get_by_guest_and_party(
        &self,
        guest_id: Uuid,
        party_id: Uuid,
    ) -> StoreResult<Option<Vote>>;

    /// Overwrite an existing ballot (matched by id)
    async fn update(&self, vote: &Vote) -> StoreResult<()>;

    async fn list_by_party(&self, party_id: Uuid) -> StoreResult<Vec<Vote>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn upsert(&self, profile: &UserProfile) -> StoreResult<()>;

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>>;
}
