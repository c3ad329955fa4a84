//! PostgreSQL adapter for the store contracts.
//!
//! Maps to the `vote_party_*` tables created by `migrations/`. Statuses and event
//! types are stored as their wire strings; ballots are stored as JSONB objects keyed
//! by point value. Unique-constraint violations surface as [`StoreError::Conflict`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use super::{GuestStore, PartyStore, ProfileStore, VoteStore};
use crate::config::DatabaseConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::{EventType, Guest, Party, UserProfile, Vote, VoteMap};
use crate::state_machine::{GuestStatus, PartyStatus};

const SCHEMA_SQL: &str = include_str!("../../migrations/20250501000000_create_vote_party_tables.sql");

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool using the database section of the configuration
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        info!(
            max_connections = config.max_connections,
            "Connected vote party store to PostgreSQL"
        );
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the schema if it does not exist yet
    pub async fn run_migrations(&self) -> StoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        debug!("Vote party schema is up to date");
        Ok(())
    }

    pub async fn health_check(&self) -> StoreResult<bool> {
        let (value,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(value == 1)
    }

    /// A guarded status update touched no row: the row is gone, or another writer
    /// moved its status first
    async fn missed_status_update(
        &self,
        table: &str,
        entity: &'static str,
        id: Uuid,
    ) -> StoreError {
        let exists = sqlx::query_as::<_, (bool,)>(&format!(
            "SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await;

        match exists {
            Ok((true,)) => StoreError::conflict(entity, id),
            Ok((false,)) => StoreError::not_found(entity, id),
            Err(err) => err.into(),
        }
    }
}

/// Translate a unique violation into a conflict; anything else is a database error
fn map_write_error(err: sqlx::Error, entity: &'static str, key: impl ToString) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::conflict(entity, key)
        }
        _ => err.into(),
    }
}

fn parse_column<T>(value: &str) -> StoreResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e: T::Err| StoreError::Serialization(e.to_string()))
}

#[derive(Debug, FromRow)]
struct PartyRow {
    id: Uuid,
    name: String,
    code: String,
    event_type: String,
    admin_id: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PartyRow> for Party {
    type Error = StoreError;

    fn try_from(row: PartyRow) -> StoreResult<Self> {
        Ok(Party {
            id: row.id,
            name: row.name,
            code: row.code,
            event_type: parse_column::<EventType>(&row.event_type)?,
            admin_id: row.admin_id,
            status: parse_column::<PartyStatus>(&row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct GuestRow {
    id: Uuid,
    party_id: Uuid,
    username: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<GuestRow> for Guest {
    type Error = StoreError;

    fn try_from(row: GuestRow) -> StoreResult<Self> {
        Ok(Guest {
            id: row.id,
            party_id: row.party_id,
            username: row.username,
            status: parse_column::<GuestStatus>(&row.status)?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct VoteRow {
    id: Uuid,
    guest_id: Uuid,
    party_id: Uuid,
    votes: Json<VoteMap>,
    created_at: DateTime<Utc>,
}

impl From<VoteRow> for Vote {
    fn from(row: VoteRow) -> Self {
        Vote {
            id: row.id,
            guest_id: row.guest_id,
            party_id: row.party_id,
            votes: row.votes.0,
            created_at: row.created_at,
        }
    }
}

const PARTY_COLUMNS: &str = "id, name, code, event_type, admin_id, status, created_at";
const GUEST_COLUMNS: &str = "id, party_id, username, status, created_at";
const VOTE_COLUMNS: &str = "id, guest_id, party_id, votes, created_at";

#[async_trait]
impl PartyStore for PgStore {
    async fn create(&self, party: &Party) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO vote_party_issued_codes (code) VALUES ($1)")
            .bind(&party.code)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "party", &party.code))?;

        sqlx::query(
            r#"
            INSERT INTO vote_party_parties
            (id, name, code, event_type, admin_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(party.id)
        .bind(&party.name)
        .bind(&party.code)
        .bind(party.event_type.as_str())
        .bind(&party.admin_id)
        .bind(party.status.as_str())
        .bind(party.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "party", party.id))?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Party>> {
        let row = sqlx::query_as::<_, PartyRow>(&format!(
            "SELECT {PARTY_COLUMNS} FROM vote_party_parties WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Party::try_from).transpose()
    }

    async fn get_by_code(&self, code: &str) -> StoreResult<Option<Party>> {
        let row = sqlx::query_as::<_, PartyRow>(&format!(
            "SELECT {PARTY_COLUMNS} FROM vote_party_parties WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Party::try_from).transpose()
    }

    async fn list_by_admin(&self, admin_id: &str) -> StoreResult<Vec<Party>> {
        let rows = sqlx::query_as::<_, PartyRow>(&format!(
            "SELECT {PARTY_COLUMNS} FROM vote_party_parties WHERE admin_id = $1 ORDER BY created_at"
        ))
        .bind(admin_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Party::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM vote_party_parties WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("party", id));
        }
        Ok(())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: PartyStatus,
        status: PartyStatus,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE vote_party_parties SET status = $3 WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.missed_status_update("vote_party_parties", "party", id).await);
        }
        Ok(())
    }

    async fn code_exists(&self, code: &str) -> StoreResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM vote_party_issued_codes WHERE code = $1)",
        )
        .bind(code)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[async_trait]
impl GuestStore for PgStore {
    async fn create(&self, guest: &Guest) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vote_party_guests (id, party_id, username, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(guest.id)
        .bind(guest.party_id)
        .bind(&guest.username)
        .bind(guest.status.as_str())
        .bind(guest.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "guest", &guest.username))?;

        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Guest>> {
        let row = sqlx::query_as::<_, GuestRow>(&format!(
            "SELECT {GUEST_COLUMNS} FROM vote_party_guests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Guest::try_from).transpose()
    }

    async fn list_by_party(&self, party_id: Uuid) -> StoreResult<Vec<Guest>> {
        let rows = sqlx::query_as::<_, GuestRow>(&format!(
            "SELECT {GUEST_COLUMNS} FROM vote_party_guests WHERE party_id = $1 ORDER BY created_at"
        ))
        .bind(party_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Guest::try_from).collect()
    }

    async fn list_by_party_and_status(
        &self,
        party_id: Uuid,
        status: GuestStatus,
    ) -> StoreResult<Vec<Guest>> {
        let rows = sqlx::query_as::<_, GuestRow>(&format!(
            "SELECT {GUEST_COLUMNS} FROM vote_party_guests \
             WHERE party_id = $1 AND status = $2 ORDER BY created_at"
        ))
        .bind(party_id)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Guest::try_from).collect()
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: GuestStatus,
        status: GuestStatus,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE vote_party_guests SET status = $3 WHERE id = $1 AND status = $2",
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(self.missed_status_update("vote_party_guests", "guest", id).await);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM vote_party_guests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("guest", id));
        }
        Ok(())
    }

    async fn exists_by_party_and_username(
        &self,
        party_id: Uuid,
        username: &str,
    ) -> StoreResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM vote_party_guests WHERE party_id = $1 AND username = $2)",
        )
        .bind(party_id)
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

#[async_trait]
impl VoteStore for PgStore {
    async fn create(&self, vote: &Vote) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vote_party_votes (id, guest_id, party_id, votes, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(vote.id)
        .bind(vote.guest_id)
        .bind(vote.party_id)
        .bind(Json(&vote.votes))
        .bind(vote.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "vote", format!("{}/{}", vote.guest_id, vote.party_id)))?;

        Ok(())
    }

    async fn get_by_guest_and_party(
        &self,
        guest_id: Uuid,
        party_id: Uuid,
    ) -> StoreResult<Option<Vote>> {
        let row = sqlx::query_as::<_, VoteRow>(&format!(
            "SELECT {VOTE_COLUMNS} FROM vote_party_votes WHERE guest_id = $1 AND party_id = $2"
        ))
        .bind(guest_id)
        .bind(party_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Vote::from))
    }

    async fn update(&self, vote: &Vote) -> StoreResult<()> {
        let result = sqlx::query("UPDATE vote_party_votes SET votes = $2 WHERE id = $1")
            .bind(vote.id)
            .bind(Json(&vote.votes))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("vote", vote.id));
        }
        Ok(())
    }

    async fn list_by_party(&self, party_id: Uuid) -> StoreResult<Vec<Vote>> {
        let rows = sqlx::query_as::<_, VoteRow>(&format!(
            "SELECT {VOTE_COLUMNS} FROM vote_party_votes WHERE party_id = $1 ORDER BY created_at"
        ))
        .bind(party_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Vote::from).collect())
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn upsert(&self, profile: &UserProfile) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vote_party_profiles (id, username, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username, email = EXCLUDED.email
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.username)
        .bind(&profile.email)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Option<UserProfile>> {
        let row: Option<(String, String, String)> =
            sqlx::query_as("SELECT id, username, email FROM vote_party_profiles WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(|(id, username, email)| UserProfile {
            id,
            username,
            email,
        }))
    }
}
