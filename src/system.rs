//! # Composition Root
//!
//! Builds the stores, the act catalog and every service from a [`VotePartyConfig`]
//! and applies the optional per-operation deadline.

use anyhow::{Context, Result as AnyResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::catalog::{ActCatalog, JsonActCatalog};
use crate::config::{StoreBackend, VotePartyConfig};
use crate::error::{Result, ServiceError};
use crate::services::{GuestService, PartyService, ProfileService, VoteService};
use crate::store::{GuestStore, InMemoryStore, PartyStore, ProfileStore, VoteStore};

/// Store handles shared by the services
#[derive(Clone)]
pub struct Stores {
    pub parties: Arc<dyn PartyStore>,
    pub guests: Arc<dyn GuestStore>,
    pub votes: Arc<dyn VoteStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl Stores {
    /// All four contracts backed by one adapter
    pub fn from_backend<S>(store: Arc<S>) -> Self
    where
        S: PartyStore + GuestStore + VoteStore + ProfileStore + 'static,
    {
        Self {
            parties: store.clone(),
            guests: store.clone(),
            votes: store.clone(),
            profiles: store,
        }
    }
}

/// Fully wired service set
#[derive(Clone, Debug)]
pub struct VotePartySystem {
    parties: PartyService,
    guests: GuestService,
    votes: VoteService,
    profiles: ProfileService,
    operation_timeout: Option<Duration>,
}

impl VotePartySystem {
    pub fn new(stores: Stores, catalog: Arc<dyn ActCatalog>, config: &VotePartyConfig) -> Self {
        let parties = PartyService::new(stores.parties.clone())
            .with_max_code_attempts(config.party.max_code_attempts);

        Self {
            guests: GuestService::new(stores.guests.clone(), stores.parties.clone()),
            votes: VoteService::new(stores.votes, stores.parties, stores.guests, catalog),
            profiles: ProfileService::new(stores.profiles),
            parties,
            operation_timeout: config.runtime.operation_timeout(),
        }
    }

    /// In-memory stores with the given catalog and default settings
    pub fn in_memory(catalog: Arc<dyn ActCatalog>) -> Self {
        Self::new(
            Stores::from_backend(Arc::new(InMemoryStore::new())),
            catalog,
            &VotePartyConfig::default(),
        )
    }

    /// Validate the configuration, load the catalog and connect the configured backend
    pub async fn from_config(config: &VotePartyConfig) -> AnyResult<Self> {
        config.validate().context("invalid vote party configuration")?;

        let catalog = JsonActCatalog::from_path(&config.catalog.acts_path).with_context(|| {
            format!(
                "failed to load act catalog from {}",
                config.catalog.acts_path.display()
            )
        })?;

        let stores = match config.runtime.store_backend {
            StoreBackend::Memory => Stores::from_backend(Arc::new(InMemoryStore::new())),
            StoreBackend::Postgres => Self::postgres_stores(config).await?,
        };

        info!(
            store_backend = ?config.runtime.store_backend,
            act_count = catalog.len(),
            operation_timeout_ms = config.runtime.operation_timeout_ms,
            "Vote party system ready"
        );

        Ok(Self::new(stores, Arc::new(catalog), config))
    }

    #[cfg(feature = "postgres")]
    async fn postgres_stores(config: &VotePartyConfig) -> AnyResult<Stores> {
        let store = crate::store::PgStore::connect(&config.database)
            .await
            .context("failed to connect to PostgreSQL")?;
        store
            .run_migrations()
            .await
            .context("failed to apply vote party migrations")?;
        Ok(Stores::from_backend(Arc::new(store)))
    }

    #[cfg(not(feature = "postgres"))]
    async fn postgres_stores(_config: &VotePartyConfig) -> AnyResult<Stores> {
        anyhow::bail!("store backend 'postgres' requires the `postgres` feature")
    }

    pub fn parties(&self) -> &PartyService {
        &self.parties
    }

    pub fn guests(&self) -> &GuestService {
        &self.guests
    }

    pub fn votes(&self) -> &VoteService {
        &self.votes
    }

    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout
    }

    /// Run `operation` under the configured deadline. The future is dropped when the
    /// deadline passes, which cancels any store call still in flight.
    pub async fn with_deadline<T, F>(&self, name: &str, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let Some(deadline) = self.operation_timeout else {
            return operation.await;
        };

        match tokio::time::timeout(deadline, operation).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation = %name,
                    timeout_ms = deadline.as_millis() as u64,
                    "Operation exceeded deadline"
                );
                Err(ServiceError::Timeout(format!(
                    "{name} exceeded {}ms",
                    deadline.as_millis()
                )))
            }
        }
    }
}
