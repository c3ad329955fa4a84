#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Vote Party Core
//!
//! Domain core for watch-party voting on a song contest.
//!
//! ## Overview
//!
//! An admin opens a party for one show of the contest and shares its six-character
//! join code. Guests ask to join, the admin approves or rejects them, and every
//! approved guest casts one ranked ballot awarding 12, 10, 8, 7, 6, 5, 4, 3, 2 and 1
//! points to ten different acts. Once the admin closes voting the party scoreboard
//! is available, ranked with standard competition ranking.
//!
//! ## Module Organization
//!
//! - [`models`] - Parties, guests, ballots, acts, results and profiles
//! - [`state_machine`] - Party and guest status transitions
//! - [`store`] - Persistence contracts with in-memory and PostgreSQL adapters
//! - [`catalog`] - Read-only act catalog
//! - [`identity`] - Caller identity and bearer-token authentication
//! - [`services`] - Party, guest, vote and profile operations
//! - [`system`] - Wiring from configuration, per-operation deadlines
//! - [`config`] - Layered configuration loading
//! - [`logging`] - Structured logging setup
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vote_party_core::catalog::JsonActCatalog;
//! use vote_party_core::models::{CreatePartyRequest, EventType};
//! use vote_party_core::VotePartySystem;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = JsonActCatalog::from_path("data/acts.json")?;
//! let system = VotePartySystem::in_memory(Arc::new(catalog));
//!
//! let party = system
//!     .parties()
//!     .create_party("admin-1", CreatePartyRequest::new("Watch Party", EventType::Grandfinal))
//!     .await?;
//! let guest = system.guests().join_party(&party.code, "Alice").await?;
//! system.guests().approve_guest("admin-1", party.id, guest.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod identity;
pub mod logging;
pub mod models;
pub mod services;
pub mod state_machine;
pub mod store;
pub mod system;

pub use catalog::{ActCatalog, CatalogError, JsonActCatalog};
pub use config::{ConfigManager, ConfigurationError, VotePartyConfig};
pub use error::{Result, ServiceError, StoreError};
pub use identity::{Authenticator, CallerIdentity, IdentityProvider, VerifiedIdentity};
pub use models::{
    Act, CreatePartyRequest, EventType, Guest, Party, PartyResults, PublicPartyView,
    SubmitVoteRequest, UserProfile, Vote, VoteMap, VoteResult,
};
pub use services::{GuestService, PartyService, ProfileService, VoteService};
pub use state_machine::{GuestStatus, PartyStatus};
pub use system::{Stores, VotePartySystem};
