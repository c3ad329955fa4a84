//! Error types for the vote party core.
//!
//! Every failure is a typed value. Store adapters report [`StoreError`]; services
//! translate the store's "not found" into the domain [`ServiceError::NotFound`] and
//! pass every other store failure through unchanged as [`ServiceError::Store`].

use thiserror::Error;

/// Domain errors returned by every service operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The entity does not exist, or exists but is not addressable by this caller
    /// (for example a guest id that belongs to another party). The two cases are
    /// intentionally indistinguishable so existence is not leaked.
    #[error("Not found")]
    NotFound,
    /// An authenticated caller is not allowed to act on the resource.
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Duplicate username")]
    DuplicateUsername,
    #[error("Guest not approved")]
    GuestNotApproved,
    #[error("Party is not active")]
    PartyClosed,
    #[error("Vote already exists")]
    VoteAlreadyExists,
    #[error("Invalid votes: {0}")]
    InvalidVotes(String),
    #[error("Voting has not ended")]
    VotingNotEnded,
    #[error("Invalid event type: {0}")]
    InvalidEventType(String),
    #[error("Invalid username: {0}")]
    InvalidUsername(String),
    #[error("Failed to generate a unique party code after {attempts} attempts")]
    CodeGenerationExhausted { attempts: u32 },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Operation timed out: {0}")]
    Timeout(String),
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl ServiceError {
    /// Transport status the boundary layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Unauthorized
            | Self::GuestNotApproved
            | Self::PartyClosed
            | Self::VotingNotEnded => 403,
            Self::DuplicateUsername | Self::VoteAlreadyExists => 409,
            Self::InvalidVotes(_)
            | Self::InvalidEventType(_)
            | Self::InvalidUsername(_)
            | Self::Validation(_) => 400,
            Self::Timeout(_) => 504,
            Self::CodeGenerationExhausted { .. } | Self::Store(_) => 500,
        }
    }

    /// Whether the failure was caused by the caller rather than infrastructure.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ServiceError::NotFound,
            other => ServiceError::Store(other),
        }
    }
}

/// Errors reported by store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    /// A uniqueness constraint rejected the write.
    #[error("{entity} conflict on {key}")]
    Conflict { entity: &'static str, key: String },
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn conflict(entity: &'static str, key: impl ToString) -> Self {
        Self::Conflict {
            entity,
            key: key.to_string(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;
