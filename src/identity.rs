//! # Caller Identity
//!
//! Who is invoking a service operation, and how a bearer token becomes an admin
//! identity. Token verification is delegated to an injected [`IdentityProvider`].

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// The caller of an operation that admits more than one kind of principal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CallerIdentity {
    /// Authenticated organizer, keyed by identity-provider user id
    Admin(String),
    /// A guest acting on its own behalf
    Guest(Uuid),
    Anonymous,
}

impl CallerIdentity {
    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::Admin(user_id.into())
    }

    pub fn admin_id(&self) -> Option<&str> {
        match self {
            Self::Admin(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

impl fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin(id) => write!(f, "admin:{id}"),
            Self::Guest(id) => write!(f, "guest:{id}"),
            Self::Anonymous => f.write_str("anonymous"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingAuthHeader,

    #[error("Invalid authorization header format")]
    InvalidAuthFormat,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// Identity established by the provider for a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: String,
    pub email: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}

/// Fixed token table, for tests and local development
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, VerifiedIdentity>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(
        mut self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.tokens.insert(
            token.into(),
            VerifiedIdentity {
                user_id: user_id.into(),
                email: email.into(),
            },
        );
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::InvalidToken("unknown token".to_string()))
    }
}

/// Turns an `Authorization` header into a caller identity
#[derive(Clone)]
pub struct Authenticator {
    provider: Arc<dyn IdentityProvider>,
}

impl fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

impl Authenticator {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Verify the bearer token; any failure is an error
    pub async fn require_admin(
        &self,
        authorization: Option<&str>,
    ) -> Result<VerifiedIdentity, AuthError> {
        let header = authorization.ok_or(AuthError::MissingAuthHeader)?;
        let token = extract_bearer_token(header)?;

        let identity = self.provider.verify_token(token).await.map_err(|e| {
            warn!(error = %e, "Token verification failed");
            e
        })?;

        debug!(user_id = %identity.user_id, "Authenticated admin request");
        Ok(identity)
    }

    /// Admin on a valid token, anonymous otherwise
    pub async fn optional_caller(&self, authorization: Option<&str>) -> CallerIdentity {
        match self.require_admin(authorization).await {
            Ok(identity) => CallerIdentity::Admin(identity.user_id),
            Err(_) => CallerIdentity::Anonymous,
        }
    }
}

/// Extract the token from `Bearer <token>`; the scheme is case-insensitive
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(AuthError::InvalidAuthFormat)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::InvalidAuthFormat);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken("empty bearer token".to_string()));
    }

    Ok(token)
}
