use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::authorization::{ensure_admin_owner, ensure_owner};
use super::party_code::{PartyCodeGenerator, RandomCodeGenerator};
use crate::constants::{events, DEFAULT_MAX_CODE_ATTEMPTS};
use crate::error::{Result, ServiceError, StoreError};
use crate::identity::CallerIdentity;
use crate::logging::log_party_operation;
use crate::models::{CreatePartyRequest, Party, PublicPartyView};
use crate::state_machine::{next_party_status, PartyEvent};
use crate::store::PartyStore;

/// Party lifecycle: creation with a unique join code, owner-scoped reads, deletion
/// and the one-way close.
#[derive(Clone)]
pub struct PartyService {
    parties: Arc<dyn PartyStore>,
    code_generator: Arc<dyn PartyCodeGenerator>,
    max_code_attempts: u32,
}

impl fmt::Debug for PartyService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartyService")
            .field("max_code_attempts", &self.max_code_attempts)
            .finish_non_exhaustive()
    }
}

impl PartyService {
    pub fn new(parties: Arc<dyn PartyStore>) -> Self {
        Self {
            parties,
            code_generator: Arc::new(RandomCodeGenerator),
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    pub fn with_code_generator(mut self, generator: Arc<dyn PartyCodeGenerator>) -> Self {
        self.code_generator = generator;
        self
    }

    pub fn with_max_code_attempts(mut self, attempts: u32) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Create an active party owned by `admin_id`.
    ///
    /// Candidate codes are drawn until one has never been issued. A write that loses
    /// a race for the same code counts as a collision and the loop continues.
    pub async fn create_party(&self, admin_id: &str, request: CreatePartyRequest) -> Result<Party> {
        for attempt in 1..=self.max_code_attempts {
            let code = self.code_generator.generate();

            if self.parties.code_exists(&code).await? {
                warn!(attempt = attempt, code = %code, "Party code collision");
                continue;
            }

            let party = Party::new(admin_id, request.clone(), code);
            party.validate()?;

            match self.parties.create(&party).await {
                Ok(()) => {
                    info!(
                        party_id = %party.id,
                        code = %party.code,
                        admin_id = %admin_id,
                        event_type = %party.event_type,
                        "Party created"
                    );
                    log_party_operation(
                        events::PARTY_CREATED,
                        Some(party.id),
                        Some(&party.code),
                        Some(admin_id),
                        party.status.as_str(),
                        None,
                    );
                    return Ok(party);
                }
                Err(StoreError::Conflict { .. }) => {
                    warn!(attempt = attempt, code = %party.code, "Party code taken concurrently");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            admin_id = %admin_id,
            attempts = self.max_code_attempts,
            "Party code generation exhausted"
        );
        Err(ServiceError::CodeGenerationExhausted {
            attempts: self.max_code_attempts,
        })
    }

    pub async fn get_party_by_id(&self, admin_id: &str, party_id: Uuid) -> Result<Party> {
        let party = self.load(party_id).await?;
        ensure_owner(&party, admin_id)?;
        debug!(party_id = %party_id, "Fetched party");
        Ok(party)
    }

    /// Unauthenticated lookup by join code
    pub async fn get_party_by_code(&self, code: &str) -> Result<Party> {
        let party = self
            .parties
            .get_by_code(code)
            .await?
            .ok_or(ServiceError::NotFound)?;
        debug!(code = %code, party_id = %party.id, "Resolved party code");
        Ok(party)
    }

    pub async fn get_public_party_by_code(&self, code: &str) -> Result<PublicPartyView> {
        Ok(self.get_party_by_code(code).await?.public_view())
    }

    pub async fn list_parties_by_admin(&self, admin_id: &str) -> Result<Vec<Party>> {
        let parties = self.parties.list_by_admin(admin_id).await?;
        debug!(admin_id = %admin_id, count = parties.len(), "Listed parties");
        Ok(parties)
    }

    pub async fn delete_party(&self, admin_id: &str, party_id: Uuid) -> Result<()> {
        let party = self.load(party_id).await?;
        ensure_owner(&party, admin_id)?;

        self.parties.delete(party_id).await?;

        info!(party_id = %party_id, admin_id = %admin_id, "Party deleted");
        log_party_operation(
            events::PARTY_DELETED,
            Some(party_id),
            Some(&party.code),
            Some(admin_id),
            "deleted",
            None,
        );
        Ok(())
    }

    /// Close voting. Only the owning admin may close, and only once.
    pub async fn close_party(&self, caller: &CallerIdentity, party_id: Uuid) -> Result<Party> {
        let mut party = self.load(party_id).await?;
        ensure_admin_owner(&party, caller)?;

        let next = next_party_status(party.status, PartyEvent::Close)
            .map_err(|_| ServiceError::PartyClosed)?;
        self.parties
            .update_status(party_id, party.status, next)
            .await
            .map_err(|err| {
                if err.is_conflict() {
                    warn!(party_id = %party_id, "Party was closed concurrently");
                    ServiceError::PartyClosed
                } else {
                    err.into()
                }
            })?;
        party.status = next;

        info!(party_id = %party_id, caller = %caller, "Party closed");
        log_party_operation(
            events::PARTY_CLOSED,
            Some(party_id),
            Some(&party.code),
            caller.admin_id(),
            party.status.as_str(),
            None,
        );
        Ok(party)
    }

    pub(crate) async fn load(&self, party_id: Uuid) -> Result<Party> {
        self.parties
            .get_by_id(party_id)
            .await?
            .ok_or(ServiceError::NotFound)
    }
}
