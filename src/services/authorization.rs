//! Ownership and caller guards shared by the services.

use tracing::warn;
use uuid::Uuid;

use crate::error::{Result, ServiceError};
use crate::identity::CallerIdentity;
use crate::models::Party;

fn deny(party: &Party, caller: &str, reason: &str) -> ServiceError {
    warn!(party_id = %party.id, caller = %caller, reason = %reason, "Authorization denied");
    ServiceError::Unauthorized
}

/// The admin must own the party
pub fn ensure_owner(party: &Party, admin_id: &str) -> Result<()> {
    if party.is_owned_by(admin_id) {
        Ok(())
    } else {
        Err(deny(party, admin_id, "not the party owner"))
    }
}

/// Admins must own the party; guests and anonymous callers pass
pub fn ensure_caller_may_access(party: &Party, caller: &CallerIdentity) -> Result<()> {
    match caller {
        CallerIdentity::Admin(admin_id) => ensure_owner(party, admin_id),
        CallerIdentity::Guest(_) | CallerIdentity::Anonymous => Ok(()),
    }
}

/// Only the owning admin passes
pub fn ensure_admin_owner(party: &Party, caller: &CallerIdentity) -> Result<()> {
    match caller {
        CallerIdentity::Admin(admin_id) => ensure_owner(party, admin_id),
        other => Err(deny(party, &other.to_string(), "admin identity required")),
    }
}

/// Acting on a guest's ballot: the owning admin, the guest itself, or an anonymous caller
pub fn ensure_may_act_for_guest(
    party: &Party,
    caller: &CallerIdentity,
    guest_id: Uuid,
) -> Result<()> {
    match caller {
        CallerIdentity::Admin(admin_id) => ensure_owner(party, admin_id),
        CallerIdentity::Guest(id) if *id == guest_id => Ok(()),
        CallerIdentity::Guest(id) => Err(deny(
            party,
            &id.to_string(),
            "guest may only act on its own ballot",
        )),
        CallerIdentity::Anonymous => Ok(()),
    }
}
