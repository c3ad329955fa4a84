use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::constants::events;
use crate::error::{Result, ServiceError};
use crate::models::{validate_profile_username, UserProfile};
use crate::store::ProfileStore;

/// Admin profiles keyed by identity-provider user id
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileStore>,
}

impl fmt::Debug for ProfileService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileService").finish_non_exhaustive()
    }
}

impl ProfileService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    pub async fn upsert_profile(
        &self,
        user_id: &str,
        email: &str,
        username: &str,
    ) -> Result<UserProfile> {
        validate_profile_username(username)?;

        let profile = UserProfile {
            id: user_id.to_string(),
            username: username.to_string(),
            email: email.to_string(),
        };
        self.profiles.upsert(&profile).await?;

        info!(event = events::PROFILE_UPSERTED, user_id = %user_id, username = %username, "Profile saved");
        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile> {
        let profile = self
            .profiles
            .get_by_id(user_id)
            .await?
            .ok_or(ServiceError::NotFound)?;
        debug!(user_id = %user_id, "Fetched profile");
        Ok(profile)
    }
}
