use serde::{Deserialize, Serialize};

use crate::constants::{USERNAME_MAX_LENGTH, USERNAME_MIN_LENGTH};
use crate::error::{Result, ServiceError};

/// Admin profile keyed by the identity provider's user id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
}

/// Profile usernames are 3-30 characters of ASCII letters, digits or underscore.
pub fn validate_profile_username(username: &str) -> Result<()> {
    let length = username.chars().count();
    if !(USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
        return Err(ServiceError::InvalidUsername(format!(
            "username must be between {USERNAME_MIN_LENGTH} and {USERNAME_MAX_LENGTH} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ServiceError::InvalidUsername(
            "username must contain only alphanumeric characters and underscores".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_usernames() {
        let longest = "x".repeat(30);
        for name in ["abc", "party_host_2025", "A_1", longest.as_str()] {
            assert!(validate_profile_username(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_rejects_invalid_usernames() {
        let too_long = "x".repeat(31);
        for name in ["ab", "", too_long.as_str(), "has space", "dash-name", "émile"] {
            assert!(
                matches!(
                    validate_profile_username(name),
                    Err(ServiceError::InvalidUsername(_))
                ),
                "{name}"
            );
        }
    }
}
