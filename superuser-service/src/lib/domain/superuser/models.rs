use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::superuser::errors::EmailError;
use crate::superuser::errors::SuperuserIdError;
use crate::superuser::errors::UsernameError;

/// Superuser aggregate entity.
///
/// The single account kind this service manages. Credential state
/// (password hash, reset token, two-factor code) lives here; all of it
/// is read and written through the repository port.
#[derive(Debug, Clone)]
pub struct Superuser {
    pub id: SuperuserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub role: String,
    pub reset_token: Option<String>,
    pub two_factor_code: Option<String>,
    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Superuser {
    pub const DEFAULT_ROLE: &'static str = "superuser";
}

/// Superuser unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuperuserId(pub Uuid);

impl SuperuserId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its string form.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, SuperuserIdError> {
        Uuid::parse_str(s)
            .map(SuperuserId)
            .map_err(|e| SuperuserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for SuperuserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SuperuserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// 3-32 characters, alphanumeric plus underscore and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Validate and wrap a raw username string.
    ///
    /// # Errors
    /// * `TooShort` / `TooLong` - Length outside 3-32
    /// * `InvalidCharacters` - Anything beyond alphanumeric, `_`, `-`
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates format using an RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap a raw email string.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new superuser with validated fields.
#[derive(Debug)]
pub struct RegisterSuperuserCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterSuperuserCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to update an existing profile.
///
/// Only provided fields are touched; a password change is re-hashed by
/// the service.
#[derive(Debug)]
pub struct UpdateProfileCommand {
    pub username: Option<Username>,
    pub password: Option<String>,
}

/// One recorded account activity entry.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    pub id: Uuid,
    pub superuser_id: SuperuserId,
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
}

impl ActivityLog {
    /// Create a new entry stamped with the current time.
    pub fn new(superuser_id: SuperuserId, action: impl ToString) -> Self {
        Self {
            id: Uuid::new_v4(),
            superuser_id,
            action: action.to_string(),
            timestamp: Utc::now(),
            ip_address: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("al".to_string()).is_err());
        assert!(Username::new("a".repeat(33)).is_err());
        assert!(Username::new("alice!".to_string()).is_err());
        assert!(Username::new("alice_01-x".to_string()).is_ok());
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
    }

    #[test]
    fn test_superuser_id_round_trip() {
        let id = SuperuserId::new();
        let parsed = SuperuserId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);

        assert!(SuperuserId::from_string("not-a-uuid").is_err());
    }
}
