use thiserror::Error;

/// Error for SuperuserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SuperuserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all superuser operations
#[derive(Debug, Clone, Error)]
pub enum SuperuserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid superuser ID: {0}")]
    InvalidSuperuserId(#[from] SuperuserIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::TokenError),

    // Domain-level errors
    #[error("Superuser not found: {0}")]
    NotFound(String),

    #[error("Email already in use: {0}")]
    EmailInUse(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Invalid two-factor code")]
    InvalidTwoFactorCode,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for SuperuserError {
    fn from(err: anyhow::Error) -> Self {
        SuperuserError::Unknown(err.to_string())
    }
}
