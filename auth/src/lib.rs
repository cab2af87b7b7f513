//! Authentication utilities library
//!
//! Provides the building blocks for credential and session handling:
//! - Password hashing (Argon2id)
//! - Bearer token issuance and validation with two interchangeable
//!   backends: signed claims (JWT HS256) and encrypted claims
//!   (PASETO v4.local)
//!
//! The service defines its own domain traits and adapts these
//! implementations, keeping the cryptographic plumbing out of the
//! domain layer.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Token Lifecycle
//! ```
//! use auth::{TokenBackend, TokenConfig, TokenManager};
//!
//! let config = TokenConfig {
//!     backend: TokenBackend::Jwt,
//!     symmetric_key: "secret_key_that_is_32_bytes_long".to_string(),
//!     access_token_lifetime: chrono::Duration::hours(24),
//! };
//! let manager = TokenManager::from_config(&config).unwrap();
//!
//! let token = manager.issue("user123").unwrap();
//! let claims = manager.verify(&token).unwrap();
//! assert_eq!(claims.user_id, "user123");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::JwtTokenCodec;
pub use token::PasetoTokenCodec;
pub use token::TokenBackend;
pub use token::TokenClaims;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenManager;
