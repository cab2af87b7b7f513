use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;

use super::claims::TokenClaims;
use super::errors::TokenError;
use super::jwt::JwtTokenCodec;
use super::paseto::PasetoTokenCodec;

/// Which token codec a deployment uses.
///
/// Fixed for the process lifetime; the choice is made once at startup
/// and never re-examined per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenBackend {
    /// Signed claims (JWT HS256)
    Jwt,
    /// Encrypted claims (PASETO v4.local)
    Paseto,
}

/// Token configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub backend: TokenBackend,
    pub symmetric_key: String,
    pub access_token_lifetime: Duration,
}

enum Codec {
    Signed(JwtTokenCodec),
    Encrypted(PasetoTokenCodec),
}

/// Uniform issue/verify entry point over the two codec variants.
///
/// `expire_at` is computed here at issuance (`now + lifetime`) and
/// enforced here at verification, so both codecs share one expiry rule.
pub struct TokenManager {
    codec: Codec,
    lifetime: Duration,
}

impl TokenManager {
    /// Build a manager from resolved configuration.
    ///
    /// # Errors
    /// * `InvalidKey` - The PASETO backend was selected with a key that
    ///   is not exactly 32 bytes
    pub fn from_config(config: &TokenConfig) -> Result<Self, TokenError> {
        let codec = match config.backend {
            TokenBackend::Jwt => Codec::Signed(JwtTokenCodec::new(config.symmetric_key.as_bytes())),
            TokenBackend::Paseto => {
                Codec::Encrypted(PasetoTokenCodec::new(config.symmetric_key.as_bytes())?)
            }
        };

        Ok(Self {
            codec,
            lifetime: config.access_token_lifetime,
        })
    }

    /// Configured access-token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for the given user identifier.
    ///
    /// # Errors
    /// * `IssueFailed` - Encoding or encryption failed
    pub fn issue(&self, user_id: &str) -> Result<String, TokenError> {
        let claims = TokenClaims::new(user_id, self.lifetime);

        match &self.codec {
            Codec::Signed(codec) => codec.issue(&claims),
            Codec::Encrypted(codec) => codec.issue(&claims),
        }
    }

    /// Verify a token and return its claims.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token or failed signature/AEAD check
    /// * `Expired` - Integrity check passed but `expire_at` has elapsed
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = match &self.codec {
            Codec::Signed(codec) => codec.verify(token),
            Codec::Encrypted(codec) => codec.verify(token),
        }?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "symmetric_key_that_is_32_bytes!!";

    fn manager(backend: TokenBackend, lifetime: Duration) -> TokenManager {
        TokenManager::from_config(&TokenConfig {
            backend,
            symmetric_key: KEY.to_string(),
            access_token_lifetime: lifetime,
        })
        .expect("Failed to build token manager")
    }

    #[test]
    fn test_issue_and_verify_jwt() {
        let manager = manager(TokenBackend::Jwt, Duration::hours(24));

        let token = manager.issue("user123").expect("Failed to issue token");
        let claims = manager.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.user_id, "user123");
        assert!(claims.expire_at > Utc::now().timestamp());
    }

    #[test]
    fn test_issue_and_verify_paseto() {
        let manager = manager(TokenBackend::Paseto, Duration::hours(24));

        let token = manager.issue("user123").expect("Failed to issue token");
        let claims = manager.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.user_id, "user123");
    }

    #[test]
    fn test_backends_do_not_accept_each_other() {
        let jwt = manager(TokenBackend::Jwt, Duration::hours(1));
        let paseto = manager(TokenBackend::Paseto, Duration::hours(1));

        let jwt_token = jwt.issue("user123").unwrap();
        let paseto_token = paseto.issue("user123").unwrap();

        assert!(paseto.verify(&jwt_token).is_err());
        assert!(jwt.verify(&paseto_token).is_err());
    }

    #[test]
    fn test_verify_expired_token() {
        let manager = manager(TokenBackend::Jwt, Duration::seconds(1));

        let token = manager.issue("user123").expect("Failed to issue token");
        assert!(manager.verify(&token).is_ok());

        std::thread::sleep(std::time::Duration::from_secs(2));

        assert!(matches!(manager.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_verify_already_expired_paseto_token() {
        let manager = manager(TokenBackend::Paseto, Duration::seconds(-10));

        let token = manager.issue("user123").expect("Failed to issue token");
        assert!(matches!(manager.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_paseto_backend_requires_32_byte_key() {
        let result = TokenManager::from_config(&TokenConfig {
            backend: TokenBackend::Paseto,
            symmetric_key: "short".to_string(),
            access_token_lifetime: Duration::hours(1),
        });

        assert!(matches!(result, Err(TokenError::InvalidKey(_))));
    }
}
