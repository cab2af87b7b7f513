use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by an access token.
///
/// A fixed-shape record rather than a key/value bag: the two fields are
/// all the service ever reads, and decoding validates the shape up front.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Owning user identifier (string form of the UUID)
    pub user_id: String,

    /// Absolute expiry (Unix timestamp, seconds)
    pub expire_at: i64,
}

impl TokenClaims {
    /// Create claims expiring `lifetime` from now.
    pub fn new(user_id: impl ToString, lifetime: Duration) -> Self {
        Self {
            user_id: user_id.to_string(),
            expire_at: (Utc::now() + lifetime).timestamp(),
        }
    }

    /// Whether the claims have expired at `now` (Unix seconds).
    ///
    /// The expiry instant itself counts as expired.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expire_at <= now
    }
}
