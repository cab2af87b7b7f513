use pasetors::keys::SymmetricKey;
use pasetors::token::UntrustedToken;
use pasetors::version4::LocalToken;
use pasetors::version4::V4;
use pasetors::Local;

use super::claims::TokenClaims;
use super::errors::TokenError;

/// Encrypted-claims token codec (PASETO v4.local).
///
/// Claims are authenticated-encrypted with XChaCha20-Poly1305: only
/// holders of the symmetric key can read or forge them. Same integrity
/// guarantee as the signed variant, stronger confidentiality.
pub struct PasetoTokenCodec {
    key: SymmetricKey<V4>,
}

impl PasetoTokenCodec {
    /// Create a codec from a symmetric key.
    ///
    /// # Errors
    /// * `InvalidKey` - The key is not exactly 32 bytes
    pub fn new(key: &[u8]) -> Result<Self, TokenError> {
        let key = SymmetricKey::<V4>::from(key).map_err(|e| TokenError::InvalidKey(e.to_string()))?;
        Ok(Self { key })
    }

    /// Encrypt claims into a token string.
    ///
    /// # Errors
    /// * `IssueFailed` - Serialization or encryption failed
    pub fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let payload =
            serde_json::to_vec(claims).map_err(|e| TokenError::IssueFailed(e.to_string()))?;

        LocalToken::encrypt(&self.key, &payload, None, None)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    /// Decrypt a token and decode its claims.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token, failed AEAD check, or a payload
    ///   that does not decode to the expected claims shape
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let untrusted = UntrustedToken::<Local, V4>::try_from(token)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        let trusted = LocalToken::decrypt(&self.key, &untrusted, None, None)
            .map_err(|e| TokenError::Invalid(e.to_string()))?;

        serde_json::from_str(trusted.payload()).map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"symmetric_key_that_is_32_bytes!!";

    fn claims() -> TokenClaims {
        TokenClaims {
            user_id: "user123".to_string(),
            expire_at: 4102444800,
        }
    }

    #[test]
    fn test_rejects_short_key() {
        let result = PasetoTokenCodec::new(b"too_short");
        assert!(matches!(result, Err(TokenError::InvalidKey(_))));
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = PasetoTokenCodec::new(KEY).expect("Failed to create codec");

        let token = codec.issue(&claims()).expect("Failed to issue token");
        assert!(token.starts_with("v4.local."));

        let decoded = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(decoded, claims());
    }

    #[test]
    fn test_claims_are_confidential() {
        let codec = PasetoTokenCodec::new(KEY).expect("Failed to create codec");

        let token = codec.issue(&claims()).expect("Failed to issue token");

        // The ciphertext must not leak the user identifier
        assert!(!token.contains("user123"));
    }

    #[test]
    fn test_verify_with_wrong_key() {
        let codec1 = PasetoTokenCodec::new(KEY).expect("Failed to create codec");
        let codec2 = PasetoTokenCodec::new(b"another_key_that_is_32_bytes_ok!")
            .expect("Failed to create codec");

        let token = codec1.issue(&claims()).expect("Failed to issue token");

        assert!(matches!(codec2.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let codec = PasetoTokenCodec::new(KEY).expect("Failed to create codec");
        let token = codec.issue(&claims()).expect("Failed to issue token");

        // Flip one character in the middle of the ciphertext body
        let mut tampered: Vec<char> = token.chars().collect();
        let middle = tampered.len() / 2;
        tampered[middle] = if tampered[middle] == 'A' { 'B' } else { 'A' };
        let tampered: String = tampered.into_iter().collect();

        assert!(codec.verify(&tampered).is_err());
    }

    #[test]
    fn test_verify_garbage_token() {
        let codec = PasetoTokenCodec::new(KEY).expect("Failed to create codec");

        assert!(codec.verify("not-a-paseto-token").is_err());
        assert!(codec.verify("v4.local.AAAA").is_err());
    }
}
