use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;

/// Signed-claims token codec (JWT, HMAC-SHA256).
///
/// Claims are tamper-evident but readable by anyone holding the token.
/// Verification accepts HS256 only; a token declaring any other
/// algorithm (including `none`) is rejected outright.
pub struct JwtTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtTokenCodec {
    /// Create a codec from a symmetric secret.
    ///
    /// The secret should be at least 256 bits and live in configuration,
    /// never in code.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Encode and sign claims into a token string.
    ///
    /// # Errors
    /// * `IssueFailed` - Serialization or signing failed
    pub fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::IssueFailed(e.to_string()))
    }

    /// Verify the signature and decode the claims.
    ///
    /// Expiry is carried in `expire_at` and enforced by the manager, so
    /// the registered `exp` claim is not required here.
    ///
    /// # Errors
    /// * `Invalid` - Malformed token, signature mismatch, or unexpected
    ///   signing algorithm
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    // {"alg":"none","typ":"JWT"} / {"alg":"HS384","typ":"JWT"}
    const NONE_HEADER: &str = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0";
    const HS384_HEADER: &str = "eyJhbGciOiJIUzM4NCIsInR5cCI6IkpXVCJ9";

    fn claims() -> TokenClaims {
        TokenClaims {
            user_id: "user123".to_string(),
            expire_at: 4102444800, // far future
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let codec = JwtTokenCodec::new(SECRET);

        let token = codec.issue(&claims()).expect("Failed to issue token");
        assert!(!token.is_empty());

        let decoded = codec.verify(&token).expect("Failed to verify token");
        assert_eq!(decoded, claims());
    }

    #[test]
    fn test_verify_garbage_token() {
        let codec = JwtTokenCodec::new(SECRET);

        let result = codec.verify("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let codec1 = JwtTokenCodec::new(b"secret1_at_least_32_bytes_long_key!");
        let codec2 = JwtTokenCodec::new(b"secret2_at_least_32_bytes_long_key!");

        let token = codec1.issue(&claims()).expect("Failed to issue token");

        assert!(codec2.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let codec = JwtTokenCodec::new(SECRET);
        let token = codec.issue(&claims()).expect("Failed to issue token");

        let mut parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        // Flip one character of the payload segment
        let mut payload = parts[1].to_string();
        let flipped = if payload.ends_with('A') { "B" } else { "A" };
        payload.replace_range(payload.len() - 1.., flipped);
        parts[1] = &payload;

        let tampered = parts.join(".");
        assert!(codec.verify(&tampered).is_err());
    }

    #[test]
    fn test_verify_rejects_none_algorithm() {
        let codec = JwtTokenCodec::new(SECRET);
        let token = codec.issue(&claims()).expect("Failed to issue token");

        let payload = token.split('.').nth(1).unwrap();
        let forged = format!("{}.{}.", NONE_HEADER, payload);

        assert!(codec.verify(&forged).is_err());
    }

    #[test]
    fn test_verify_rejects_algorithm_substitution() {
        let codec = JwtTokenCodec::new(SECRET);
        let token = codec.issue(&claims()).expect("Failed to issue token");

        let mut parts: Vec<&str> = token.split('.').collect();
        parts[0] = HS384_HEADER;
        let forged = parts.join(".");

        assert!(codec.verify(&forged).is_err());
    }
}
