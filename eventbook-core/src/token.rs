//! Signed bearer-token encoding and decoding
//!
//! Tokens are HS256 JWTs carrying a subject and an absolute expiry.
//! The signing key is injected at construction and never read from
//! process-global state.

use crate::error::AuthError;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Claims embedded in every token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (unix timestamp)
    pub iat: i64,
    /// Expiration time (unix timestamp)
    pub exp: i64,
}

impl Claims {
    fn new(subject: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }
}

/// Token encoder/decoder bound to one signing key and a default ttl
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from the configured signing secret and default
    /// token lifetime.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Default token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint a signed token for `subject` using the default ttl.
    pub fn mint(&self, subject: &str) -> Result<String, AuthError> {
        self.mint_with_ttl(subject, self.ttl)
    }

    /// Mint a signed token for `subject` with an explicit ttl.
    pub fn mint_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        let claims = Claims::new(subject, ttl);
        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            debug!("Failed to encode token: {}", e);
            AuthError::TokenCreation
        })
    }

    /// Verify signature and expiry, returning the embedded claims.
    ///
    /// Every failure collapses to `InvalidToken`; callers cannot tell a
    /// bad signature from a malformed token from an expired one.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token verification failed: {}", e);
                AuthError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"test-signing-secret", Duration::minutes(60))
    }

    #[test]
    fn minted_token_decodes_to_subject() {
        let codec = codec();
        let token = codec.mint("user-1").unwrap();
        let claims = codec.decode(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_invalid() {
        let codec = codec();
        let token = codec.mint_with_ttl("user-1", Duration::seconds(-30)).unwrap();
        assert_eq!(codec.decode(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn wrong_key_is_invalid() {
        let token = codec().mint("user-1").unwrap();
        let other = TokenCodec::new(b"a-different-secret", Duration::minutes(60));
        assert_eq!(other.decode(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let codec = codec();
        let token = codec.mint("user-1").unwrap();

        // Swap the payload segment for one from a token asserting a
        // different subject; the signature no longer matches.
        let forged_source = codec.mint("user-2").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged_source.split('.').collect();
        parts[1] = forged_parts[1];
        let tampered = parts.join(".");

        assert_eq!(codec.decode(&tampered), Err(AuthError::InvalidToken));
    }

    #[test]
    fn garbage_is_invalid_not_a_panic() {
        let codec = codec();
        assert_eq!(codec.decode(""), Err(AuthError::InvalidToken));
        assert_eq!(codec.decode("not.a.jwt"), Err(AuthError::InvalidToken));
        assert_eq!(codec.decode("a.b"), Err(AuthError::InvalidToken));
    }
}
