//! Signed bearer tokens (HS256 JWT).
//!
//! Issuing and validating are separate traits so the HTTP layer can depend on
//! validation only, and tests can swap either side.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum TokenError {
    /// The token could not be decoded or its signature did not verify.
    #[error("malformed or unsigned token: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    /// The signature verified but the claims are outside their validity window.
    #[error(transparent)]
    Claims(#[from] TokenValidationError),

    /// `now + ttl` is outside the representable date range.
    #[error("token lifetime overflows the clock")]
    Lifetime,
}

/// Verifies a bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError>;
}

/// Mints bearer tokens for authenticated principals.
pub trait JwtIssuer: Send + Sync {
    fn issue(&self, sub: &str, email: &str, now: DateTime<Utc>) -> Result<String, TokenError>;
}

/// HS256 validator over a shared secret.
#[derive(Clone)]
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time windows are checked by `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

/// HS256 issuer over a shared secret with a fixed token lifetime.
#[derive(Clone)]
pub struct Hs256JwtIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl Hs256JwtIssuer {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_ref()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl JwtIssuer for Hs256JwtIssuer {
    fn issue(&self, sub: &str, email: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let expires_at = now.checked_add_signed(self.ttl).ok_or(TokenError::Lifetime)?;
        let claims = JwtClaims::new(sub, email, now, expires_at);
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)?;
        tracing::debug!(sub, exp = claims.exp, "issued bearer token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_tokens_validate_with_the_same_secret() {
        let now = Utc::now();
        let issuer = Hs256JwtIssuer::new(SECRET, Duration::minutes(10));
        let token = issuer.issue("admin", "admin@miranda.com", now).unwrap();

        let claims = Hs256JwtValidator::new(SECRET).validate(&token, now).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.email, "admin@miranda.com");
        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let now = Utc::now();
        let token = Hs256JwtIssuer::new(SECRET, Duration::minutes(10))
            .issue("admin", "admin@miranda.com", now)
            .unwrap();

        let err = Hs256JwtValidator::new("other-secret").validate(&token, now).unwrap_err();
        assert!(matches!(err, TokenError::Decode(_)));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let issued = Utc::now() - Duration::hours(2);
        let token = Hs256JwtIssuer::new(SECRET, Duration::minutes(10))
            .issue("admin", "admin@miranda.com", issued)
            .unwrap();

        let err = Hs256JwtValidator::new(SECRET).validate(&token, Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Claims(TokenValidationError::Expired)));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = Hs256JwtValidator::new(SECRET).validate("not.a.jwt", Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Decode(_)));
    }

    #[test]
    fn lifetime_past_the_clock_range_is_an_error() {
        let issuer = Hs256JwtIssuer::new(SECRET, Duration::minutes(100_000_000_000_000));
        let err = issuer.issue("admin", "admin@miranda.com", Utc::now()).unwrap_err();
        assert!(matches!(err, TokenError::Lifetime));
    }
}
