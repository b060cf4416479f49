use chrono::{DateTime, TimeZone, Utc};

use miranda_auth::JwtClaims;

/// Authenticated identity for a request.
///
/// Built once by the auth middleware from verified claims and inserted into the
/// request extensions; never mutated and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    subject: String,
    email: String,
    expires_at: DateTime<Utc>,
}

impl IdentityContext {
    pub fn new(subject: impl Into<String>, email: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.into(),
            email: email.into(),
            expires_at,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

impl From<JwtClaims> for IdentityContext {
    fn from(claims: JwtClaims) -> Self {
        let expires_at = Utc.timestamp_opt(claims.exp, 0).single().unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            subject: claims.sub,
            email: claims.email,
            expires_at,
        }
    }
}
