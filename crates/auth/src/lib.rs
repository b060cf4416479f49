//! `miranda-auth`: bearer-token authentication boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how to
//! mint and verify signed tokens and how to check the administrator login.

pub mod claims;
pub mod credentials;
pub mod token;

pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use credentials::AdminCredentials;
pub use token::{Hs256JwtIssuer, Hs256JwtValidator, JwtIssuer, JwtValidator, TokenError};
