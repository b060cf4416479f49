//! Field-level validation helpers shared by the document types.

use crate::{DomainError, DomainResult};

/// Reject empty or whitespace-only strings.
pub fn non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

/// Reject negative (or NaN) amounts.
pub fn non_negative(field: &str, value: f64) -> DomainResult<()> {
    if value.is_nan() || value < 0.0 {
        return Err(DomainError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Minimal email shape check: a non-empty local part and domain around one `@`.
pub fn email(field: &str, value: &str) -> DomainResult<()> {
    non_blank(field, value)?;
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(DomainError::validation(format!("{field} must be a valid email"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_rejected() {
        assert!(non_blank("name", "  ").is_err());
        assert!(non_blank("name", "Suite").is_ok());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(non_negative("rate", -1.0).is_err());
        assert!(non_negative("rate", f64::NAN).is_err());
        assert!(non_negative("rate", 0.0).is_ok());
    }

    #[test]
    fn email_shape() {
        assert!(email("email", "ana@miranda.com").is_ok());
        assert!(email("email", "ana.miranda.com").is_err());
        assert!(email("email", "@miranda.com").is_err());
        assert!(email("email", "a@b@c").is_err());
    }
}
