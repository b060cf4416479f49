//! Request-level error value and the single place it becomes an HTTP response.
//!
//! Handlers and middleware return `Result<_, ApiError>`; nothing else writes
//! error responses. Whether the caller sees the real message is decided by the
//! `safe` flag set where the failure was detected.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use miranda_core::DomainError;
use miranda_infra::StoreError;

/// Message shown to callers for any error not marked safe.
pub const GENERIC_MESSAGE: &str = "Error in the application";

/// A request-level failure: message, HTTP status and exposure flag.
///
/// Immutable once built; consumed by [`IntoResponse::into_response`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    message: String,
    status: StatusCode,
    safe: bool,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: StatusCode, safe: bool) -> Self {
        Self {
            message: message.into(),
            status,
            safe,
        }
    }

    /// Internal error (500), message hidden from the caller.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR, false)
    }

    /// Error with an explicit status, message hidden from the caller.
    pub fn from_status(message: impl Into<String>, status: StatusCode) -> Self {
        Self::new(message, status, false)
    }

    /// Internal error (500) with a caller-chosen exposure flag.
    pub fn from_safe(message: impl Into<String>, safe: bool) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR, safe)
    }

    pub fn unauthorized() -> Self {
        Self::new("Unauthorized", StatusCode::UNAUTHORIZED, true)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND, true)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, true)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// What the caller is allowed to see.
    pub fn public_message(&self) -> &str {
        if self.safe { &self.message } else { GENERIC_MESSAGE }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), safe = self.safe, error = %self.message, "request failed");
        } else {
            tracing::warn!(status = self.status.as_u16(), safe = self.safe, error = %self.message, "request rejected");
        }

        let body = Json(json!({ "message": self.public_message() }));
        (self.status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::bad_request(msg),
            DomainError::InvalidId(_) => Self::bad_request("Invalid id"),
            DomainError::NotFound(kind) => Self::not_found(format!("{kind} not found")),
            DomainError::Conflict(msg) => Self::new(msg, StatusCode::CONFLICT, true),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(kind) => Self::not_found(format!("{kind} not found")),
            StoreError::Invalid(domain) => domain.into(),
            StoreError::Conflict(detail) => {
                tracing::warn!(%detail, "document conflict");
                Self::new("Document already exists", StatusCode::CONFLICT, true)
            }
            other @ (StoreError::Serialization(_) | StoreError::Backend(_)) => Self::from_message(other.to_string()),
        }
    }
}

/// Any other failure is an implicit internal, unsafe error.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::from_message(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use proptest::prelude::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    proptest! {
        #[test]
        fn from_message_is_internal_and_unsafe(message in ".*") {
            let err = ApiError::from_message(message.clone());
            prop_assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            prop_assert!(!err.is_safe());
            prop_assert_eq!(err.message(), message.as_str());
        }

        #[test]
        fn from_status_keeps_status_and_is_unsafe(message in ".*", code in 100u16..=599) {
            let status = StatusCode::from_u16(code).unwrap();
            let err = ApiError::from_status(message, status);
            prop_assert_eq!(err.status(), status);
            prop_assert!(!err.is_safe());
        }

        #[test]
        fn from_safe_is_internal_with_given_flag(message in ".*", safe in any::<bool>()) {
            let err = ApiError::from_safe(message, safe);
            prop_assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            prop_assert_eq!(err.is_safe(), safe);
        }
    }

    #[tokio::test]
    async fn safe_errors_expose_their_message() {
        let err = ApiError::new("Room not found", StatusCode::NOT_FOUND, true);
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Room not found" }));
    }

    #[tokio::test]
    async fn unsafe_errors_hide_their_message() {
        let err = ApiError::from_message("connection reset by peer");
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": GENERIC_MESSAGE }));
    }

    #[tokio::test]
    async fn unsafe_client_errors_hide_their_message_too() {
        let (status, body) = body_of(ApiError::from_status("quota table missing", StatusCode::FORBIDDEN)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], GENERIC_MESSAGE);
    }

    #[test]
    fn store_failures_map_by_category() {
        let not_found: ApiError = StoreError::NotFound("Room").into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.public_message(), "Room not found");

        let invalid: ApiError = StoreError::Invalid(DomainError::validation("number is required")).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.public_message(), "number is required");

        let conflict: ApiError = StoreError::Conflict("rooms/1".to_string()).into();
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let backend: ApiError = StoreError::Backend("pool timed out".to_string()).into();
        assert_eq!(backend.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!backend.is_safe());
        assert_eq!(backend.public_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn invalid_ids_do_not_echo_parser_detail() {
        let err: ApiError = DomainError::invalid_id("DocumentId: invalid character").into();
        assert_eq!(err.public_message(), "Invalid id");
    }

    #[test]
    fn anyhow_errors_are_internal() {
        let err: ApiError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_safe());
    }
}
