use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use miranda_auth::JwtValidator;

use crate::app::errors::ApiError;
use crate::context::IdentityContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Gate for protected routes.
///
/// Missing, malformed, forged or expired credentials stop the request with a
/// 401; the handler never runs. On success the verified identity is inserted
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers())?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(reason = %e, "bearer token rejected");
        ApiError::unauthorized()
    })?;

    req.extensions_mut().insert(IdentityContext::from(claims));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(ApiError::unauthorized)?;

    let header = header.to_str().map_err(|_| ApiError::unauthorized())?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or_else(ApiError::unauthorized)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(ApiError::unauthorized());
    }

    Ok(token)
}

/// Upper bound on the time a request may take end to end.
#[derive(Debug, Clone, Copy)]
pub struct RequestTimeout(pub Duration);

/// Drops (cancels) the in-flight handler when the limit is hit and answers 504.
pub async fn timeout_middleware(State(limit): State<RequestTimeout>, req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    match tokio::time::timeout(limit.0, next.run(req)).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(%method, path = %path, limit_ms = limit.0.as_millis() as u64, "request cancelled after timeout");
            ApiError::new("Request timed out", StatusCode::GATEWAY_TIMEOUT, true).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        assert!(extract_bearer(&HeaderMap::new()).is_err());
        assert!(extract_bearer(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(extract_bearer(&headers("Bearer    ")).is_err());
        assert!(extract_bearer(&headers("bearer abc")).is_err());
    }

    #[test]
    fn rejections_are_plain_401s() {
        let err = extract_bearer(&HeaderMap::new()).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "Unauthorized");
    }
}
