use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode};
use chrono::Utc;

use crate::app::dto::{LoginRequest, LoginResponse, LoginUser};
use crate::app::errors::ApiError;
use crate::app::extract::ApiJson;
use crate::app::services::{ADMIN_SUBJECT, AppServices};

/// Exchange the dashboard credentials for a signed token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if !services.credentials.verify(&body.email, &body.password) {
        tracing::warn!("login rejected");
        return Err(ApiError::new("Invalid credentials", StatusCode::UNAUTHORIZED, true));
    }

    let email = services.credentials.email().to_owned();
    let token = services
        .issuer
        .issue(ADMIN_SUBJECT, &email, Utc::now())
        .map_err(|e| ApiError::from_message(format!("token issue failed: {e}")))?;

    tracing::info!("login succeeded");
    Ok(Json(LoginResponse {
        token,
        user: LoginUser { email },
    }))
}
