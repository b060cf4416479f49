//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repositories and login dependencies shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per collection)
//! - `extract.rs`: extractors that reject with `ApiError`
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: the error value and its one HTTP translation

use std::any::Any;
use std::sync::Arc;

use axum::{
    Extension, Router,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::LatencyUnit;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use miranda_auth::{AdminCredentials, Hs256JwtIssuer, Hs256JwtValidator};
use miranda_infra::DocumentStore;

use crate::app::errors::ApiError;
use crate::config::AppConfig;
use crate::cors::{CorsPolicy, cors_middleware};
use crate::middleware::{self, AuthState, RequestTimeout};

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig, store: Arc<dyn DocumentStore>) -> Router {
    let secret = config.jwt_secret.as_bytes();
    let auth_state = AuthState {
        jwt: Arc::new(Hs256JwtValidator::new(secret)),
    };
    let issuer = Arc::new(Hs256JwtIssuer::new(secret, config.token_ttl));
    let credentials = AdminCredentials::new(&config.admin_email, &config.admin_password);
    let services = Arc::new(services::AppServices::new(store, credentials, issuer));

    let app = Router::new()
        .route("/", get(routes::system::index))
        .route("/health", get(routes::system::health))
        .route("/login", post(routes::login::login))
        .merge(protect(routes::router(), auth_state))
        .fallback(routes::system::not_found)
        .layer(Extension(services));

    with_http_layers(
        app,
        CorsPolicy::new(config.cors_origin.clone()),
        RequestTimeout(config.request_timeout),
    )
}

/// Require a valid bearer token for every route of `router`.
pub fn protect(router: Router, auth: AuthState) -> Router {
    router.layer(from_fn_with_state(auth, middleware::auth_middleware))
}

/// Outer layers shared by every route, outermost first: request trace, CORS,
/// panic catcher, timeout.
pub fn with_http_layers(router: Router, cors: CorsPolicy, timeout: RequestTimeout) -> Router {
    router
        .layer(from_fn_with_state(timeout, middleware::timeout_middleware))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(from_fn_with_state(cors, cors_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).latency_unit(LatencyUnit::Millis)),
        )
}

/// A panicking handler still answers with the generic 500.
fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    };
    ApiError::from_message(format!("handler panicked: {detail}")).into_response()
}
