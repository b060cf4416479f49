use axum::{Router, routing::get};

pub mod bookings;
pub mod contact;
pub mod crud;
pub mod login;
pub mod rooms;
pub mod system;
pub mod users;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/rooms", rooms::router())
        .nest("/users", users::router())
        .nest("/booking", bookings::router())
        .nest("/contact", contact::router())
}
