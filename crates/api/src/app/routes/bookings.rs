use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::get};
use serde::Deserialize;

use miranda_hotel::{Booking, BookingStatus};
use miranda_infra::Repository;

use crate::app::errors::ApiError;
use crate::app::extract::ApiQuery;
use crate::app::routes::crud::{self, Resource};
use crate::app::services::AppServices;

impl Resource for Booking {
    fn repository(services: &AppServices) -> &Repository<Self> {
        &services.bookings
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
}

/// Mounted at `/booking` (singular, as the dashboard calls it).
pub fn router() -> Router {
    Router::new()
        .route("/", get(list_bookings).post(crud::create::<Booking>))
        .route("/:id", crud::item::<Booking>())
}

/// Bookings ordered by check-in date, optionally filtered by status.
pub async fn list_bookings(
    Extension(services): Extension<Arc<AppServices>>,
    ApiQuery(filter): ApiQuery<BookingFilter>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let mut bookings = services.bookings.list().await?;
    if let Some(status) = filter.status {
        bookings.retain(|b| b.status == status);
    }
    bookings.sort_by_key(|b| b.check_in);
    Ok(Json(bookings))
}
