use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::get};
use serde::Deserialize;

use miranda_hotel::{Room, RoomStatus};
use miranda_infra::Repository;

use crate::app::errors::ApiError;
use crate::app::extract::ApiQuery;
use crate::app::routes::crud::{self, Resource};
use crate::app::services::AppServices;

impl Resource for Room {
    fn repository(services: &AppServices) -> &Repository<Self> {
        &services.rooms
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_rooms).post(crud::create::<Room>))
        .route("/:id", crud::item::<Room>())
}

/// `GET /rooms[?status=Available|Booked]`
pub async fn list_rooms(
    Extension(services): Extension<Arc<AppServices>>,
    ApiQuery(filter): ApiQuery<RoomFilter>,
) -> Result<Json<Vec<Room>>, ApiError> {
    let mut rooms = services.rooms.list().await?;
    if let Some(status) = filter.status {
        rooms.retain(|r| r.status == status);
    }
    Ok(Json(rooms))
}
