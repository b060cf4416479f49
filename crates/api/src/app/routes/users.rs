use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::get};
use serde::Deserialize;

use miranda_hotel::{User, UserStatus};
use miranda_infra::Repository;

use crate::app::errors::ApiError;
use crate::app::extract::ApiQuery;
use crate::app::routes::crud::{self, Resource};
use crate::app::services::AppServices;

impl Resource for User {
    fn repository(services: &AppServices) -> &Repository<Self> {
        &services.users
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserFilter {
    pub status: Option<UserStatus>,
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users).post(crud::create::<User>))
        .route("/:id", crud::item::<User>())
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = services.users.list().await?;
    let users = match filter.status {
        Some(status) => users.into_iter().filter(|u| u.status == status).collect(),
        None => users,
    };
    Ok(Json(users))
}
