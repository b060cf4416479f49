//! Handlers shared by every document collection.
//!
//! Each collection module implements [`Resource`] and mounts [`router`];
//! the handlers below are generic over the document type.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    routing::{MethodRouter, get},
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use miranda_core::Entity;
use miranda_infra::Repository;

use crate::app::dto::MessageResponse;
use crate::app::errors::ApiError;
use crate::app::extract::{ApiJson, IdPath};
use crate::app::services::AppServices;

/// A document type exposed as a REST collection.
pub trait Resource: Entity + Serialize + DeserializeOwned + Send + Sync + Sized + 'static {
    fn repository(services: &AppServices) -> &Repository<Self>;
}

pub async fn list<T: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(T::repository(&services).list().await?))
}

pub async fn show<T: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    IdPath(id): IdPath,
) -> Result<Json<T>, ApiError> {
    Ok(Json(T::repository(&services).get(id).await?))
}

pub async fn create<T: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    ApiJson(doc): ApiJson<T>,
) -> Result<(StatusCode, Json<T>), ApiError> {
    let created = T::repository(&services).create(doc).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update<T: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    IdPath(id): IdPath,
    ApiJson(doc): ApiJson<T>,
) -> Result<Json<T>, ApiError> {
    Ok(Json(T::repository(&services).update(id, doc).await?))
}

pub async fn destroy<T: Resource>(
    Extension(services): Extension<Arc<AppServices>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    T::repository(&services).delete(id).await?;
    Ok(Json(MessageResponse::new(format!("{} deleted", T::KIND))))
}

/// `GET | PUT | DELETE /:id`.
pub fn item<T: Resource>() -> MethodRouter {
    get(show::<T>).put(update::<T>).delete(destroy::<T>)
}

/// The plain collection: `GET | POST /` plus [`item`].
pub fn router<T: Resource>() -> Router {
    Router::new()
        .route("/", get(list::<T>).post(create::<T>))
        .route("/:id", item::<T>())
}
