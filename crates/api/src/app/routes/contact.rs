use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::put};

use miranda_hotel::ContactMessage;
use miranda_infra::Repository;

use crate::app::errors::ApiError;
use crate::app::extract::IdPath;
use crate::app::routes::crud::{self, Resource};
use crate::app::services::AppServices;

impl Resource for ContactMessage {
    fn repository(services: &AppServices) -> &Repository<Self> {
        &services.contact
    }
}

pub fn router() -> Router {
    crud::router::<ContactMessage>()
        .route("/:id/archive", put(archive))
        .route("/:id/unarchive", put(unarchive))
}

pub async fn archive(
    Extension(services): Extension<Arc<AppServices>>,
    IdPath(id): IdPath,
) -> Result<Json<ContactMessage>, ApiError> {
    set_archived(&services, id, true).await.map(Json)
}

pub async fn unarchive(
    Extension(services): Extension<Arc<AppServices>>,
    IdPath(id): IdPath,
) -> Result<Json<ContactMessage>, ApiError> {
    set_archived(&services, id, false).await.map(Json)
}

async fn set_archived(
    services: &AppServices,
    id: miranda_core::DocumentId,
    archived: bool,
) -> Result<ContactMessage, ApiError> {
    let mut message = services.contact.get(id).await?;
    message.archived = archived;
    Ok(services.contact.update(id, message).await?)
}
