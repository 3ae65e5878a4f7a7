use sea_orm::*;
use uuid::Uuid;

use crate::models::service_images::{self, AddServiceImage, UpdateServiceImage};

/// Insert a new image record for a service.
pub async fn insert_service_image(
    db: &DatabaseConnection,
    service_id: Uuid,
    input: AddServiceImage,
) -> Result<service_images::Model, DbErr> {
    let new_image = service_images::ActiveModel {
        id: Set(Uuid::new_v4()),
        service_id: Set(service_id),
        image_url: Set(input.image_url),
        description: Set(input.description),
        is_thumbnail: Set(input.is_thumbnail.unwrap_or(false)),
        created_at: Set(chrono::Utc::now()),
    };

    new_image.insert(db).await
}

/// Fetch all images of a service, thumbnail first.
pub async fn get_images_by_service(
    db: &DatabaseConnection,
    service_id: Uuid,
) -> Result<Vec<service_images::Model>, DbErr> {
    service_images::Entity::find()
        .filter(service_images::Column::ServiceId.eq(service_id))
        .order_by_desc(service_images::Column::IsThumbnail)
        .order_by_asc(service_images::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single image by ID.
pub async fn get_image_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<service_images::Model>, DbErr> {
    service_images::Entity::find_by_id(id).one(db).await
}

/// Update an existing image record.
pub async fn update_service_image(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateServiceImage,
) -> Result<service_images::Model, DbErr> {
    let image = service_images::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Service image not found".to_string()))?;

    let mut active: service_images::ActiveModel = image.into();

    if let Some(url) = input.image_url {
        active.image_url = Set(url);
    }
    if let Some(description) = input.description {
        active.description = Set(Some(description));
    }
    if let Some(is_thumbnail) = input.is_thumbnail {
        active.is_thumbnail = Set(is_thumbnail);
    }

    active.update(db).await
}

/// Delete an image record by ID.
pub async fn delete_service_image(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    service_images::Entity::delete_by_id(id).exec(db).await
}
