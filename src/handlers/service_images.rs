use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::is_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::service_images as image_db;
use crate::db::services as service_db;
use crate::error::ApiError;
use crate::models::service_images::{AddServiceImage, UpdateServiceImage};

/// POST /api/services/{service_id}/images — attach an image to a service
/// (service owner only).
pub async fn add_service_image(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<AddServiceImage>,
) -> Result<HttpResponse, ApiError> {
    let service_id = path.into_inner();

    let service = service_db::get_service_by_id(db.get_ref(), service_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {service_id} not found")))?;

    if service.user_id != user.0.id {
        return Err(ApiError::forbidden(
            "Only the service owner can add images",
        ));
    }

    let input = body.into_inner();
    if input.image_url.trim().is_empty() {
        return Err(ApiError::validation("image_url is required"));
    }

    let image = image_db::insert_service_image(db.get_ref(), service_id, input).await?;
    Ok(HttpResponse::Created().json(image))
}

/// GET /api/services/{service_id}/images — list a service's images (public).
pub async fn get_service_images(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let service_id = path.into_inner();

    service_db::get_service_by_id(db.get_ref(), service_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {service_id} not found")))?;

    let images = image_db::get_images_by_service(db.get_ref(), service_id).await?;
    Ok(HttpResponse::Ok().json(images))
}

/// PUT /api/service-images/{id} — update an image record (owner or admin).
pub async fn update_service_image(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateServiceImage>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let image = image_db::get_image_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service image {id} not found")))?;

    authorize_image_owner(&user, db.get_ref(), image.service_id).await?;

    let updated = image_db::update_service_image(db.get_ref(), id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/service-images/{id} — delete an image record (owner or admin).
pub async fn delete_service_image(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let image = image_db::get_image_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service image {id} not found")))?;

    authorize_image_owner(&user, db.get_ref(), image.service_id).await?;

    image_db::delete_service_image(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Service image {id} deleted"),
    })))
}

async fn authorize_image_owner(
    user: &AuthenticatedUser,
    db: &DatabaseConnection,
    service_id: Uuid,
) -> Result<(), ApiError> {
    if is_admin(&user.0) {
        return Ok(());
    }

    let service = service_db::get_service_by_id(db, service_id)
        .await?
        .ok_or_else(|| {
            ApiError::not_found("The service associated with this image no longer exists")
        })?;

    if service.user_id != user.0.id {
        return Err(ApiError::forbidden(
            "You can only manage images of your own services",
        ));
    }
    Ok(())
}
