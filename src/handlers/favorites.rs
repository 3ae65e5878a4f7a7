use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::is_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::favorites as favorite_db;
use crate::db::services as service_db;
use crate::error::ApiError;
use crate::models::favorites::AddFavorite;

/// POST /api/favorites — save a service to the caller's favorites.
/// The (user, service) pair is unique; a second add fails with a conflict.
pub async fn add_favorite(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<AddFavorite>,
) -> Result<HttpResponse, ApiError> {
    let service_id = body.service_id;

    service_db::get_service_by_id(db.get_ref(), service_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {service_id} not found")))?;

    if favorite_db::find_favorite(db.get_ref(), user.0.id, service_id)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("Service is already in your favorites"));
    }

    let favorite = favorite_db::insert_favorite(db.get_ref(), user.0.id, service_id).await?;
    Ok(HttpResponse::Created().json(favorite))
}

/// GET /api/favorites — list the caller's favorites.
pub async fn get_favorites(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let favorites = favorite_db::get_favorites_by_user(db.get_ref(), user.0.id).await?;
    Ok(HttpResponse::Ok().json(favorites))
}

/// GET /api/favorites/check/{service_id} — whether a service is already in
/// the caller's favorites.
pub async fn check_favorite(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let service_id = path.into_inner();
    let favorite = favorite_db::find_favorite(db.get_ref(), user.0.id, service_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "is_favorite": favorite.is_some(),
    })))
}

/// DELETE /api/favorites/{id} — remove a favorite (owner or admin).
pub async fn remove_favorite(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let favorite = favorite_db::get_favorite_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Favorite {id} not found")))?;

    if favorite.user_id != user.0.id && !is_admin(&user.0) {
        return Err(ApiError::forbidden(
            "You can only remove your own favorites",
        ));
    }

    favorite_db::delete_favorite(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Favorite {id} removed"),
    })))
}
