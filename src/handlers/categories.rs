use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::is_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys, ttl};
use crate::db::categories as category_db;
use crate::error::ApiError;
use crate::models::categories::{CreateCategory, UpdateCategory};

/// GET /api/categories — list all categories (public).
pub async fn get_categories(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
) -> Result<HttpResponse, ApiError> {
    let cache_key = keys::category_list();

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {e}"),
    }

    let categories = category_db::get_all_categories(db.get_ref()).await?;
    let _ = cache.set(&cache_key, &categories, Some(ttl::CATEGORIES)).await;
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{id} — get a single category (public).
pub async fn get_category(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let category = category_db::get_category_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Category {id} not found")))?;

    Ok(HttpResponse::Ok().json(category))
}

/// POST /api/categories — create a category (admin only).
pub async fn create_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreateCategory>,
) -> Result<HttpResponse, ApiError> {
    if !is_admin(&user.0) {
        return Err(ApiError::forbidden("Only admins can create categories"));
    }

    let input = body.into_inner();
    if input.name.trim().is_empty() || input.description.trim().is_empty() {
        return Err(ApiError::validation("Name and description are required"));
    }

    if category_db::get_category_by_name(db.get_ref(), &input.name)
        .await?
        .is_some()
    {
        return Err(ApiError::validation("A category with this name already exists"));
    }

    let category = category_db::insert_category(db.get_ref(), input).await?;
    let _ = cache.delete(&keys::category_list()).await;
    Ok(HttpResponse::Created().json(category))
}

/// PUT /api/categories/{id} — update a category (admin only).
pub async fn update_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategory>,
) -> Result<HttpResponse, ApiError> {
    if !is_admin(&user.0) {
        return Err(ApiError::forbidden("Only admins can update categories"));
    }

    let id = path.into_inner();
    category_db::get_category_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Category {id} not found")))?;

    let updated = category_db::update_category(db.get_ref(), id, body.into_inner()).await?;
    let _ = cache.delete(&keys::category_list()).await;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/categories/{id} — delete a category (admin only).
pub async fn delete_category(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    if !is_admin(&user.0) {
        return Err(ApiError::forbidden("Only admins can delete categories"));
    }

    let id = path.into_inner();
    let result = category_db::delete_category(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("Category {id} not found")));
    }

    let _ = cache.delete(&keys::category_list()).await;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Category {id} deleted"),
    })))
}
