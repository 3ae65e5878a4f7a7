use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{capabilities, is_admin};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{RedisCache, keys, ttl};
use crate::db::categories as category_db;
use crate::db::services as service_db;
use crate::error::ApiError;
use crate::models::services::{CreateService, ServiceListQuery, UpdateService};

/// GET /api/services — list services (public), filterable by category and
/// status, paginated.
pub async fn get_services(
    db: web::Data<DatabaseConnection>,
    query: web::Query<ServiceListQuery>,
) -> Result<HttpResponse, ApiError> {
    let services = service_db::get_services(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(services))
}

/// GET /api/services/{id} — get a single service (public).
///
/// Bumps the view counter on every hit; the cached body may carry a slightly
/// stale count for up to the cache TTL.
pub async fn get_service(
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let bumped = service_db::increment_views(db.get_ref(), id).await?;
    if bumped == 0 {
        return Err(ApiError::not_found(format!("Service {id} not found")));
    }

    let cache_key = keys::service(&id.to_string());
    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {e}"),
    }

    let service = service_db::get_service_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {id} not found")))?;

    let _ = cache.set(&cache_key, &service, Some(ttl::SERVICE)).await;
    Ok(HttpResponse::Ok().json(service))
}

/// POST /api/services — create a service (provider capability required).
pub async fn create_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateService>,
) -> Result<HttpResponse, ApiError> {
    if !capabilities(&user.0).provider {
        return Err(ApiError::forbidden(
            "Only providers can create services",
        ));
    }

    let input = body.into_inner();
    if input.title.trim().is_empty()
        || input.description.trim().is_empty()
        || input.location.trim().is_empty()
    {
        return Err(ApiError::validation(
            "Title, description and location are required",
        ));
    }
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(ApiError::validation("Price must be a non-negative number"));
    }

    if category_db::get_category_by_id(db.get_ref(), input.category_id)
        .await?
        .is_none()
    {
        return Err(ApiError::validation("Invalid or unknown category"));
    }

    let service = service_db::insert_service(db.get_ref(), input, user.0.id).await?;
    Ok(HttpResponse::Created().json(service))
}

/// PUT /api/services/{id} — update a service (owner or admin).
pub async fn update_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateService>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let service = service_db::get_service_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {id} not found")))?;

    if service.user_id != user.0.id && !is_admin(&user.0) {
        return Err(ApiError::forbidden("You can only update your own services"));
    }

    let input = body.into_inner();
    if let Some(price) = input.price {
        if !price.is_finite() || price < 0.0 {
            return Err(ApiError::validation("Price must be a non-negative number"));
        }
    }
    if let Some(category_id) = input.category_id {
        if category_db::get_category_by_id(db.get_ref(), category_id)
            .await?
            .is_none()
        {
            return Err(ApiError::validation("Invalid or unknown category"));
        }
    }

    let updated = service_db::update_service(db.get_ref(), id, input).await?;
    let _ = cache.delete(&keys::service(&id.to_string())).await;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/services/{id} — delete a service (owner or admin).
pub async fn delete_service(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let service = service_db::get_service_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {id} not found")))?;

    if service.user_id != user.0.id && !is_admin(&user.0) {
        return Err(ApiError::forbidden("You can only delete your own services"));
    }

    service_db::delete_service(db.get_ref(), id).await?;
    let _ = cache.delete(&keys::service(&id.to_string())).await;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Service {id} deleted"),
    })))
}
