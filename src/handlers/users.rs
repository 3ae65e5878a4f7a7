use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::is_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password;
use crate::cache::{RedisCache, keys, ttl};
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::PaginationQuery;
use crate::models::users::{RegisterUser, UpdateUser, UserResponse};

/// GET /api/users — list all users with pagination (requires authentication).
/// Query params: ?page=1&limit=20
pub async fn get_users(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let users = user_db::get_users_paginated(db.get_ref(), query.page(), query.limit()).await?;
    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// GET /api/users/{id} — get a single user (requires authentication).
pub async fn get_user(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let cache_key = keys::user(&id.to_string());

    match cache.get::<serde_json::Value>(&cache_key).await {
        Ok(Some(cached)) => return Ok(HttpResponse::Ok().json(cached)),
        Ok(None) => {}
        Err(e) => tracing::warn!("Cache error: {e}"),
    }

    let user = user_db::get_user_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id} not found")))?;

    let response = UserResponse::from(user);
    let _ = cache.set(&cache_key, &response, Some(ttl::USER)).await;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /api/users — admin-level user creation (no token in the response).
pub async fn create_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    if !is_admin(&auth_user.0) {
        return Err(ApiError::forbidden("Only admins can create users directly"));
    }

    let input = body.into_inner();
    if input.name.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::validation("Name, email and password are required"));
    }

    if user_db::get_user_by_email(db.get_ref(), &input.email)
        .await?
        .is_some()
    {
        return Err(ApiError::validation("User already exists"));
    }

    let hash = password::hash_password(&input.password)?;
    let user = user_db::insert_user(db.get_ref(), input, hash).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// PUT /api/users/{id} — update a user (self or admin).
///
/// `user_type` and account `status` changes are admin-only; the derived
/// rating fields are not writable here at all.
pub async fn update_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let admin = is_admin(&auth_user.0);

    if auth_user.0.id != id && !admin {
        return Err(ApiError::forbidden("You can only update your own account"));
    }

    let input = body.into_inner();
    if !admin && (input.user_type.is_some() || input.status.is_some()) {
        return Err(ApiError::forbidden(
            "Only admins can change user type or account status",
        ));
    }

    let password_hash = match &input.password {
        Some(plain) => Some(password::hash_password(plain)?),
        None => None,
    };

    user_db::get_user_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {id} not found")))?;

    let updated = user_db::update_user(db.get_ref(), id, input, password_hash).await?;

    let _ = cache.delete(&keys::user(&id.to_string())).await;
    Ok(HttpResponse::Ok().json(UserResponse::from(updated)))
}

/// DELETE /api/users/{id} — delete a user (self or admin).
pub async fn delete_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if auth_user.0.id != id && !is_admin(&auth_user.0) {
        return Err(ApiError::forbidden("You can only delete your own account"));
    }

    let result = user_db::delete_user(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found(format!("User {id} not found")));
    }

    let _ = cache.delete(&keys::user(&id.to_string())).await;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User {id} deleted"),
    })))
}
