use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::AuthenticatedUser;
use crate::auth::password;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{AuthResponse, LoginUser, RegisterUser, UserResponse};

/// POST /api/auth/register — create an account and return a bearer token.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    jwt: web::Data<JwtConfig>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
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

    let token = jwt
        .create_token(user.id)
        .map_err(ApiError::Internal)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}

/// POST /api/auth/login — verify credentials and return a bearer token.
///
/// Unknown email and wrong password produce the same 401 so the endpoint
/// doesn't disclose which accounts exist.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    jwt: web::Data<JwtConfig>,
    body: web::Json<LoginUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let user = user_db::get_user_by_email(db.get_ref(), &input.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !password::verify_password(&input.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = jwt
        .create_token(user.id)
        .map_err(ApiError::Internal)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: UserResponse::from(user),
        token,
    }))
}

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}
