use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt::JwtConfig;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users;

/// Extractor that resolves the `Authorization: Bearer <token>` header to a
/// user row. The token only carries the user id; the row is loaded fresh on
/// every request so role and status changes take effect immediately.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the Bearer token from the Authorization header.
            let auth_header = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

            let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
                ApiError::unauthorized("Authorization header must be: Bearer <token>")
            })?;

            // 2. Validate the signature and expiry.
            let jwt = req
                .app_data::<web::Data<JwtConfig>>()
                .ok_or_else(|| ApiError::Internal("JWT config not configured".to_string()))?;

            let claims = jwt
                .validate_token(token)
                .map_err(|e| ApiError::unauthorized(format!("Invalid token: {e}")))?;

            let user_id = claims.user_id().map_err(ApiError::unauthorized)?;

            // 3. Resolve the claim against the users table.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| ApiError::Internal("Database not configured".to_string()))?;

            let user = user_db::get_user_by_id(db.get_ref(), user_id)
                .await
                .map_err(ApiError::from)?
                .ok_or_else(|| ApiError::unauthorized("User for this token no longer exists"))?;

            Ok(AuthenticatedUser(user))
        })
    }
}
