use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::is_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::notifications as notification_db;
use crate::error::ApiError;

/// GET /api/notifications — the caller's notifications; admins see all.
pub async fn get_notifications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let notifications = if is_admin(&user.0) {
        notification_db::get_all_notifications(db.get_ref()).await?
    } else {
        notification_db::get_notifications_by_user(db.get_ref(), user.0.id).await?
    };

    Ok(HttpResponse::Ok().json(notifications))
}

/// PUT /api/notifications/{id}/read — mark one notification as read
/// (owner or admin).
pub async fn mark_notification_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let notification = notification_db::get_notification_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Notification {id} not found")))?;

    if notification.user_id != user.0.id && !is_admin(&user.0) {
        return Err(ApiError::forbidden(
            "You can only mark your own notifications as read",
        ));
    }

    let updated = notification_db::mark_notification_read(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /api/notifications/mark-all-read — mark all of the caller's unread
/// notifications as read.
pub async fn mark_all_notifications_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let updated = notification_db::mark_all_read_for_user(db.get_ref(), user.0.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{updated} notifications marked as read"),
        "updated": updated,
    })))
}

/// DELETE /api/notifications/{id} — delete a notification (owner or admin).
pub async fn delete_notification(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let notification = notification_db::get_notification_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Notification {id} not found")))?;

    if notification.user_id != user.0.id && !is_admin(&user.0) {
        return Err(ApiError::forbidden(
            "You can only delete your own notifications",
        ));
    }

    notification_db::delete_notification(db.get_ref(), id).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Notification {id} deleted"),
    })))
}
