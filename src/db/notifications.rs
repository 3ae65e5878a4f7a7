use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::notifications::{self, NewNotification};

/// Insert a notification row. Only `crate::notify::emit` calls this.
pub async fn insert_notification(
    db: &DatabaseConnection,
    input: NewNotification,
) -> Result<notifications::Model, DbErr> {
    let new_notification = notifications::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(input.user_id),
        title: Set(input.title),
        message: Set(input.message),
        kind: Set(input.kind),
        related_id: Set(input.related_id),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_notification.insert(db).await
}

/// Fetch all notifications (admin view), newest first.
pub async fn get_all_notifications(
    db: &DatabaseConnection,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a user's notifications, newest first.
pub async fn get_notifications_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<notifications::Model>, DbErr> {
    notifications::Entity::find()
        .filter(notifications::Column::UserId.eq(user_id))
        .order_by_desc(notifications::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single notification by ID.
pub async fn get_notification_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<notifications::Model>, DbErr> {
    notifications::Entity::find_by_id(id).one(db).await
}

/// Mark a single notification as read.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<notifications::Model, DbErr> {
    let notification = notifications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Notification not found".to_string()))?;

    let mut active: notifications::ActiveModel = notification.into();
    active.is_read = Set(true);

    active.update(db).await
}

/// Mark all of a user's unread notifications as read.
pub async fn mark_all_read_for_user(db: &DatabaseConnection, user_id: Uuid) -> Result<u64, DbErr> {
    let result = notifications::Entity::update_many()
        .col_expr(notifications::Column::IsRead, Expr::value(true))
        .filter(notifications::Column::UserId.eq(user_id))
        .filter(notifications::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Delete a notification by ID.
pub async fn delete_notification(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    notifications::Entity::delete_by_id(id).exec(db).await
}
