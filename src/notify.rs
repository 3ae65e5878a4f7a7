use sea_orm::DatabaseConnection;

use crate::db::notifications as notification_db;
use crate::models::notifications::NewNotification;

/// Record a notification for a user, fire-and-forget.
///
/// Notifications are best-effort: a failed insert is logged and swallowed so
/// the triggering contract/rating/message write is never rolled back or
/// blocked by it.
pub async fn emit(db: &DatabaseConnection, event: NewNotification) {
    let user_id = event.user_id;
    if let Err(e) = notification_db::insert_notification(db, event).await {
        tracing::warn!("failed to create notification for user {user_id}: {e}");
    }
}
