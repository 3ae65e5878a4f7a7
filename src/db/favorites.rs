use sea_orm::*;
use uuid::Uuid;

use crate::models::favorites;

/// Insert a new favorite.
pub async fn insert_favorite(
    db: &DatabaseConnection,
    user_id: Uuid,
    service_id: Uuid,
) -> Result<favorites::Model, DbErr> {
    let new_favorite = favorites::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        service_id: Set(service_id),
        created_at: Set(chrono::Utc::now()),
    };

    new_favorite.insert(db).await
}

/// Fetch all of a user's favorites, newest first.
pub async fn get_favorites_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<favorites::Model>, DbErr> {
    favorites::Entity::find()
        .filter(favorites::Column::UserId.eq(user_id))
        .order_by_desc(favorites::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single favorite by ID.
pub async fn get_favorite_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<favorites::Model>, DbErr> {
    favorites::Entity::find_by_id(id).one(db).await
}

/// Look up the unique (user, service) pair.
pub async fn find_favorite(
    db: &DatabaseConnection,
    user_id: Uuid,
    service_id: Uuid,
) -> Result<Option<favorites::Model>, DbErr> {
    favorites::Entity::find()
        .filter(favorites::Column::UserId.eq(user_id))
        .filter(favorites::Column::ServiceId.eq(service_id))
        .one(db)
        .await
}

/// Delete a favorite by ID.
pub async fn delete_favorite(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    favorites::Entity::delete_by_id(id).exec(db).await
}
