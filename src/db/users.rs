use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, AccountStatus, RegisterUser, UpdateUser, UserType};

/// Insert a new user with an already-hashed password.
pub async fn insert_user(
    db: &DatabaseConnection,
    input: RegisterUser,
    password_hash: String,
) -> Result<users::Model, DbErr> {
    let new_user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        email: Set(input.email),
        password_hash: Set(password_hash),
        phone: Set(input.phone),
        address: Set(input.address),
        bio: Set(input.bio),
        profile_picture: Set(None),
        user_type: Set(input.user_type.unwrap_or(UserType::Both)),
        status: Set(AccountStatus::Active),
        rating_average: Set(0.0),
        rating_count: Set(0),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_user.insert(db).await
}

/// Fetch users with pagination.
pub async fn get_users_paginated(
    db: &DatabaseConnection,
    page: u64,
    limit: u64,
) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Fetch a single user by ID.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Fetch a single user by email (for login and duplicate checks).
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(db)
        .await
}

/// Update an existing user. The password, when changed, arrives pre-hashed.
pub async fn update_user(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateUser,
    password_hash: Option<String>,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(email) = input.email {
        active.email = Set(email);
    }
    if let Some(hash) = password_hash {
        active.password_hash = Set(hash);
    }
    if let Some(phone) = input.phone {
        active.phone = Set(Some(phone));
    }
    if let Some(address) = input.address {
        active.address = Set(Some(address));
    }
    if let Some(bio) = input.bio {
        active.bio = Set(Some(bio));
    }
    if let Some(picture) = input.profile_picture {
        active.profile_picture = Set(Some(picture));
    }
    if let Some(user_type) = input.user_type {
        active.user_type = Set(user_type);
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Overwrite the derived rating projection. Called only by the rating
/// aggregator.
pub async fn set_rating(
    db: &DatabaseConnection,
    id: Uuid,
    average: f64,
    count: i32,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    active.rating_average = Set(average);
    active.rating_count = Set(count);

    active.update(db).await
}

/// Delete a user by ID.
pub async fn delete_user(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    users::Entity::delete_by_id(id).exec(db).await
}
