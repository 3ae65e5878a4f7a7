use sea_orm::*;
use uuid::Uuid;

use crate::models::categories::{self, CategoryStatus, CreateCategory, UpdateCategory};

/// Insert a new category.
pub async fn insert_category(
    db: &DatabaseConnection,
    input: CreateCategory,
) -> Result<categories::Model, DbErr> {
    let new_category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        description: Set(input.description),
        icon: Set(input.icon),
        color: Set(input.color),
        status: Set(input.status.unwrap_or(CategoryStatus::Active)),
        created_at: Set(chrono::Utc::now()),
    };

    new_category.insert(db).await
}

/// Fetch all categories.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<categories::Model>, DbErr> {
    categories::Entity::find()
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await
}

/// Fetch a single category by ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find_by_id(id).one(db).await
}

/// Fetch a category by its unique name (for duplicate checks).
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find()
        .filter(categories::Column::Name.eq(name))
        .one(db)
        .await
}

/// Update an existing category.
pub async fn update_category(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateCategory,
) -> Result<categories::Model, DbErr> {
    let category = categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Category not found".to_string()))?;

    let mut active: categories::ActiveModel = category.into();

    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(icon) = input.icon {
        active.icon = Set(Some(icon));
    }
    if let Some(color) = input.color {
        active.color = Set(Some(color));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }

    active.update(db).await
}

/// Delete a category by ID.
pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    categories::Entity::delete_by_id(id).exec(db).await
}
