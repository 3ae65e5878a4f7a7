use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::models::services::{
    self, CreateService, PriceUnit, ServiceListQuery, ServiceStatus, ServiceType, UpdateService,
};

/// Insert a new service owned by `user_id`.
pub async fn insert_service(
    db: &DatabaseConnection,
    input: CreateService,
    user_id: Uuid,
) -> Result<services::Model, DbErr> {
    let new_service = services::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        category_id: Set(input.category_id),
        title: Set(input.title),
        description: Set(input.description),
        price: Set(input.price),
        price_unit: Set(input.price_unit.unwrap_or(PriceUnit::PerProject)),
        location: Set(input.location),
        service_type: Set(input.service_type.unwrap_or(ServiceType::OnSite)),
        duration_estimate: Set(input.duration_estimate),
        requirements: Set(input.requirements),
        status: Set(input.status.unwrap_or(ServiceStatus::Active)),
        views_count: Set(0),
        rating_average: Set(0.0),
        rating_count: Set(0),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_service.insert(db).await
}

/// Fetch services, optionally filtered by category and status, paginated.
pub async fn get_services(
    db: &DatabaseConnection,
    query: &ServiceListQuery,
) -> Result<Vec<services::Model>, DbErr> {
    let mut find = services::Entity::find();

    if let Some(category_id) = query.category_id {
        find = find.filter(services::Column::CategoryId.eq(category_id));
    }
    if let Some(status) = query.status {
        find = find.filter(services::Column::Status.eq(status));
    }

    find.order_by_desc(services::Column::CreatedAt)
        .paginate(db, query.limit())
        .fetch_page(query.page().saturating_sub(1))
        .await
}

/// Fetch a single service by ID.
pub async fn get_service_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find_by_id(id).one(db).await
}

/// Fetch all services owned by a provider.
pub async fn get_services_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<services::Model>, DbErr> {
    services::Entity::find()
        .filter(services::Column::UserId.eq(user_id))
        .all(db)
        .await
}

/// Update an existing service. Derived rating fields are not touched here.
pub async fn update_service(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateService,
) -> Result<services::Model, DbErr> {
    let service = services::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Service not found".to_string()))?;

    let mut active: services::ActiveModel = service.into();

    if let Some(category_id) = input.category_id {
        active.category_id = Set(category_id);
    }
    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(price) = input.price {
        active.price = Set(price);
    }
    if let Some(price_unit) = input.price_unit {
        active.price_unit = Set(price_unit);
    }
    if let Some(location) = input.location {
        active.location = Set(location);
    }
    if let Some(service_type) = input.service_type {
        active.service_type = Set(service_type);
    }
    if let Some(duration_estimate) = input.duration_estimate {
        active.duration_estimate = Set(Some(duration_estimate));
    }
    if let Some(requirements) = input.requirements {
        active.requirements = Set(Some(requirements));
    }
    if let Some(status) = input.status {
        active.status = Set(status);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Bump the view counter without touching the rest of the row.
pub async fn increment_views(db: &DatabaseConnection, id: Uuid) -> Result<u64, DbErr> {
    let result = services::Entity::update_many()
        .col_expr(
            services::Column::ViewsCount,
            Expr::col(services::Column::ViewsCount).add(1),
        )
        .filter(services::Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Overwrite the derived rating projection. Called only by the rating
/// aggregator.
pub async fn set_rating(
    db: &DatabaseConnection,
    id: Uuid,
    average: f64,
    count: i32,
) -> Result<services::Model, DbErr> {
    let service = services::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Service not found".to_string()))?;

    let mut active: services::ActiveModel = service.into();
    active.rating_average = Set(average);
    active.rating_count = Set(count);

    active.update(db).await
}

/// Delete a service by ID.
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    services::Entity::delete_by_id(id).exec(db).await
}
