use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ServiceStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "review")]
    Review,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PriceUnit {
    #[sea_orm(string_value = "per_hour")]
    PerHour,
    #[sea_orm(string_value = "per_project")]
    PerProject,
    #[sea_orm(string_value = "per_item")]
    PerItem,
    #[sea_orm(string_value = "fixed")]
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ServiceType {
    #[sea_orm(string_value = "online")]
    Online,
    #[sea_orm(string_value = "on_site")]
    OnSite,
    #[sea_orm(string_value = "hybrid")]
    Hybrid,
}

/// SeaORM entity for the `services` table.
///
/// `rating_average`/`rating_count` are maintained by the rating aggregator;
/// `views_count` is bumped on single-service reads.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub price_unit: PriceUnit,
    pub location: String,
    pub service_type: ServiceType,
    pub duration_estimate: Option<String>,
    pub requirements: Option<String>,
    pub status: ServiceStatus,
    pub views_count: i64,
    #[sea_orm(column_type = "Double")]
    pub rating_average: f64,
    pub rating_count: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Provider,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::contracts::Entity")]
    Contracts,
    #[sea_orm(has_many = "super::service_images::Entity")]
    Images,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contracts.def()
    }
}

impl Related<super::service_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub price_unit: Option<PriceUnit>,
    pub location: String,
    pub service_type: Option<ServiceType>,
    pub duration_estimate: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<ServiceStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateService {
    pub category_id: Option<Uuid>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub price_unit: Option<PriceUnit>,
    pub location: Option<String>,
    pub service_type: Option<ServiceType>,
    pub duration_estimate: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<ServiceStatus>,
}

/// Query parameters for GET /api/services.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceListQuery {
    pub category_id: Option<Uuid>,
    pub status: Option<ServiceStatus>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ServiceListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}
