use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `service_images` table. Images are URL records;
/// blob storage is out of scope.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_images")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub image_url: String,
    pub description: Option<String>,
    pub is_thumbnail: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct AddServiceImage {
    pub image_url: String,
    pub description: Option<String>,
    pub is_thumbnail: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateServiceImage {
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub is_thumbnail: Option<bool>,
}
