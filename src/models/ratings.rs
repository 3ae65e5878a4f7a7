use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which side of the contract a party was on, recorded at rating creation.
/// Derived from contract membership, never taken from the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PartyRole {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "provider")]
    Provider,
}

/// SeaORM entity for the `ratings` table.
///
/// Unique on (contract_id, rater_id, rated_id): each party may rate the
/// other at most once per contract.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub service_id: Uuid,
    pub rater_id: Uuid,
    pub rated_id: Uuid,
    pub rating_value: i16,
    pub comment: Option<String>,
    pub is_anonymous: bool,
    pub rater_role: PartyRole,
    pub rated_role: PartyRole,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id"
    )]
    Contract,
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RatedId",
        to = "super::users::Column::Id"
    )]
    Rated,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body for POST /api/ratings.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRating {
    pub contract_id: Uuid,
    pub service_id: Uuid,
    pub rated_id: Uuid,
    pub rating_value: i16,
    pub comment: Option<String>,
    pub is_anonymous: Option<bool>,
}

/// Body for PUT /api/ratings/{id}. Identity fields are immutable.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRating {
    pub rating_value: Option<i16>,
    pub comment: Option<String>,
    pub is_anonymous: Option<bool>,
}

/// Public representation: anonymous ratings hide the rater.
#[derive(Debug, Clone, Serialize)]
pub struct RatingResponse {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub service_id: Uuid,
    pub rater_id: Option<Uuid>,
    pub rated_id: Uuid,
    pub rating_value: i16,
    pub comment: Option<String>,
    pub is_anonymous: bool,
    pub rater_role: PartyRole,
    pub rated_role: PartyRole,
    pub created_at: DateTimeUtc,
}

impl From<Model> for RatingResponse {
    fn from(m: Model) -> Self {
        let rater_id = if m.is_anonymous { None } else { Some(m.rater_id) };
        Self {
            id: m.id,
            contract_id: m.contract_id,
            service_id: m.service_id,
            rater_id,
            rated_id: m.rated_id,
            rating_value: m.rating_value,
            comment: m.comment,
            is_anonymous: m.is_anonymous,
            rater_role: m.rater_role,
            rated_role: m.rated_role,
            created_at: m.created_at,
        }
    }
}
