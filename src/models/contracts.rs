use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Contract status stored as a lowercase string in the database.
///
/// `Completed` and `Cancelled` are final for client/provider actors.
/// `Disputed` exists in the schema but no client/provider transition reaches
/// it; only an admin override can move a contract in or out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Status {
    #[sea_orm(string_value = "pending_acceptance")]
    PendingAcceptance,
    #[sea_orm(string_value = "pending_client_agreement")]
    PendingClientAgreement,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "disputed")]
    Disputed,
}

impl Status {
    /// The wire/database spelling, used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::PendingAcceptance => "pending_acceptance",
            Status::PendingClientAgreement => "pending_client_agreement",
            Status::Accepted => "accepted",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Cancelled => "cancelled",
            Status::Disputed => "disputed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Cancelled)
    }
}

/// SeaORM entity for the `contracts` table.
///
/// `service_id`, `client_id` and `provider_id` are set once at creation and
/// never reassigned. `agreed_price` stays null until acceptance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub service_id: Uuid,
    pub client_id: Uuid,
    pub provider_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub proposed_price: f64,
    #[sea_orm(column_type = "Double", nullable)]
    pub agreed_price: Option<f64>,
    pub estimated_duration: Option<String>,
    pub location: String,
    pub status: Status,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    pub completion_date: Option<DateTimeUtc>,
    pub client_notes: Option<String>,
    pub provider_notes: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::services::Entity",
        from = "Column::ServiceId",
        to = "super::services::Column::Id"
    )]
    Service,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ProviderId",
        to = "super::users::Column::Id"
    )]
    Provider,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
}

impl Related<super::services::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body for POST /api/contracts. `client_id` comes from the bearer token,
/// `provider_id` from the service row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContract {
    pub service_id: Uuid,
    pub title: String,
    pub description: String,
    pub proposed_price: f64,
    pub location: String,
    pub estimated_duration: Option<String>,
    pub client_notes: Option<String>,
}

/// Body for PUT /api/contracts/{id}/status.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateContractStatus {
    pub status: Status,
    pub agreed_price: Option<f64>,
    pub start_date: Option<DateTimeUtc>,
    pub end_date: Option<DateTimeUtc>,
    pub cancellation_reason: Option<String>,
}

/// Body for PUT /api/contracts/{id}/negotiate-price.
#[derive(Debug, Clone, Deserialize)]
pub struct NegotiatePrice {
    pub new_price: f64,
}
