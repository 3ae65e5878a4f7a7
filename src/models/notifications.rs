use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed set of notification kinds. Rows are created only by the internal
/// emitter (`crate::notify`), never directly by API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum NotificationKind {
    #[sea_orm(string_value = "contract_proposal")]
    ContractProposal,
    #[sea_orm(string_value = "contract_update")]
    ContractUpdate,
    #[sea_orm(string_value = "contract_accepted")]
    ContractAccepted,
    #[sea_orm(string_value = "contract_negotiation")]
    ContractNegotiation,
    #[sea_orm(string_value = "contract_completion")]
    ContractCompletion,
    #[sea_orm(string_value = "contract_cancellation")]
    ContractCancellation,
    #[sea_orm(string_value = "service_update")]
    ServiceUpdate,
    #[sea_orm(string_value = "user_message")]
    UserMessage,
    #[sea_orm(string_value = "system_alert")]
    SystemAlert,
}

/// SeaORM entity for the `notifications` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub related_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Input to the notification emitter.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub related_id: Option<Uuid>,
}
