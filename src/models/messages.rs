use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `messages` table.
///
/// Messaging is poll-based; `contract_id` scopes a message to a contract
/// thread and `parent_message_id` allows reply threading.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Option<Uuid>,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub parent_message_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTimeUtc,
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
        belongs_to = "super::users::Entity",
        from = "Column::SenderId",
        to = "super::users::Column::Id"
    )]
    Sender,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ReceiverId",
        to = "super::users::Column::Id"
    )]
    Receiver,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body for POST /api/messages.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessage {
    pub receiver_id: Uuid,
    pub content: String,
    pub subject: Option<String>,
    pub contract_id: Option<Uuid>,
    pub parent_message_id: Option<Uuid>,
}

/// Body for PUT /api/messages/mark-read.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkMessagesRead {
    pub message_ids: Vec<Uuid>,
}

/// Query parameters for GET /api/messages/{other_user_id}.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl ConversationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(50).min(200)
    }
}

/// One row of GET /api/messages/my-conversations.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub other_user_id: Uuid,
    pub other_user_name: Option<String>,
    pub last_message: Option<String>,
    pub last_message_at: Option<chrono::DateTime<chrono::Utc>>,
    pub unread_count: u64,
}
