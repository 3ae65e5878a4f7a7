use sea_orm::prelude::Expr;
use sea_orm::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use crate::models::messages::{self, SendMessage};

/// Insert a new message.
pub async fn insert_message(
    db: &DatabaseConnection,
    input: SendMessage,
    sender_id: Uuid,
) -> Result<messages::Model, DbErr> {
    let new_message = messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(input.contract_id),
        sender_id: Set(sender_id),
        receiver_id: Set(input.receiver_id),
        subject: Set(input.subject),
        content: Set(input.content),
        parent_message_id: Set(input.parent_message_id),
        is_read: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_message.insert(db).await
}

/// Fetch a single message by ID.
pub async fn get_message_by_id(
    db: &DatabaseConnection,
    message_id: Uuid,
) -> Result<Option<messages::Model>, DbErr> {
    messages::Entity::find_by_id(message_id).one(db).await
}

/// Fetch the 1-1 conversation between two users (both directions),
/// chronological, paginated.
pub async fn get_conversation(
    db: &DatabaseConnection,
    user_a: Uuid,
    user_b: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<messages::Model>, DbErr> {
    messages::Entity::find()
        .filter(
            Condition::any()
                .add(
                    Condition::all()
                        .add(messages::Column::SenderId.eq(user_a))
                        .add(messages::Column::ReceiverId.eq(user_b)),
                )
                .add(
                    Condition::all()
                        .add(messages::Column::SenderId.eq(user_b))
                        .add(messages::Column::ReceiverId.eq(user_a)),
                ),
        )
        .order_by_asc(messages::Column::CreatedAt)
        .order_by_asc(messages::Column::Id)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Fetch a contract-scoped thread, chronological.
pub async fn get_messages_by_contract(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<messages::Model>, DbErr> {
    messages::Entity::find()
        .filter(messages::Column::ContractId.eq(contract_id))
        .order_by_asc(messages::Column::CreatedAt)
        .order_by_asc(messages::Column::Id)
        .all(db)
        .await
}

/// Mark a batch of messages as read, but only those addressed to `reader_id`
/// (a sender cannot mark their own outbound mail read for the receiver).
pub async fn mark_messages_read(
    db: &DatabaseConnection,
    message_ids: Vec<Uuid>,
    reader_id: Uuid,
) -> Result<u64, DbErr> {
    if message_ids.is_empty() {
        return Ok(0);
    }

    let result = messages::Entity::update_many()
        .col_expr(messages::Column::IsRead, Expr::value(true))
        .filter(messages::Column::Id.is_in(message_ids))
        .filter(messages::Column::ReceiverId.eq(reader_id))
        .filter(messages::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

/// Latest message per counterpart for the conversations overview, newest
/// conversation first. Unread counts ride along in the same pass.
pub async fn get_conversation_heads(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<(Uuid, messages::Model, u64)>, DbErr> {
    let rows = messages::Entity::find()
        .filter(
            Condition::any()
                .add(messages::Column::SenderId.eq(user_id))
                .add(messages::Column::ReceiverId.eq(user_id)),
        )
        .order_by_desc(messages::Column::CreatedAt)
        .order_by_desc(messages::Column::Id)
        .all(db)
        .await?;

    let mut heads: Vec<(Uuid, messages::Model)> = Vec::new();
    let mut seen: HashSet<Uuid> = HashSet::new();
    let mut unread: HashMap<Uuid, u64> = HashMap::new();

    for row in rows {
        let other = if row.sender_id == user_id {
            row.receiver_id
        } else {
            row.sender_id
        };

        if row.receiver_id == user_id && !row.is_read {
            *unread.entry(other).or_insert(0) += 1;
        }
        if seen.insert(other) {
            heads.push((other, row));
        }
    }

    Ok(heads
        .into_iter()
        .map(|(other, head)| {
            let count = unread.get(&other).copied().unwrap_or(0);
            (other, head, count)
        })
        .collect())
}
