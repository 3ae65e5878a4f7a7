use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::db::messages as message_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::messages::{ConversationQuery, ConversationSummary, MarkMessagesRead, SendMessage};
use crate::models::notifications::{NewNotification, NotificationKind};
use crate::notify;

/// POST /api/messages — send a message to another user.
///
/// When `contract_id` is set, both sender and receiver must be the two
/// parties of that contract. Delivery is poll-based; the receiver gets a
/// notification and fetches the thread.
pub async fn send_message(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<SendMessage>,
) -> Result<HttpResponse, ApiError> {
    let sender_id = user.0.id;
    let input = body.into_inner();

    if input.content.trim().is_empty() {
        return Err(ApiError::validation("Message content is required"));
    }
    if input.receiver_id == sender_id {
        return Err(ApiError::validation("You cannot message yourself"));
    }

    user_db::get_user_by_id(db.get_ref(), input.receiver_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", input.receiver_id)))?;

    if let Some(contract_id) = input.contract_id {
        let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id} not found")))?;

        let parties = [contract.client_id, contract.provider_id];
        if !parties.contains(&sender_id) {
            return Err(ApiError::forbidden(
                "You are not a party to this contract",
            ));
        }
        if !parties.contains(&input.receiver_id) {
            return Err(ApiError::validation(
                "The receiver is not a party to this contract",
            ));
        }
    }

    if let Some(parent_id) = input.parent_message_id {
        message_db::get_message_by_id(db.get_ref(), parent_id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Parent message {parent_id} not found")))?;
    }

    let message = message_db::insert_message(db.get_ref(), input, sender_id).await?;

    notify::emit(
        db.get_ref(),
        NewNotification {
            user_id: message.receiver_id,
            title: "New message".to_string(),
            message: format!("You received a new message from {}", user.0.name),
            kind: NotificationKind::UserMessage,
            related_id: Some(message.id),
        },
    )
    .await;

    Ok(HttpResponse::Created().json(message))
}

/// GET /api/messages/my-conversations — one row per counterpart with the
/// latest message and the unread count.
pub async fn get_my_conversations(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let heads = message_db::get_conversation_heads(db.get_ref(), user.0.id).await?;

    let mut summaries = Vec::with_capacity(heads.len());
    for (other_id, head, unread_count) in heads {
        let other_user_name = user_db::get_user_by_id(db.get_ref(), other_id)
            .await?
            .map(|u| u.name);

        summaries.push(ConversationSummary {
            other_user_id: other_id,
            other_user_name,
            last_message: Some(head.content),
            last_message_at: Some(head.created_at),
            unread_count,
        });
    }

    Ok(HttpResponse::Ok().json(summaries))
}

/// GET /api/messages/contract/{contract_id} — a contract-scoped thread
/// (parties only).
pub async fn get_contract_messages(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let contract_id = path.into_inner();

    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id} not found")))?;

    if user.0.id != contract.client_id && user.0.id != contract.provider_id {
        return Err(ApiError::forbidden("You are not a party to this contract"));
    }

    let messages = message_db::get_messages_by_contract(db.get_ref(), contract_id).await?;
    Ok(HttpResponse::Ok().json(messages))
}

/// GET /api/messages/{other_user_id} — the 1-1 conversation with another
/// user, chronological, paginated.
pub async fn get_conversation(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<ConversationQuery>,
) -> Result<HttpResponse, ApiError> {
    let other_user_id = path.into_inner();

    let messages = message_db::get_conversation(
        db.get_ref(),
        user.0.id,
        other_user_id,
        query.page(),
        query.limit(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(messages))
}

/// PUT /api/messages/mark-read — mark a batch of received messages as read.
/// Messages not addressed to the caller are silently skipped.
pub async fn mark_messages_read(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<MarkMessagesRead>,
) -> Result<HttpResponse, ApiError> {
    let updated =
        message_db::mark_messages_read(db.get_ref(), body.into_inner().message_ids, user.0.id)
            .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{updated} messages marked as read"),
        "updated": updated,
    })))
}
