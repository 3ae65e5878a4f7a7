use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{capabilities, is_admin, resolve_contract_actor};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::db::services as service_db;
use crate::error::ApiError;
use crate::lifecycle::{self, Notice, Party};
use crate::locks::EntityLocks;
use crate::models::contracts::{self, CreateContract, NegotiatePrice, UpdateContractStatus};
use crate::models::notifications::{NewNotification, NotificationKind};
use crate::models::services::ServiceStatus;
use crate::notify;

/// POST /api/contracts — a client proposes a contract on a provider's
/// service.
///
/// The client comes from the bearer token; the provider is the service's
/// owner. A user can never contract their own service.
pub async fn create_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContract>,
) -> Result<HttpResponse, ApiError> {
    if !capabilities(&user.0).client {
        return Err(ApiError::forbidden("Only clients can create contracts"));
    }
    let client_id = user.0.id;

    let input = body.into_inner();
    if input.title.trim().is_empty()
        || input.description.trim().is_empty()
        || input.location.trim().is_empty()
    {
        return Err(ApiError::validation(
            "Title, description and location are required",
        ));
    }
    if !input.proposed_price.is_finite() || input.proposed_price < 0.0 {
        return Err(ApiError::validation("Price must be a non-negative number"));
    }

    let service = service_db::get_service_by_id(db.get_ref(), input.service_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Service {} not found", input.service_id)))?;

    if service.status != ServiceStatus::Active {
        return Err(ApiError::validation(
            "Contracts can only be proposed on active services",
        ));
    }
    if service.user_id == client_id {
        return Err(ApiError::validation(
            "You cannot create a contract on your own service",
        ));
    }

    let contract =
        contract_db::insert_contract(db.get_ref(), input, client_id, service.user_id).await?;

    notify::emit(
        db.get_ref(),
        NewNotification {
            user_id: contract.provider_id,
            title: "New contract proposal".to_string(),
            message: format!(
                "You received a new contract proposal: \"{}\"",
                contract.title
            ),
            kind: NotificationKind::ContractProposal,
            related_id: Some(contract.id),
        },
    )
    .await;

    Ok(HttpResponse::Created().json(contract))
}

/// GET /api/contracts — list contracts, role-filtered: admins see all,
/// everyone else only the contracts they are a party to.
pub async fn get_contracts(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let contracts = if is_admin(&user.0) {
        contract_db::get_all_contracts(db.get_ref()).await?
    } else {
        contract_db::get_contracts_for_user(db.get_ref(), user.0.id).await?
    };

    Ok(HttpResponse::Ok().json(contracts))
}

/// GET /api/contracts/{id} — get a single contract (party or admin).
pub async fn get_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let contract_id = path.into_inner();

    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id} not found")))?;

    if resolve_contract_actor(&user.0, &contract).is_none() {
        return Err(ApiError::forbidden(
            "You can only view contracts you are involved in",
        ));
    }

    Ok(HttpResponse::Ok().json(contract))
}

/// PUT /api/contracts/{id}/status — run one edge of the contract state
/// machine.
///
/// The transition is validated in full by the lifecycle engine before
/// anything is persisted, under the contract's write lock so concurrent
/// requests can't interleave their read-modify-write cycles.
pub async fn update_status(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    locks: web::Data<Arc<EntityLocks>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateContractStatus>,
) -> Result<HttpResponse, ApiError> {
    let contract_id = path.into_inner();

    let entity = locks.for_entity(contract_id).await;
    let _guard = entity.lock().await;

    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id} not found")))?;

    let actor = resolve_contract_actor(&user.0, &contract).ok_or_else(|| {
        ApiError::forbidden("You can only update contracts you are involved in")
    })?;

    let patch = lifecycle::plan_transition(&contract, actor, &body, chrono::Utc::now())?;

    let notices = patch.notices.clone();
    let updated = contract_db::apply_patch(db.get_ref(), contract, &patch).await?;
    drop(_guard);

    emit_notices(db.get_ref(), &updated, &notices).await;

    Ok(HttpResponse::Ok().json(updated))
}

/// PUT /api/contracts/{id}/negotiate-price — counter-offer loop, separate
/// from status updates.
pub async fn negotiate_price(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    locks: web::Data<Arc<EntityLocks>>,
    path: web::Path<Uuid>,
    body: web::Json<NegotiatePrice>,
) -> Result<HttpResponse, ApiError> {
    let contract_id = path.into_inner();

    let entity = locks.for_entity(contract_id).await;
    let _guard = entity.lock().await;

    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id} not found")))?;

    let actor = resolve_contract_actor(&user.0, &contract).ok_or_else(|| {
        ApiError::forbidden("You can only negotiate contracts you are involved in")
    })?;

    let patch = lifecycle::plan_negotiation(&contract, actor, body.new_price)?;

    let notices = patch.notices.clone();
    let updated = contract_db::apply_patch(db.get_ref(), contract, &patch).await?;
    drop(_guard);

    emit_notices(db.get_ref(), &updated, &notices).await;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/contracts/{id} — remove a contract record (admin only).
/// Both parties are notified before the record disappears.
pub async fn delete_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    if !is_admin(&user.0) {
        return Err(ApiError::forbidden("Only admins can delete contracts"));
    }

    let contract_id = path.into_inner();
    let contract = contract_db::get_contract_by_id(db.get_ref(), contract_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Contract {contract_id} not found")))?;

    for user_id in [contract.client_id, contract.provider_id] {
        notify::emit(
            db.get_ref(),
            NewNotification {
                user_id,
                title: "Contract removed".to_string(),
                message: format!(
                    "The contract \"{}\" was removed by an administrator",
                    contract.title
                ),
                kind: NotificationKind::ContractUpdate,
                related_id: Some(contract.id),
            },
        )
        .await;
    }

    contract_db::delete_contract(db.get_ref(), contract_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Contract {contract_id} deleted"),
    })))
}

/// Fan a transition's notices out to the contract parties, best-effort.
async fn emit_notices(db: &DatabaseConnection, contract: &contracts::Model, notices: &[Notice]) {
    for notice in notices {
        let user_id = match notice.to {
            Party::Client => contract.client_id,
            Party::Provider => contract.provider_id,
        };
        let (title, message) = notice_text(notice.kind, contract);

        notify::emit(
            db,
            NewNotification {
                user_id,
                title,
                message,
                kind: notice.kind,
                related_id: Some(contract.id),
            },
        )
        .await;
    }
}

fn notice_text(kind: NotificationKind, contract: &contracts::Model) -> (String, String) {
    let title = &contract.title;
    match kind {
        NotificationKind::ContractAccepted => (
            "Contract accepted".to_string(),
            format!("The contract \"{title}\" was accepted"),
        ),
        NotificationKind::ContractNegotiation => (
            "New counter-offer".to_string(),
            format!("A new price was proposed on the contract \"{title}\""),
        ),
        NotificationKind::ContractCompletion => (
            "Contract completed".to_string(),
            format!("The contract \"{title}\" was marked as completed"),
        ),
        NotificationKind::ContractCancellation => (
            "Contract cancelled".to_string(),
            format!("The contract \"{title}\" was cancelled"),
        ),
        _ => (
            "Contract updated".to_string(),
            format!("The contract \"{title}\" was updated"),
        ),
    }
}
