use sea_orm::*;
use uuid::Uuid;

use crate::lifecycle::ContractPatch;
use crate::models::contracts::{self, CreateContract, Status};

/// Insert a new contract proposal (always starts pending acceptance, with no
/// agreed price).
pub async fn insert_contract(
    db: &DatabaseConnection,
    input: CreateContract,
    client_id: Uuid,
    provider_id: Uuid,
) -> Result<contracts::Model, DbErr> {
    let new_contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        service_id: Set(input.service_id),
        client_id: Set(client_id),
        provider_id: Set(provider_id),
        title: Set(input.title),
        description: Set(input.description),
        proposed_price: Set(input.proposed_price),
        agreed_price: Set(None),
        estimated_duration: Set(input.estimated_duration),
        location: Set(input.location),
        status: Set(Status::PendingAcceptance),
        start_date: Set(None),
        end_date: Set(None),
        completion_date: Set(None),
        client_notes: Set(input.client_notes),
        provider_notes: Set(None),
        cancellation_reason: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_contract.insert(db).await
}

/// Fetch all contracts (admin view).
pub async fn get_all_contracts(db: &DatabaseConnection) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch the contracts a user participates in, on either side.
pub async fn get_contracts_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(
            Condition::any()
                .add(contracts::Column::ClientId.eq(user_id))
                .add(contracts::Column::ProviderId.eq(user_id)),
        )
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Persist a validated lifecycle patch onto a freshly-read contract row.
pub async fn apply_patch(
    db: &DatabaseConnection,
    contract: contracts::Model,
    patch: &ContractPatch,
) -> Result<contracts::Model, DbErr> {
    let mut active: contracts::ActiveModel = contract.into();

    if let Some(status) = patch.status {
        active.status = Set(status);
    }
    if let Some(price) = patch.agreed_price {
        active.agreed_price = Set(Some(price));
    }
    if let Some(price) = patch.proposed_price {
        active.proposed_price = Set(price);
    }
    if let Some(date) = patch.start_date {
        active.start_date = Set(Some(date));
    }
    if let Some(date) = patch.end_date {
        active.end_date = Set(Some(date));
    }
    if let Some(date) = patch.completion_date {
        active.completion_date = Set(Some(date));
    }
    if let Some(reason) = &patch.cancellation_reason {
        active.cancellation_reason = Set(Some(reason.clone()));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a contract by ID.
pub async fn delete_contract(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    contracts::Entity::delete_by_id(id).exec(db).await
}
