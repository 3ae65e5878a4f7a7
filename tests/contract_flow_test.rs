//! End-to-end walk through the contract negotiation state machine using the
//! public lifecycle API, applying each planned patch to an in-memory
//! contract the way the persistence layer would.
//!
//! Run with: `cargo test --test contract_flow_test`
use chrono::Utc;
use uuid::Uuid;

use servihub_backend::ApiError;
use servihub_backend::auth::authorization::ContractActor;
use servihub_backend::lifecycle::{self, ContractPatch};
use servihub_backend::models::contracts::{Model, Status, UpdateContractStatus};

fn new_contract(proposed_price: f64) -> Model {
    Model {
        id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        provider_id: Uuid::new_v4(),
        title: "Garden landscaping".to_string(),
        description: "Full backyard redesign with irrigation".to_string(),
        proposed_price,
        agreed_price: None,
        estimated_duration: Some("2 weeks".to_string()),
        location: "Lisbon".to_string(),
        status: Status::PendingAcceptance,
        start_date: None,
        end_date: None,
        completion_date: None,
        client_notes: None,
        provider_notes: None,
        cancellation_reason: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

/// Mirror of what `db::contracts::apply_patch` persists.
fn apply(contract: &mut Model, patch: &ContractPatch) {
    if let Some(status) = patch.status {
        contract.status = status;
    }
    if let Some(price) = patch.agreed_price {
        contract.agreed_price = Some(price);
    }
    if let Some(price) = patch.proposed_price {
        contract.proposed_price = price;
    }
    if let Some(date) = patch.start_date {
        contract.start_date = Some(date);
    }
    if let Some(date) = patch.end_date {
        contract.end_date = Some(date);
    }
    if let Some(date) = patch.completion_date {
        contract.completion_date = Some(date);
    }
    if let Some(reason) = &patch.cancellation_reason {
        contract.cancellation_reason = Some(reason.clone());
    }
}

fn request(status: Status) -> UpdateContractStatus {
    UpdateContractStatus {
        status,
        agreed_price: None,
        start_date: None,
        end_date: None,
        cancellation_reason: None,
    }
}

#[test]
fn happy_path_proposal_to_completion() {
    let mut contract = new_contract(300.0);

    // Provider accepts with no explicit price: the proposal carries over.
    let patch = lifecycle::plan_transition(
        &contract,
        ContractActor::Provider,
        &request(Status::Accepted),
        Utc::now(),
    )
    .unwrap();
    apply(&mut contract, &patch);
    assert_eq!(contract.status, Status::Accepted);
    assert_eq!(contract.agreed_price, Some(300.0));

    // Provider starts the work.
    let patch = lifecycle::plan_transition(
        &contract,
        ContractActor::Provider,
        &request(Status::InProgress),
        Utc::now(),
    )
    .unwrap();
    apply(&mut contract, &patch);
    assert_eq!(contract.status, Status::InProgress);
    assert!(contract.start_date.is_some());

    // Provider completes it.
    let patch = lifecycle::plan_transition(
        &contract,
        ContractActor::Provider,
        &request(Status::Completed),
        Utc::now(),
    )
    .unwrap();
    apply(&mut contract, &patch);
    assert_eq!(contract.status, Status::Completed);
    assert!(contract.completion_date.is_some());
    assert!(contract.end_date.is_some());

    // Terminal: nothing moves it anymore for the parties.
    for actor in [ContractActor::Client, ContractActor::Provider] {
        assert!(
            lifecycle::plan_transition(&contract, actor, &request(Status::Cancelled), Utc::now())
                .is_err()
        );
    }
}

#[test]
fn counter_offer_round_trip() {
    let mut contract = new_contract(300.0);

    // Provider counters at 350 while pending acceptance.
    let mut input = request(Status::PendingClientAgreement);
    input.agreed_price = Some(350.0);
    let patch =
        lifecycle::plan_transition(&contract, ContractActor::Provider, &input, Utc::now()).unwrap();
    apply(&mut contract, &patch);
    assert_eq!(contract.status, Status::PendingClientAgreement);
    assert_eq!(contract.agreed_price, Some(350.0));

    // Client accepts: the countered price sticks.
    let patch = lifecycle::plan_transition(
        &contract,
        ContractActor::Client,
        &request(Status::Accepted),
        Utc::now(),
    )
    .unwrap();
    apply(&mut contract, &patch);
    assert_eq!(contract.status, Status::Accepted);
    assert_eq!(contract.agreed_price, Some(350.0));
}

#[test]
fn client_counter_reopens_acceptance() {
    let mut contract = new_contract(300.0);

    // Provider counters, client counters back through negotiate-price.
    let patch = lifecycle::plan_negotiation(&contract, ContractActor::Provider, 350.0).unwrap();
    apply(&mut contract, &patch);
    assert_eq!(contract.status, Status::PendingClientAgreement);

    let patch = lifecycle::plan_negotiation(&contract, ContractActor::Client, 320.0).unwrap();
    apply(&mut contract, &patch);
    assert_eq!(contract.status, Status::PendingAcceptance);
    assert_eq!(contract.proposed_price, 320.0);
    // The provider's standing counter is untouched until they respond.
    assert_eq!(contract.agreed_price, Some(350.0));
}

#[test]
fn rejected_requests_leave_the_contract_unchanged() {
    let contract = new_contract(300.0);
    let before = contract.clone();

    let err = lifecycle::plan_transition(
        &contract,
        ContractActor::Provider,
        &request(Status::Completed),
        Utc::now(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidTransition { .. }));
    // Planning is pure: a rejected request cannot have touched the model.
    assert_eq!(contract, before);
}
