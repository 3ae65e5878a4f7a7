//! Contract lifecycle engine.
//!
//! Pure transition planning, separated from the HTTP and persistence layers:
//! given the stored contract, the caller's resolved role and the request
//! payload, either produce the full set of field changes plus notification
//! routing, or fail — before anything is written. A rejected request must
//! leave the stored contract untouched.

use chrono::{DateTime, Utc};

use crate::auth::authorization::ContractActor;
use crate::error::ApiError;
use crate::models::contracts::{Model, Status, UpdateContractStatus};
use crate::models::notifications::NotificationKind;

/// Which side of the contract to notify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Client,
    Provider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    pub to: Party,
    pub kind: NotificationKind,
}

/// Field changes produced by a validated transition. `Some` means "set to
/// this value"; no transition ever nulls a field out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractPatch {
    pub status: Option<Status>,
    pub agreed_price: Option<f64>,
    pub proposed_price: Option<f64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub notices: Vec<Notice>,
}

fn check_price(price: f64) -> Result<f64, ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::validation("Price must be a non-negative number"));
    }
    Ok(price)
}

fn invalid(from: Status, to: Status) -> ApiError {
    ApiError::InvalidTransition {
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
    }
}

/// Validate a status-update request against the transition table and return
/// the resulting patch.
pub fn plan_transition(
    contract: &Model,
    actor: ContractActor,
    input: &UpdateContractStatus,
    now: DateTime<Utc>,
) -> Result<ContractPatch, ApiError> {
    let from = contract.status;
    let to = input.status;

    if actor == ContractActor::Admin {
        return plan_admin_override(input, now);
    }

    // Completed and cancelled are final for the contract parties.
    if from.is_terminal() {
        return Err(invalid(from, to));
    }

    let mut patch = ContractPatch {
        status: Some(to),
        ..Default::default()
    };

    // Cancellation is reachable from any non-terminal state, by either party.
    if to == Status::Cancelled {
        patch.cancellation_reason = input.cancellation_reason.clone();
        patch.notices.push(Notice {
            to: other_party(actor, from, to)?,
            kind: NotificationKind::ContractCancellation,
        });
        return Ok(patch);
    }

    match (from, actor, to) {
        // Provider accepts the client's proposal as-is or with a price.
        (Status::PendingAcceptance, ContractActor::Provider, Status::Accepted) => {
            let price = match input.agreed_price {
                Some(p) => check_price(p)?,
                None => contract.proposed_price,
            };
            patch.agreed_price = Some(price);
            patch.start_date = input.start_date;
            patch.end_date = input.end_date;
            patch.notices.push(Notice {
                to: Party::Client,
                kind: NotificationKind::ContractAccepted,
            });
        }
        // Provider counter-offers; the ball moves to the client's side.
        (Status::PendingAcceptance, ContractActor::Provider, Status::PendingClientAgreement) => {
            let price = input
                .agreed_price
                .ok_or_else(|| ApiError::validation("A counter-offer requires agreed_price"))?;
            patch.agreed_price = Some(check_price(price)?);
            patch.notices.push(Notice {
                to: Party::Client,
                kind: NotificationKind::ContractNegotiation,
            });
        }
        // Client agrees to the provider's counter-offer; price already set.
        (Status::PendingClientAgreement, ContractActor::Client, Status::Accepted) => {
            patch.notices.push(Notice {
                to: Party::Provider,
                kind: NotificationKind::ContractAccepted,
            });
        }
        (Status::Accepted, ContractActor::Provider, Status::InProgress) => {
            patch.start_date = Some(input.start_date.unwrap_or(now));
            patch.notices.push(Notice {
                to: Party::Client,
                kind: NotificationKind::ContractUpdate,
            });
        }
        // Either party can close out work in progress.
        (Status::InProgress, ContractActor::Provider, Status::Completed) => {
            patch.completion_date = Some(now);
            patch.end_date = Some(input.end_date.unwrap_or(now));
            patch.notices.push(Notice {
                to: Party::Client,
                kind: NotificationKind::ContractCompletion,
            });
        }
        (Status::InProgress, ContractActor::Client, Status::Completed) => {
            patch.completion_date = Some(now);
            patch.end_date = Some(input.end_date.unwrap_or(now));
            patch.notices.push(Notice {
                to: Party::Provider,
                kind: NotificationKind::ContractCompletion,
            });
        }
        _ => return Err(invalid(from, to)),
    }

    Ok(patch)
}

/// Admin transitions are free-form: any target status, any subset of the
/// negotiated fields overridden. Both parties are notified.
fn plan_admin_override(
    input: &UpdateContractStatus,
    now: DateTime<Utc>,
) -> Result<ContractPatch, ApiError> {
    let mut patch = ContractPatch {
        status: Some(input.status),
        start_date: input.start_date,
        end_date: input.end_date,
        cancellation_reason: input.cancellation_reason.clone(),
        ..Default::default()
    };

    if let Some(p) = input.agreed_price {
        patch.agreed_price = Some(check_price(p)?);
    }
    if input.status == Status::Completed {
        patch.completion_date = Some(now);
    }

    patch.notices.push(Notice {
        to: Party::Client,
        kind: NotificationKind::ContractUpdate,
    });
    patch.notices.push(Notice {
        to: Party::Provider,
        kind: NotificationKind::ContractUpdate,
    });

    Ok(patch)
}

/// The party to notify when `actor` performs a transition: always the other
/// side. Errors if the actor/target pairing isn't cancellable by this actor.
fn other_party(actor: ContractActor, from: Status, to: Status) -> Result<Party, ApiError> {
    match actor {
        ContractActor::Client => Ok(Party::Provider),
        ContractActor::Provider => Ok(Party::Client),
        ContractActor::Admin => Err(invalid(from, to)),
    }
}

/// Validate a negotiate-price request. Separate from status updates: the
/// counter-offer loop rewrites one price field and flips the pending status
/// to the other side.
pub fn plan_negotiation(
    contract: &Model,
    actor: ContractActor,
    new_price: f64,
) -> Result<ContractPatch, ApiError> {
    let price = check_price(new_price)?;

    if !matches!(
        contract.status,
        Status::PendingAcceptance | Status::PendingClientAgreement
    ) {
        return Err(ApiError::validation(format!(
            "Price can only be negotiated while the contract is pending (current status: '{}')",
            contract.status.as_str()
        )));
    }

    let mut patch = ContractPatch::default();
    match actor {
        ContractActor::Provider => {
            patch.agreed_price = Some(price);
            patch.status = Some(Status::PendingClientAgreement);
            patch.notices.push(Notice {
                to: Party::Client,
                kind: NotificationKind::ContractNegotiation,
            });
        }
        ContractActor::Client => {
            patch.proposed_price = Some(price);
            patch.status = Some(Status::PendingAcceptance);
            patch.notices.push(Notice {
                to: Party::Provider,
                kind: NotificationKind::ContractNegotiation,
            });
        }
        ContractActor::Admin => {
            patch.agreed_price = Some(price);
            patch.notices.push(Notice {
                to: Party::Client,
                kind: NotificationKind::ContractNegotiation,
            });
            patch.notices.push(Notice {
                to: Party::Provider,
                kind: NotificationKind::ContractNegotiation,
            });
        }
    }

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn contract(status: Status) -> Model {
        Model {
            id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            provider_id: Uuid::new_v4(),
            title: "Fix kitchen sink".to_string(),
            description: "Replace the trap and reseal the drain".to_string(),
            proposed_price: 300.0,
            agreed_price: None,
            estimated_duration: None,
            location: "Porto Alegre".to_string(),
            status,
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

    fn status_input(status: Status) -> UpdateContractStatus {
        UpdateContractStatus {
            status,
            agreed_price: None,
            start_date: None,
            end_date: None,
            cancellation_reason: None,
        }
    }

    #[test]
    fn provider_accept_defaults_agreed_price_to_proposed() {
        let c = contract(Status::PendingAcceptance);
        let patch = plan_transition(
            &c,
            ContractActor::Provider,
            &status_input(Status::Accepted),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(patch.status, Some(Status::Accepted));
        assert_eq!(patch.agreed_price, Some(300.0));
        assert_eq!(
            patch.notices,
            vec![Notice {
                to: Party::Client,
                kind: NotificationKind::ContractAccepted,
            }]
        );
    }

    #[test]
    fn client_cannot_accept_own_proposal() {
        let c = contract(Status::PendingAcceptance);
        let err = plan_transition(
            &c,
            ContractActor::Client,
            &status_input(Status::Accepted),
            Utc::now(),
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::InvalidTransition { .. }));
    }

    #[test]
    fn counter_offer_loop_preserves_countered_price() {
        // Provider counters 350 while pending acceptance.
        let c = contract(Status::PendingAcceptance);
        let mut input = status_input(Status::PendingClientAgreement);
        input.agreed_price = Some(350.0);
        let patch =
            plan_transition(&c, ContractActor::Provider, &input, Utc::now()).unwrap();
        assert_eq!(patch.status, Some(Status::PendingClientAgreement));
        assert_eq!(patch.agreed_price, Some(350.0));

        // Client accepts; the countered price is left untouched.
        let mut countered = contract(Status::PendingClientAgreement);
        countered.agreed_price = Some(350.0);
        let patch = plan_transition(
            &countered,
            ContractActor::Client,
            &status_input(Status::Accepted),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(patch.status, Some(Status::Accepted));
        assert_eq!(patch.agreed_price, None);
    }

    #[test]
    fn counter_offer_without_price_is_rejected() {
        let c = contract(Status::PendingAcceptance);
        let err = plan_transition(
            &c,
            ContractActor::Provider,
            &status_input(Status::PendingClientAgreement),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn pending_contract_cannot_jump_to_completed() {
        let c = contract(Status::PendingAcceptance);
        for actor in [ContractActor::Provider, ContractActor::Client] {
            let err =
                plan_transition(&c, actor, &status_input(Status::Completed), Utc::now())
                    .unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("pending_acceptance"), "{msg}");
            assert!(msg.contains("completed"), "{msg}");
        }
    }

    #[test]
    fn provider_start_defaults_start_date_to_now() {
        let c = contract(Status::Accepted);
        let now = Utc::now();
        let patch = plan_transition(
            &c,
            ContractActor::Provider,
            &status_input(Status::InProgress),
            now,
        )
        .unwrap();
        assert_eq!(patch.start_date, Some(now));
    }

    #[test]
    fn either_party_can_complete_in_progress_work() {
        let c = contract(Status::InProgress);
        let now = Utc::now();

        let provider_patch = plan_transition(
            &c,
            ContractActor::Provider,
            &status_input(Status::Completed),
            now,
        )
        .unwrap();
        assert_eq!(provider_patch.completion_date, Some(now));
        assert_eq!(provider_patch.end_date, Some(now));
        assert_eq!(provider_patch.notices[0].to, Party::Client);

        let client_patch = plan_transition(
            &c,
            ContractActor::Client,
            &status_input(Status::Completed),
            now,
        )
        .unwrap();
        assert_eq!(client_patch.completion_date, Some(now));
        assert_eq!(client_patch.notices[0].to, Party::Provider);
    }

    #[test]
    fn cancel_reachable_from_every_non_terminal_state() {
        for status in [
            Status::PendingAcceptance,
            Status::PendingClientAgreement,
            Status::Accepted,
            Status::InProgress,
            Status::Disputed,
        ] {
            let c = contract(status);
            let mut input = status_input(Status::Cancelled);
            input.cancellation_reason = Some("schedule conflict".to_string());
            let patch =
                plan_transition(&c, ContractActor::Client, &input, Utc::now()).unwrap();
            assert_eq!(patch.status, Some(Status::Cancelled));
            assert_eq!(
                patch.cancellation_reason.as_deref(),
                Some("schedule conflict")
            );
            assert_eq!(patch.notices[0].to, Party::Provider);
            assert_eq!(patch.notices[0].kind, NotificationKind::ContractCancellation);
        }
    }

    #[test]
    fn terminal_states_are_final_for_parties() {
        for terminal in [Status::Completed, Status::Cancelled] {
            let c = contract(terminal);
            for target in [Status::InProgress, Status::Cancelled, Status::Accepted] {
                for actor in [ContractActor::Client, ContractActor::Provider] {
                    assert!(
                        plan_transition(&c, actor, &status_input(target), Utc::now())
                            .is_err()
                    );
                }
            }
        }
    }

    #[test]
    fn admin_override_is_free_form_and_notifies_both() {
        let c = contract(Status::Completed);
        let mut input = status_input(Status::Disputed);
        input.agreed_price = Some(123.0);
        let patch = plan_transition(&c, ContractActor::Admin, &input, Utc::now()).unwrap();

        assert_eq!(patch.status, Some(Status::Disputed));
        assert_eq!(patch.agreed_price, Some(123.0));
        assert_eq!(patch.notices.len(), 2);
    }

    #[test]
    fn admin_completion_sets_completion_date() {
        let c = contract(Status::InProgress);
        let now = Utc::now();
        let patch = plan_transition(
            &c,
            ContractActor::Admin,
            &status_input(Status::Completed),
            now,
        )
        .unwrap();
        assert_eq!(patch.completion_date, Some(now));
    }

    #[test]
    fn negotiation_flips_pending_status_between_sides() {
        let c = contract(Status::PendingAcceptance);
        let patch = plan_negotiation(&c, ContractActor::Provider, 350.0).unwrap();
        assert_eq!(patch.agreed_price, Some(350.0));
        assert_eq!(patch.status, Some(Status::PendingClientAgreement));

        let c = contract(Status::PendingClientAgreement);
        let patch = plan_negotiation(&c, ContractActor::Client, 320.0).unwrap();
        assert_eq!(patch.proposed_price, Some(320.0));
        assert_eq!(patch.status, Some(Status::PendingAcceptance));
    }

    #[test]
    fn admin_negotiation_keeps_status_and_notifies_both() {
        let c = contract(Status::PendingClientAgreement);
        let patch = plan_negotiation(&c, ContractActor::Admin, 400.0).unwrap();
        assert_eq!(patch.status, None);
        assert_eq!(patch.agreed_price, Some(400.0));
        assert_eq!(patch.notices.len(), 2);
    }

    #[test]
    fn negotiation_rejected_once_accepted() {
        for status in [Status::Accepted, Status::InProgress, Status::Completed] {
            let c = contract(status);
            assert!(plan_negotiation(&c, ContractActor::Provider, 100.0).is_err());
        }
    }

    #[test]
    fn negative_or_non_finite_prices_are_rejected() {
        let c = contract(Status::PendingAcceptance);
        assert!(plan_negotiation(&c, ContractActor::Client, -1.0).is_err());
        assert!(plan_negotiation(&c, ContractActor::Client, f64::NAN).is_err());

        let mut input = status_input(Status::Accepted);
        input.agreed_price = Some(-5.0);
        assert!(plan_transition(&c, ContractActor::Provider, &input, Utc::now()).is_err());
    }
}
