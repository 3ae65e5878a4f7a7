use crate::models::contracts;
use crate::models::users::{self, UserType};

/// Capability set resolved once per request from the user record, instead of
/// re-deriving role checks ad hoc in every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub admin: bool,
    pub client: bool,
    pub provider: bool,
}

pub fn capabilities(user: &users::Model) -> Capabilities {
    match user.user_type {
        UserType::Client => Capabilities {
            admin: false,
            client: true,
            provider: false,
        },
        UserType::Provider => Capabilities {
            admin: false,
            client: false,
            provider: true,
        },
        UserType::Both => Capabilities {
            admin: false,
            client: true,
            provider: true,
        },
        UserType::Admin => Capabilities {
            admin: true,
            client: false,
            provider: false,
        },
    }
}

pub fn is_admin(user: &users::Model) -> bool {
    user.user_type == UserType::Admin
}

/// The role a user plays on one specific contract.
///
/// A "both"-typed account is resolved by matching the contract's ID fields;
/// the same user can be the client of one contract and the provider of
/// another. Creation rejects client_id == provider_id, so the match below
/// is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractActor {
    Client,
    Provider,
    Admin,
}

/// Resolve a user against a contract, or None when they are neither a party
/// nor an admin.
pub fn resolve_contract_actor(
    user: &users::Model,
    contract: &contracts::Model,
) -> Option<ContractActor> {
    if user.user_type == UserType::Admin {
        Some(ContractActor::Admin)
    } else if contract.client_id == user.id {
        Some(ContractActor::Client)
    } else if contract.provider_id == user.id {
        Some(ContractActor::Provider)
    } else {
        None
    }
}
