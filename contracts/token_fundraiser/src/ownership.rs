//! # Ownership
//!
//! Single-owner access control with a two-step handover:
//!
//! ```text
//! owner ──transfer_ownership──► pending ──accept_ownership──► owner
//! ```
//!
//! ## Storage layout
//!
//! - `OwnerKey::Owner`   → `Address` (the current owner)
//! - `OwnerKey::Pending` → `Address` (proposed owner, until accepted)
//!
//! ## Capabilities
//!
//! [`require_owner`] is the only way to obtain an [`OwnerCap`]. Administrative
//! operations in `sale` and `whitelist` take `&OwnerCap` as a parameter, so
//! they cannot be reached without passing through the owner check first.

use soroban_sdk::{contracttype, Address, Env};

use crate::events;
use crate::Error;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OwnerKey {
    Owner,
    Pending,
}

/// Proof that the invoking address is the current owner.
///
/// Cannot be constructed outside this module.
#[derive(Debug)]
pub struct OwnerCap {
    owner: Address,
}

impl OwnerCap {
    pub fn owner(&self) -> &Address {
        &self.owner
    }
}

/// Record the first owner. Fails with `AlreadyInitialized` if one exists.
pub fn init_owner(env: &Env, owner: &Address) -> Result<OwnerCap, Error> {
    if env.storage().instance().has(&OwnerKey::Owner) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&OwnerKey::Owner, owner);
    Ok(OwnerCap {
        owner: owner.clone(),
    })
}

pub fn owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&OwnerKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OwnerKey::Pending)
}

/// Check that `caller` is the current owner. `caller` must already have
/// authorized the invocation.
pub fn require_owner(env: &Env, caller: &Address) -> Result<OwnerCap, Error> {
    if owner(env)? != *caller {
        return Err(Error::NotOwner);
    }
    Ok(OwnerCap {
        owner: caller.clone(),
    })
}

/// Propose `new_owner`. Overwrites any earlier proposal.
pub fn transfer_ownership(env: &Env, cap: &OwnerCap, new_owner: &Address) {
    env.storage().instance().set(&OwnerKey::Pending, new_owner);
    events::emit_ownership_proposed(env, cap.owner().clone(), new_owner.clone());
}

/// Complete a handover started by [`transfer_ownership`].
pub fn accept_ownership(env: &Env, new_owner: &Address) -> Result<(), Error> {
    match pending_owner(env) {
        Some(ref pending) if pending == new_owner => {}
        _ => return Err(Error::NotPendingOwner),
    }
    let old_owner = owner(env)?;
    env.storage().instance().set(&OwnerKey::Owner, new_owner);
    env.storage().instance().remove(&OwnerKey::Pending);
    events::emit_ownership_transferred(env, old_owner, new_owner.clone());
    Ok(())
}
