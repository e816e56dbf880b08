//! # Vesting safe
//!
//! Holds the tokens minted for vesting groups and releases each beneficiary's
//! share once the group's release date has passed.
//!
//! The safe's holdings are ledger balance of the contract's own address
//! ([`holding_address`]). Per group it keeps a [`Bundle`] header and one
//! locked entry per beneficiary. The header's `locked` always equals the
//! sum of its entries.
//!
//! Bundles are set up only by `sale::finalize`. Release is self-service.

use soroban_sdk::{log, Address, Env};

use crate::events;
use crate::ledger;
use crate::math::{self, Amount};
use crate::storage;
use crate::types::{Bundle, Group};
use crate::Error;

pub fn holding_address(env: &Env) -> Address {
    env.current_contract_address()
}

pub fn bundle(env: &Env, group: Group) -> Bundle {
    storage::bundle(env, group)
}

pub fn locked_balance(env: &Env, group: Group, account: &Address) -> Amount {
    storage::locked(env, group, account)
}

pub(crate) fn init_bundle(env: &Env, group: Group, release_timestamp: u64) -> Result<(), Error> {
    let mut bundle = storage::bundle(env, group);
    if bundle.locked != 0 || bundle.release_timestamp != 0 {
        return Err(Error::BundleAlreadyInitialized);
    }
    bundle.release_timestamp = release_timestamp;
    storage::save_bundle(env, group, &bundle);
    events::emit_bundle_initialized(env, group, release_timestamp);
    Ok(())
}

/// Lock `amount` for `account`, on top of anything already locked for it.
pub(crate) fn add_locked_account(
    env: &Env,
    group: Group,
    account: &Address,
    amount: Amount,
) -> Result<(), Error> {
    let mut bundle = storage::bundle(env, group);
    let entry = math::add(storage::locked(env, group, account), amount)?;
    bundle.locked = math::add(bundle.locked, amount)?;
    storage::set_locked(env, group, account, entry);
    storage::save_bundle(env, group, &bundle);
    Ok(())
}

/// Pay out everything `beneficiary` has locked in `group`.
pub fn release_account(
    env: &Env,
    group: Group,
    beneficiary: &Address,
    now: u64,
) -> Result<Amount, Error> {
    let mut bundle = storage::bundle(env, group);
    if now < bundle.release_timestamp {
        return Err(Error::NotYetReleasable);
    }
    let amount = storage::locked(env, group, beneficiary);
    if amount == 0 {
        return Err(Error::NoLockedBalance);
    }
    let holder = holding_address(env);
    if ledger::balance_of(env, &holder) < amount {
        return Err(Error::InsufficientSafeFunding);
    }

    bundle.locked = math::sub(bundle.locked, amount)?;
    storage::set_locked(env, group, beneficiary, 0);
    storage::save_bundle(env, group, &bundle);

    if !ledger::transfer_privileged(env, &holder, beneficiary, amount)? {
        return Err(Error::InsufficientSafeFunding);
    }

    log!(env, "vesting release", group, beneficiary.clone(), amount);
    events::emit_account_released(env, group, beneficiary.clone(), amount);
    Ok(amount)
}
