//! # Ledger
//!
//! Fungible-token accounting: balances, allowances and total supply.
//!
//! ## Conservation
//!
//! Only [`mint`] changes the total supply, and it credits exactly the amount
//! it adds to the supply. Balance moves debit and credit the same amount. So
//! the sum of all balances always equals [`total_supply`].
//!
//! ## Failure contract
//!
//! [`transfer`] and [`transfer_from`] report routine rejections as
//! `Ok(false)` without writing anything:
//!
//! - zero amount
//! - null recipient
//! - insufficient balance
//! - insufficient allowance
//!
//! Callers such as batch payout loops can branch on that result. Every
//! other failure comes back as `Err` and aborts the whole invocation:
//!
//! - the token is still frozen (sale not finalized)
//! - arithmetic overflow

use soroban_sdk::{Address, Env};

use crate::events;
use crate::math::{self, Amount};
use crate::storage;
use crate::types;
use crate::Error;

pub fn total_supply(env: &Env) -> Amount {
    storage::total_supply(env)
}

pub fn balance_of(env: &Env, holder: &Address) -> Amount {
    storage::balance(env, holder)
}

pub fn allowance(env: &Env, owner: &Address, spender: &Address) -> Amount {
    storage::allowance(env, owner, spender)
}

/// Credit `amount` new tokens to `to`.
///
/// No cap is enforced here; the sale decides how much may be minted.
pub(crate) fn mint(env: &Env, to: &Address, amount: Amount) -> Result<(), Error> {
    let supply = math::add(storage::total_supply(env), amount)?;
    let balance = math::add(storage::balance(env, to), amount)?;
    storage::set_total_supply(env, supply);
    storage::set_balance(env, to, balance);
    events::emit_mint(env, to.clone(), amount);
    Ok(())
}

/// Overwrite the allowance `owner` grants to `spender`.
pub fn approve(env: &Env, owner: &Address, spender: &Address, amount: Amount) {
    storage::set_allowance(env, owner, spender, amount);
    events::emit_approval(env, owner.clone(), spender.clone(), amount);
}

/// Holder-initiated transfer. Blocked until the sale is finalized.
pub fn transfer(env: &Env, from: &Address, to: &Address, amount: Amount) -> Result<bool, Error> {
    require_unfrozen(env)?;
    move_balance(env, from, to, amount)
}

/// Spend from `from` on the strength of the allowance it granted `spender`.
pub fn transfer_from(
    env: &Env,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: Amount,
) -> Result<bool, Error> {
    require_unfrozen(env)?;
    if !is_movable(env, from, to, amount) {
        return Ok(false);
    }
    let allowed = storage::allowance(env, from, spender);
    if amount > allowed {
        return Ok(false);
    }
    let remaining = math::sub(allowed, amount)?;
    let moved = move_balance(env, from, to, amount)?;
    if moved {
        storage::set_allowance(env, from, spender, remaining);
    }
    Ok(moved)
}

/// Transfer that ignores the freeze. Reserved for the vesting safe paying out
/// its own holdings.
pub(crate) fn transfer_privileged(
    env: &Env,
    from: &Address,
    to: &Address,
    amount: Amount,
) -> Result<bool, Error> {
    move_balance(env, from, to, amount)
}

fn require_unfrozen(env: &Env) -> Result<(), Error> {
    if !storage::load_state(env).finalized {
        return Err(Error::SaleNotFinalized);
    }
    Ok(())
}

fn is_movable(env: &Env, from: &Address, to: &Address, amount: Amount) -> bool {
    amount != 0 && !types::is_null(env, to) && amount <= storage::balance(env, from)
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: Amount) -> Result<bool, Error> {
    if !is_movable(env, from, to, amount) {
        return Ok(false);
    }
    if from != to {
        let from_balance = math::sub(storage::balance(env, from), amount)?;
        let to_balance = math::add(storage::balance(env, to), amount)?;
        storage::set_balance(env, from, from_balance);
        storage::set_balance(env, to, to_balance);
    }
    events::emit_transfer(env, from.clone(), to.clone(), amount);
    Ok(true)
}
