//! # Storage
//!
//! Typed helpers over the two Soroban storage tiers used by the fundraiser.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key           | Type             | Description                          |
//! |---------------|------------------|--------------------------------------|
//! | `Metadata`    | `TokenMetadata`  | Token name, symbol, decimals         |
//! | `SaleConfig`  | `SaleConfig`     | Sale configuration row               |
//! | `SaleState`   | `SaleState`      | Raised/collected counters and flags  |
//! | `Plan`        | `AllocationPlan` | Bounty, partner and vesting tables   |
//! | `TotalSupply` | `Amount`         | Ledger total supply                  |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                       | Type     | Description                      |
//! |---------------------------|----------|----------------------------------|
//! | `Balance(addr)`           | `Amount` | Token balance                    |
//! | `Allowance(owner, spdr)`  | `Amount` | Delegated spending allowance     |
//! | `Raised(addr)`            | `Amount` | Tokens bought by a contributor   |
//! | `Bundle(group)`           | `Bundle` | Vesting bundle header            |
//! | `Locked(group, addr)`     | `Amount` | Locked entry inside a bundle     |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//! Absent rows read as zero, and rows written back as zero are removed.

use soroban_sdk::{contracttype, Address, Env};

use crate::math::Amount;
use crate::types::{AllocationPlan, Bundle, Group, SaleConfig, SaleState, TokenMetadata};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Metadata,
    SaleConfig,
    SaleState,
    Plan,
    TotalSupply,
    Balance(Address),
    Allowance(Address, Address),
    Raised(Address),
    Bundle(Group),
    Locked(Group, Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::SaleConfig)
}

pub fn save_metadata(env: &Env, metadata: &TokenMetadata) {
    env.storage().instance().set(&DataKey::Metadata, metadata);
    bump_instance(env);
}

pub fn load_metadata(env: &Env) -> Result<TokenMetadata, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Metadata)
        .ok_or(Error::NotInitialized)
}

pub fn save_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::SaleConfig, config);
    bump_instance(env);
}

pub fn load_config(env: &Env) -> Result<SaleConfig, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::SaleConfig)
        .ok_or(Error::NotInitialized)
}

pub fn save_state(env: &Env, state: &SaleState) {
    env.storage().instance().set(&DataKey::SaleState, state);
    bump_instance(env);
}

pub fn load_state(env: &Env) -> SaleState {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::SaleState)
        .unwrap_or_default()
}

pub fn save_plan(env: &Env, plan: &AllocationPlan) {
    env.storage().instance().set(&DataKey::Plan, plan);
    bump_instance(env);
}

pub fn load_plan(env: &Env) -> Result<AllocationPlan, Error> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Plan)
        .ok_or(Error::NotInitialized)
}

pub fn total_supply(env: &Env) -> Amount {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: Amount) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

fn read_amount(env: &Env, key: &DataKey) -> Amount {
    match env.storage().persistent().get::<DataKey, Amount>(key) {
        Some(amount) => {
            bump_persistent(env, key);
            amount
        }
        None => 0,
    }
}

fn write_amount(env: &Env, key: &DataKey, amount: Amount) {
    if amount == 0 {
        env.storage().persistent().remove(key);
    } else {
        env.storage().persistent().set(key, &amount);
        bump_persistent(env, key);
    }
}

pub fn balance(env: &Env, holder: &Address) -> Amount {
    read_amount(env, &DataKey::Balance(holder.clone()))
}

pub fn set_balance(env: &Env, holder: &Address, amount: Amount) {
    write_amount(env, &DataKey::Balance(holder.clone()), amount);
}

pub fn allowance(env: &Env, owner: &Address, spender: &Address) -> Amount {
    read_amount(env, &DataKey::Allowance(owner.clone(), spender.clone()))
}

pub fn set_allowance(env: &Env, owner: &Address, spender: &Address, amount: Amount) {
    write_amount(
        env,
        &DataKey::Allowance(owner.clone(), spender.clone()),
        amount,
    );
}

pub fn raised_by(env: &Env, contributor: &Address) -> Amount {
    read_amount(env, &DataKey::Raised(contributor.clone()))
}

pub fn set_raised_by(env: &Env, contributor: &Address, amount: Amount) {
    write_amount(env, &DataKey::Raised(contributor.clone()), amount);
}

pub fn bundle(env: &Env, group: Group) -> Bundle {
    let key = DataKey::Bundle(group);
    match env.storage().persistent().get::<DataKey, Bundle>(&key) {
        Some(bundle) => {
            bump_persistent(env, &key);
            bundle
        }
        None => Bundle::default(),
    }
}

pub fn save_bundle(env: &Env, group: Group, bundle: &Bundle) {
    let key = DataKey::Bundle(group);
    env.storage().persistent().set(&key, bundle);
    bump_persistent(env, &key);
}

pub fn locked(env: &Env, group: Group, account: &Address) -> Amount {
    read_amount(env, &DataKey::Locked(group, account.clone()))
}

pub fn set_locked(env: &Env, group: Group, account: &Address, amount: Amount) {
    write_amount(env, &DataKey::Locked(group, account.clone()), amount);
}
