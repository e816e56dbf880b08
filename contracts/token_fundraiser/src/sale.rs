//! # Sale
//!
//! The fundraiser state machine. It accepts contributions while the sale is
//! [`SalePhase::Active`], mints tokens for them, enforces the hard cap and the
//! per-contributor limit, and performs the one-way finalization.
//!
//! ## Finalization order
//!
//! 1. mark the sale finalized, which unfreezes the token;
//! 2. mint the bounty allocation to the owner;
//! 3. mint partner allocations, unless already claimed;
//! 4. mint the vesting total to the safe and set up every bundle;
//! 5. pay the collected base currency to the beneficiary.
//!
//! Step 5 is the only call into another contract and runs after all internal
//! state is written. A failure at any step fails the invocation and the host
//! discards every write made before it.

use soroban_sdk::{log, token, Address, Env};

use crate::events;
use crate::ledger;
use crate::math::{self, Amount};
use crate::ownership::OwnerCap;
use crate::safe;
use crate::storage;
use crate::types::{
    self, Allocation, AllocationPlan, SaleConfig, SaleParams, SalePhase, SaleState, VestingPlan,
};
use crate::whitelist;
use crate::Error;

/// Validate and persist the sale configuration.
pub fn configure(
    env: &Env,
    _cap: &OwnerCap,
    params: SaleParams,
    plan: AllocationPlan,
    now: u64,
) -> Result<SaleConfig, Error> {
    if types::is_null(env, &params.beneficiary)
        || params.end_time <= params.start_time
        || params.conversion_rate == 0
        || params.hard_cap == 0
    {
        return Err(Error::InvalidConfiguration);
    }
    validate_plan(&plan)?;

    let config = SaleConfig {
        individual_limit_tokens: math::mul(params.individual_limit, params.conversion_rate)?,
        beneficiary: params.beneficiary,
        base_token: params.base_token,
        conversion_rate: params.conversion_rate,
        start_time: params.start_time,
        end_time: params.end_time,
        hard_cap: params.hard_cap,
        minimum_contribution: params.minimum_contribution,
        individual_limit: params.individual_limit,
        max_gas_price: params.max_gas_price,
        deployed_at: now,
    };
    storage::save_config(env, &config);
    storage::save_state(env, &SaleState::default());
    storage::save_plan(env, &plan);
    Ok(config)
}

/// Groups must be unique and the grand total must fit the amount width, so a
/// valid plan can always be minted in full at finalization. Returns that total.
fn validate_plan(plan: &AllocationPlan) -> Result<Amount, Error> {
    for (i, vesting) in plan.vesting.iter().enumerate() {
        if plan
            .vesting
            .iter()
            .skip(i + 1)
            .any(|other| other.group == vesting.group)
        {
            return Err(Error::InvalidConfiguration);
        }
    }
    allocation_total(&plan.partners)
        .and_then(|partners| math::add(plan.bounty, partners))
        .and_then(|total| math::add(total, vesting_total(&plan.vesting)?))
        .map_err(|_| Error::InvalidConfiguration)
}

fn allocation_total(allocations: &soroban_sdk::Vec<Allocation>) -> Result<Amount, Error> {
    allocations
        .iter()
        .try_fold(0, |total, allocation| math::add(total, allocation.amount))
}

fn vesting_total(plans: &soroban_sdk::Vec<VestingPlan>) -> Result<Amount, Error> {
    plans.iter().try_fold(0, |total, plan| {
        math::add(total, allocation_total(&plan.accounts)?)
    })
}

pub fn phase(env: &Env, now: u64) -> Result<SalePhase, Error> {
    let config = storage::load_config(env)?;
    let state = storage::load_state(env);
    Ok(SalePhase::resolve(&config, &state, now))
}

/// Change the conversion rate. Only possible before the sale starts.
pub fn set_conversion_rate(
    env: &Env,
    _cap: &OwnerCap,
    conversion_rate: Amount,
    now: u64,
) -> Result<(), Error> {
    if conversion_rate == 0 {
        return Err(Error::RateMustBePositive);
    }
    let mut config = storage::load_config(env)?;
    let state = storage::load_state(env);
    if SalePhase::resolve(&config, &state, now).has_started() {
        return Err(Error::SaleAlreadyStarted);
    }

    config.individual_limit_tokens = math::mul(config.individual_limit, conversion_rate)?;
    config.conversion_rate = conversion_rate;
    storage::save_config(env, &config);

    log!(env, "conversion rate changed", conversion_rate);
    events::emit_rate_changed(env, conversion_rate);
    Ok(())
}

pub fn set_beneficiary(env: &Env, _cap: &OwnerCap, beneficiary: &Address) -> Result<(), Error> {
    if types::is_null(env, beneficiary) {
        return Err(Error::NullBeneficiary);
    }
    let mut config = storage::load_config(env)?;
    let old = core::mem::replace(&mut config.beneficiary, beneficiary.clone());
    storage::save_config(env, &config);
    events::emit_beneficiary_changed(env, old, beneficiary.clone());
    Ok(())
}

/// Accept `base_amount` from `contributor` and mint the matching tokens.
///
/// Orders that would overshoot the hard cap or the contributor's limit are
/// rejected whole, never partially filled. Returns the tokens minted.
pub fn contribute(
    env: &Env,
    contributor: &Address,
    base_amount: Amount,
    gas_price: u64,
    now: u64,
) -> Result<Amount, Error> {
    let config = storage::load_config(env)?;
    let mut state = storage::load_state(env);
    if !SalePhase::resolve(&config, &state, now).accepts_contributions() {
        return Err(Error::SaleNotActive);
    }
    whitelist::require_whitelisted(env, contributor)?;
    whitelist::require_acceptable_gas_price(&config, gas_price)?;
    if base_amount == 0 || base_amount < config.minimum_contribution {
        return Err(Error::ContributionTooSmall);
    }

    let tokens = math::mul(base_amount, config.conversion_rate)?;
    let total_raised = math::add(state.total_raised, tokens)?;
    if total_raised > config.hard_cap {
        return Err(Error::HardCapExceeded);
    }
    let raised_by = math::add(storage::raised_by(env, contributor), tokens)?;
    if raised_by > config.individual_limit_tokens {
        return Err(Error::IndividualLimitExceeded);
    }

    token::Client::new(env, &config.base_token).transfer(
        contributor,
        &env.current_contract_address(),
        &math::to_token_amount(base_amount)?,
    );

    ledger::mint(env, contributor, tokens)?;
    state.total_raised = total_raised;
    state.total_collected = math::add(state.total_collected, base_amount)?;
    storage::save_state(env, &state);
    storage::set_raised_by(env, contributor, raised_by);

    events::emit_funds_received(
        env,
        contributor.clone(),
        base_amount,
        tokens,
        ledger::total_supply(env),
        config.conversion_rate,
    );
    Ok(tokens)
}

/// Mint partner allocations ahead of finalization. One-shot.
pub fn claim_partner_tokens(env: &Env, _cap: &OwnerCap, now: u64) -> Result<Amount, Error> {
    let config = storage::load_config(env)?;
    let mut state = storage::load_state(env);
    match SalePhase::resolve(&config, &state, now) {
        SalePhase::PreSale => return Err(Error::SaleNotActive),
        SalePhase::Finalized => return Err(Error::AlreadyFinalized),
        SalePhase::Active | SalePhase::HardCapReached | SalePhase::Ended => {}
    }
    if state.partners_claimed {
        return Err(Error::PartnerTokensAlreadyClaimed);
    }

    let total = mint_partner_tokens(env)?;
    state.partners_claimed = true;
    storage::save_state(env, &state);
    log!(env, "partner tokens claimed", total);
    Ok(total)
}

fn mint_partner_tokens(env: &Env) -> Result<Amount, Error> {
    let plan = storage::load_plan(env)?;
    let mut total: Amount = 0;
    for partner in plan.partners.iter() {
        ledger::mint(env, &partner.account, partner.amount)?;
        total = math::add(total, partner.amount)?;
    }
    events::emit_partner_tokens_claimed(env, total);
    Ok(total)
}

/// Close the sale. See the module docs for the exact sequence.
pub fn finalize(env: &Env, cap: &OwnerCap, now: u64) -> Result<(), Error> {
    let config = storage::load_config(env)?;
    let mut state = storage::load_state(env);
    match SalePhase::resolve(&config, &state, now) {
        SalePhase::Finalized => return Err(Error::AlreadyFinalized),
        phase if phase.is_endable() => {}
        _ => return Err(Error::SaleNotEndable),
    }
    let plan = storage::load_plan(env)?;

    state.finalized = true;

    if plan.bounty > 0 {
        ledger::mint(env, cap.owner(), plan.bounty)?;
    }
    if !state.partners_claimed {
        mint_partner_tokens(env)?;
        state.partners_claimed = true;
    }
    storage::save_state(env, &state);

    let locked_total = vesting_total(&plan.vesting)?;
    if locked_total > 0 {
        ledger::mint(env, &safe::holding_address(env), locked_total)?;
    }
    for vesting in plan.vesting.iter() {
        let release_timestamp = math::add_seconds(config.deployed_at, vesting.lock_period)?;
        safe::init_bundle(env, vesting.group, release_timestamp)?;
        for allocation in vesting.accounts.iter() {
            safe::add_locked_account(env, vesting.group, &allocation.account, allocation.amount)?;
        }
    }

    log!(env, "sale finalized", state.total_raised, state.total_collected);
    events::emit_finalized(
        env,
        state.total_raised,
        state.total_collected,
        ledger::total_supply(env),
    );

    if state.total_collected > 0 {
        token::Client::new(env, &config.base_token).transfer(
            &env.current_contract_address(),
            &config.beneficiary,
            &math::to_token_amount(state.total_collected)?,
        );
    }
    Ok(())
}

/// Largest base amount `contributor` could still put in, given the remaining
/// hard-cap room and its own remaining limit.
pub fn contribution_headroom(env: &Env, contributor: &Address) -> Result<Amount, Error> {
    let config = storage::load_config(env)?;
    let state = storage::load_state(env);
    if state.finalized {
        return Ok(0);
    }
    let cap_room = math::sub(config.hard_cap, state.total_raised)?;
    let limit_room = math::sub(
        config.individual_limit_tokens,
        storage::raised_by(env, contributor),
    )?;
    let cap_base = math::div(cap_room, config.conversion_rate)?;
    let limit_base = math::div(limit_room, config.conversion_rate)?;
    Ok(cap_base.min(limit_base))
}
