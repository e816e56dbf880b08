//! # Token Fundraiser Contract
//!
//! A time-boxed crowdsale for a fungible accounting token. It exposes the
//! single Soroban contract `TokenFundraiser`, whose entry points cover the
//! whole sale lifecycle:
//!
//! | Phase        | Entry Point(s)                                                   |
//! |--------------|------------------------------------------------------------------|
//! | Bootstrap    | [`TokenFundraiser::init`]                                        |
//! | Ownership    | `transfer_ownership`, `accept_ownership`                         |
//! | Gates        | `whitelist_addresses`, `blacklist_addresses`                     |
//! | Pre-sale     | `set_conversion_rate`, `set_beneficiary`                         |
//! | Sale         | [`TokenFundraiser::contribute`], `claim_partner_tokens`          |
//! | Closing      | [`TokenFundraiser::finalize`]                                    |
//! | Token        | `transfer`, `approve`, `transfer_from`                           |
//! | Vesting      | `release_core_team_account`, `release_advisors_account`          |
//! | Queries      | `config`, `phase`, `balance`, `bundle`, `locked_balance`, ...    |
//!
//! ## Architecture
//!
//! Arithmetic lives in [`math`], ledger accounting in [`ledger`], the sale
//! state machine in [`sale`] and the vesting safe in [`safe`]. Owner and
//! contribution gates live in [`ownership`] and [`whitelist`]. This file
//! contains only the public entry points: each authenticates its caller,
//! reads the ledger timestamp once and delegates.
//!
//! Every entry point that can fail returns `Result<_, Error>`. An `Err` fails
//! the invocation and the host discards all of its storage writes and events.
//!
//! Token transfers keep a two-level failure contract: routine rejections
//! (zero amount, insufficient balance or allowance, null recipient) return
//! `Ok(false)`; a frozen token or an arithmetic fault returns `Err`.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

pub mod events;
pub mod ledger;
pub mod math;
pub mod ownership;
pub mod safe;
pub mod sale;
mod storage;
mod types;
pub mod whitelist;

#[cfg(test)]
mod test_safe;
#[cfg(test)]
mod test_ownership;

pub use math::Amount;
pub use types::{
    null_address, Allocation, AllocationPlan, Bundle, Group, SaleConfig, SaleParams, SalePhase,
    SaleState, TokenMetadata, VestingPlan, NULL_ACCOUNT,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfiguration = 3,
    NotOwner = 4,
    NotPendingOwner = 5,
    NotWhitelisted = 6,
    GasPriceTooHigh = 7,
    SaleNotActive = 8,
    SaleAlreadyStarted = 9,
    SaleNotEndable = 10,
    AlreadyFinalized = 11,
    SaleNotFinalized = 12,
    RateMustBePositive = 13,
    NullBeneficiary = 14,
    ContributionTooSmall = 15,
    HardCapExceeded = 16,
    IndividualLimitExceeded = 17,
    PartnerTokensAlreadyClaimed = 18,
    BundleAlreadyInitialized = 19,
    NotYetReleasable = 20,
    NoLockedBalance = 21,
    InsufficientSafeFunding = 22,
    ArithmeticOverflow = 23,
    ArithmeticUnderflow = 24,
    DivisionByZero = 25,
}

/// Coarse classification of [`Error`] variants.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCategory {
    Configuration,
    Authorization,
    State,
    Arithmetic,
    Limit,
    Funding,
}

impl Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidConfiguration | Error::NullBeneficiary | Error::RateMustBePositive => {
                ErrorCategory::Configuration
            }
            Error::NotOwner
            | Error::NotPendingOwner
            | Error::NotWhitelisted
            | Error::GasPriceTooHigh => ErrorCategory::Authorization,
            Error::AlreadyInitialized
            | Error::NotInitialized
            | Error::SaleNotActive
            | Error::SaleAlreadyStarted
            | Error::SaleNotEndable
            | Error::AlreadyFinalized
            | Error::SaleNotFinalized
            | Error::PartnerTokensAlreadyClaimed
            | Error::BundleAlreadyInitialized
            | Error::NotYetReleasable
            | Error::NoLockedBalance => ErrorCategory::State,
            Error::ArithmeticOverflow | Error::ArithmeticUnderflow | Error::DivisionByZero => {
                ErrorCategory::Arithmetic
            }
            Error::ContributionTooSmall
            | Error::HardCapExceeded
            | Error::IndividualLimitExceeded => ErrorCategory::Limit,
            Error::InsufficientSafeFunding => ErrorCategory::Funding,
        }
    }
}

#[contract]
pub struct TokenFundraiser;

#[contractimpl]
impl TokenFundraiser {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Deploy-time setup. Must be called exactly once.
    ///
    /// - `owner` becomes the contract owner and must sign the transaction.
    /// - `plan` lists every allocation minted at finalization.
    pub fn init(
        env: Env,
        owner: Address,
        metadata: TokenMetadata,
        params: SaleParams,
        plan: AllocationPlan,
    ) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        let now = env.ledger().timestamp();
        let cap = ownership::init_owner(&env, &owner)?;
        storage::save_metadata(&env, &metadata);
        sale::configure(&env, &cap, params, plan, now)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, Error> {
        ownership::owner(&env)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        ownership::pending_owner(&env)
    }

    /// Propose `new_owner`. Takes effect once `new_owner` accepts.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        caller.require_auth();
        let cap = ownership::require_owner(&env, &caller)?;
        ownership::transfer_ownership(&env, &cap, &new_owner);
        Ok(())
    }

    pub fn accept_ownership(env: Env, new_owner: Address) -> Result<(), Error> {
        new_owner.require_auth();
        ownership::accept_ownership(&env, &new_owner)
    }

    // ─────────────────────────────────────────────────────────
    // Contribution gates
    // ─────────────────────────────────────────────────────────

    pub fn whitelist_addresses(env: Env, caller: Address, addresses: Vec<Address>) -> Result<(), Error> {
        caller.require_auth();
        let cap = ownership::require_owner(&env, &caller)?;
        whitelist::whitelist_addresses(&env, &cap, &addresses);
        Ok(())
    }

    pub fn blacklist_addresses(env: Env, caller: Address, addresses: Vec<Address>) -> Result<(), Error> {
        caller.require_auth();
        let cap = ownership::require_owner(&env, &caller)?;
        whitelist::blacklist_addresses(&env, &cap, &addresses);
        Ok(())
    }

    pub fn is_whitelisted(env: Env, address: Address) -> bool {
        whitelist::is_whitelisted(&env, &address)
    }

    pub fn is_acceptable_gas_price(env: Env, gas_price: u64) -> Result<bool, Error> {
        let config = storage::load_config(&env)?;
        Ok(whitelist::is_acceptable_gas_price(&config, gas_price))
    }

    // ─────────────────────────────────────────────────────────
    // Token
    // ─────────────────────────────────────────────────────────

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(storage::load_metadata(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(storage::load_metadata(&env)?.symbol)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Ok(storage::load_metadata(&env)?.decimals)
    }

    pub fn total_supply(env: Env) -> Amount {
        ledger::total_supply(&env)
    }

    pub fn balance(env: Env, holder: Address) -> Amount {
        ledger::balance_of(&env, &holder)
    }

    pub fn allowance(env: Env, owner: Address, spender: Address) -> Amount {
        ledger::allowance(&env, &owner, &spender)
    }

    /// Overwrite the allowance `owner` grants `spender`.
    pub fn approve(env: Env, owner: Address, spender: Address, amount: Amount) {
        owner.require_auth();
        ledger::approve(&env, &owner, &spender, amount);
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Returns `false` for zero amounts, null recipients and insufficient
    /// balances. Fails with `SaleNotFinalized` while the token is frozen.
    pub fn transfer(env: Env, from: Address, to: Address, amount: Amount) -> Result<bool, Error> {
        from.require_auth();
        ledger::transfer(&env, &from, &to, amount)
    }

    /// Like [`TokenFundraiser::transfer`], spending `spender`'s allowance.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<bool, Error> {
        spender.require_auth();
        ledger::transfer_from(&env, &spender, &from, &to, amount)
    }

    // ─────────────────────────────────────────────────────────
    // Sale lifecycle
    // ─────────────────────────────────────────────────────────

    pub fn config(env: Env) -> Result<SaleConfig, Error> {
        storage::load_config(&env)
    }

    pub fn sale_state(env: Env) -> SaleState {
        storage::load_state(&env)
    }

    pub fn phase(env: Env) -> Result<SalePhase, Error> {
        sale::phase(&env, env.ledger().timestamp())
    }

    /// Tokens bought so far by `contributor`.
    pub fn raised_by(env: Env, contributor: Address) -> Amount {
        storage::raised_by(&env, &contributor)
    }

    /// Largest base amount `contributor` could still contribute.
    pub fn contribution_headroom(env: Env, contributor: Address) -> Result<Amount, Error> {
        sale::contribution_headroom(&env, &contributor)
    }

    /// Change the conversion rate. Owner only, before the sale starts.
    pub fn set_conversion_rate(env: Env, caller: Address, conversion_rate: Amount) -> Result<(), Error> {
        caller.require_auth();
        let now = env.ledger().timestamp();
        let cap = ownership::require_owner(&env, &caller)?;
        sale::set_conversion_rate(&env, &cap, conversion_rate, now)
    }

    pub fn set_beneficiary(env: Env, caller: Address, beneficiary: Address) -> Result<(), Error> {
        caller.require_auth();
        let cap = ownership::require_owner(&env, &caller)?;
        sale::set_beneficiary(&env, &cap, &beneficiary)
    }

    /// Pay `base_amount` of the base token and receive sale tokens.
    ///
    /// `gas_price` is the fee bid the client attached to the transaction.
    /// Returns the number of tokens minted.
    pub fn contribute(
        env: Env,
        contributor: Address,
        base_amount: Amount,
        gas_price: u64,
    ) -> Result<Amount, Error> {
        contributor.require_auth();
        let now = env.ledger().timestamp();
        sale::contribute(&env, &contributor, base_amount, gas_price, now)
    }

    pub fn claim_partner_tokens(env: Env, caller: Address) -> Result<Amount, Error> {
        caller.require_auth();
        let now = env.ledger().timestamp();
        let cap = ownership::require_owner(&env, &caller)?;
        sale::claim_partner_tokens(&env, &cap, now)
    }

    /// Close the sale once the hard cap is reached or the end time has passed.
    pub fn finalize(env: Env, caller: Address) -> Result<(), Error> {
        caller.require_auth();
        let now = env.ledger().timestamp();
        let cap = ownership::require_owner(&env, &caller)?;
        sale::finalize(&env, &cap, now)
    }

    // ─────────────────────────────────────────────────────────
    // Vesting safe
    // ─────────────────────────────────────────────────────────

    /// Ledger address holding the tokens locked for vesting.
    pub fn safe_address(env: Env) -> Address {
        safe::holding_address(&env)
    }

    pub fn bundle(env: Env, group: Group) -> Bundle {
        safe::bundle(&env, group)
    }

    pub fn locked_balance(env: Env, group: Group, account: Address) -> Amount {
        safe::locked_balance(&env, group, &account)
    }

    /// Release everything `beneficiary` has locked in `group`.
    pub fn release_account(env: Env, beneficiary: Address, group: Group) -> Result<Amount, Error> {
        beneficiary.require_auth();
        let now = env.ledger().timestamp();
        safe::release_account(&env, group, &beneficiary, now)
    }

    pub fn release_core_team_account(env: Env, beneficiary: Address) -> Result<Amount, Error> {
        Self::release_account(env, beneficiary, Group::CoreTeam)
    }

    pub fn release_advisors_account(env: Env, beneficiary: Address) -> Result<Amount, Error> {
        Self::release_account(env, beneficiary, Group::Advisors)
    }
}
