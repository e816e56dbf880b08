//! # Types
//!
//! Shared data structures used across the fundraiser modules.
//!
//! ## Configuration / runtime split
//!
//! The sale is stored as two instance entries:
//!
//! - [`SaleConfig`]: written at `init`. Only the beneficiary and the
//!   conversion rate (with the derived per-contributor token limit) can change
//!   afterwards, and only through owner-gated entry points.
//! - [`SaleState`]: written on every accepted contribution and once at
//!   finalization.
//!
//! ## Phase as a finite-state machine
//!
//! [`SalePhase`] is never stored. It is resolved from config, state and the
//! ledger timestamp of the current invocation:
//!
//! ```text
//! PreSale ──► Active ──► HardCapReached ──► Finalized
//!                └─────► Ended ─────────────►┘
//! ```
//!
//! `Finalized` is terminal. Every other phase is left only by time passing,
//! by a contribution that exactly fills the hard cap, or by `finalize`.

use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::math::Amount;

/// Strkey of the all-zero ed25519 account. Nobody holds its secret key.
pub const NULL_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// The null address. Never a valid beneficiary or transfer recipient.
pub fn null_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, NULL_ACCOUNT))
}

pub fn is_null(env: &Env, address: &Address) -> bool {
    *address == null_address(env)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

/// Constructor arguments for the sale.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleParams {
    /// Receives the collected base currency at finalization.
    pub beneficiary: Address,
    /// SEP-41 token contributors pay in.
    pub base_token: Address,
    /// Tokens minted per base-currency unit.
    pub conversion_rate: Amount,
    pub start_time: u64,
    pub end_time: u64,
    /// Maximum tokens mintable by contributions.
    pub hard_cap: Amount,
    /// Smallest accepted contribution, in base units.
    pub minimum_contribution: Amount,
    /// Per-contributor limit, in base units.
    pub individual_limit: Amount,
    /// Highest gas price bid a contribution may declare.
    pub max_gas_price: u64,
}

/// Persisted sale configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub beneficiary: Address,
    pub base_token: Address,
    pub conversion_rate: Amount,
    pub start_time: u64,
    pub end_time: u64,
    pub hard_cap: Amount,
    pub minimum_contribution: Amount,
    pub individual_limit: Amount,
    /// `individual_limit * conversion_rate`, recomputed on every rate change.
    pub individual_limit_tokens: Amount,
    pub max_gas_price: u64,
    /// Ledger timestamp of `init`. Vesting release dates are offsets from it.
    pub deployed_at: u64,
}

/// Mutable sale counters.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SaleState {
    /// Tokens minted by contributions.
    pub total_raised: Amount,
    /// Base currency held on behalf of the beneficiary.
    pub total_collected: Amount,
    pub partners_claimed: bool,
    pub finalized: bool,
}

/// Lifecycle phase of the sale at a given instant.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SalePhase {
    /// Before `start_time`. The conversion rate may still change.
    PreSale,
    /// Accepting contributions.
    Active,
    /// `total_raised == hard_cap`, regardless of time.
    HardCapReached,
    /// `end_time` passed without reaching the cap.
    Ended,
    /// Terminal.
    Finalized,
}

impl SalePhase {
    pub fn resolve(config: &SaleConfig, state: &SaleState, now: u64) -> Self {
        if state.finalized {
            SalePhase::Finalized
        } else if state.total_raised == config.hard_cap {
            SalePhase::HardCapReached
        } else if now < config.start_time {
            SalePhase::PreSale
        } else if now >= config.end_time {
            SalePhase::Ended
        } else {
            SalePhase::Active
        }
    }

    pub fn accepts_contributions(&self) -> bool {
        matches!(self, SalePhase::Active)
    }

    pub fn is_endable(&self) -> bool {
        matches!(self, SalePhase::HardCapReached | SalePhase::Ended)
    }

    pub fn has_started(&self) -> bool {
        !matches!(self, SalePhase::PreSale)
    }
}

/// Beneficiary groups of the vesting safe.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Group {
    CoreTeam,
    Advisors,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allocation {
    pub account: Address,
    pub amount: Amount,
}

/// One vesting bundle to set up at finalization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingPlan {
    pub group: Group,
    /// Seconds after `deployed_at` until the bundle unlocks.
    pub lock_period: u64,
    pub accounts: Vec<Allocation>,
}

/// Everything minted at finalization besides contributions.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllocationPlan {
    /// Minted to the owner for the bounty program.
    pub bounty: Amount,
    pub partners: Vec<Allocation>,
    pub vesting: Vec<VestingPlan>,
}

/// Header row of a vesting bundle.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bundle {
    /// Sum of every locked entry still in the bundle.
    pub locked: Amount,
    pub release_timestamp: u64,
}
