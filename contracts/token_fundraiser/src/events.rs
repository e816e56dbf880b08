use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::math::Amount;
use crate::types::Group;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Approval {
    pub owner: Address,
    pub spender: Address,
    pub amount: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mint {
    pub to: Address,
    pub amount: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionRateChange {
    pub conversion_rate: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FundsReceived {
    pub contributor: Address,
    pub base_amount: Amount,
    pub tokens: Amount,
    pub new_total_supply: Amount,
    pub conversion_rate: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleFinalized {
    pub total_raised: Amount,
    pub total_collected: Amount,
    pub total_supply: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BeneficiaryChanged {
    pub old: Address,
    pub new: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferred {
    pub old: Address,
    pub new: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PartnerTokensClaimed {
    pub total: Amount,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BundleInitialized {
    pub group: Group,
    pub release_timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountReleased {
    pub group: Group,
    pub beneficiary: Address,
    pub amount: Amount,
}

// ── Ledger ───────────────────────────────────────────────────────────

pub fn emit_transfer(env: &Env, from: Address, to: Address, amount: Amount) {
    let topics = (symbol_short!("transfer"), from.clone(), to.clone());
    env.events().publish(topics, Transfer { from, to, amount });
}

pub fn emit_approval(env: &Env, owner: Address, spender: Address, amount: Amount) {
    let topics = (symbol_short!("approve"), owner.clone(), spender.clone());
    env.events().publish(
        topics,
        Approval {
            owner,
            spender,
            amount,
        },
    );
}

pub fn emit_mint(env: &Env, to: Address, amount: Amount) {
    let topics = (symbol_short!("mint"), to.clone());
    env.events().publish(topics, Mint { to, amount });
}

// ── Sale ─────────────────────────────────────────────────────────────

pub fn emit_rate_changed(env: &Env, conversion_rate: Amount) {
    let topics = (symbol_short!("rate"),);
    env.events()
        .publish(topics, ConversionRateChange { conversion_rate });
}

pub fn emit_funds_received(
    env: &Env,
    contributor: Address,
    base_amount: Amount,
    tokens: Amount,
    new_total_supply: Amount,
    conversion_rate: Amount,
) {
    let topics = (symbol_short!("funded"), contributor.clone());
    let data = FundsReceived {
        contributor,
        base_amount,
        tokens,
        new_total_supply,
        conversion_rate,
    };
    env.events().publish(topics, data);
}

pub fn emit_finalized(
    env: &Env,
    total_raised: Amount,
    total_collected: Amount,
    total_supply: Amount,
) {
    let topics = (symbol_short!("finalized"),);
    let data = SaleFinalized {
        total_raised,
        total_collected,
        total_supply,
    };
    env.events().publish(topics, data);
}

pub fn emit_beneficiary_changed(env: &Env, old: Address, new: Address) {
    let topics = (symbol_short!("benef_set"),);
    env.events().publish(topics, BeneficiaryChanged { old, new });
}

pub fn emit_partner_tokens_claimed(env: &Env, total: Amount) {
    let topics = (symbol_short!("partners"),);
    env.events().publish(topics, PartnerTokensClaimed { total });
}

// ── Ownership ────────────────────────────────────────────────────────

pub fn emit_ownership_proposed(env: &Env, owner: Address, pending: Address) {
    env.events()
        .publish((symbol_short!("own_prop"), owner), pending);
}

pub fn emit_ownership_transferred(env: &Env, old: Address, new: Address) {
    let topics = (symbol_short!("own_xfer"),);
    env.events().publish(topics, OwnershipTransferred { old, new });
}

// ── Vesting safe ─────────────────────────────────────────────────────

pub fn emit_bundle_initialized(env: &Env, group: Group, release_timestamp: u64) {
    let topics = (symbol_short!("bundle"), group);
    let data = BundleInitialized {
        group,
        release_timestamp,
    };
    env.events().publish(topics, data);
}

pub fn emit_account_released(env: &Env, group: Group, beneficiary: Address, amount: Amount) {
    let topics = (symbol_short!("released"), group, beneficiary.clone());
    let data = AccountReleased {
        group,
        beneficiary,
        amount,
    };
    env.events().publish(topics, data);
}
