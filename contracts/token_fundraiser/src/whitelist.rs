//! # Contribution gates
//!
//! Two predicates consulted before a contribution is accepted:
//!
//! - the whitelist, maintained in batches by the owner;
//! - the gas price bid declared by the contributing client, bounded by
//!   `SaleConfig::max_gas_price`.
//!
//! | Event topic prefix | Trigger                     |
//! |--------------------|-----------------------------|
//! | `wl_add`           | Address added to whitelist  |
//! | `wl_del`           | Address removed             |

use soroban_sdk::{contracttype, symbol_short, Address, Env, Vec};

use crate::ownership::OwnerCap;
use crate::types::SaleConfig;
use crate::Error;

const DAY_IN_LEDGERS: u32 = 17_280;
const MEMBER_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const MEMBER_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WhitelistKey {
    Member(Address),
}

pub fn whitelist_addresses(env: &Env, cap: &OwnerCap, addresses: &Vec<Address>) {
    for address in addresses.iter() {
        let key = WhitelistKey::Member(address.clone());
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, MEMBER_LIFETIME_THRESHOLD, MEMBER_BUMP_AMOUNT);
        env.events()
            .publish((symbol_short!("wl_add"), address), cap.owner().clone());
    }
}

/// Remove `addresses`. Addresses that were never listed are skipped silently.
pub fn blacklist_addresses(env: &Env, cap: &OwnerCap, addresses: &Vec<Address>) {
    for address in addresses.iter() {
        let key = WhitelistKey::Member(address.clone());
        if env.storage().persistent().has(&key) {
            env.storage().persistent().remove(&key);
            env.events()
                .publish((symbol_short!("wl_del"), address), cap.owner().clone());
        }
    }
}

pub fn is_whitelisted(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&WhitelistKey::Member(address.clone()))
        .unwrap_or(false)
}

pub fn require_whitelisted(env: &Env, address: &Address) -> Result<(), Error> {
    if !is_whitelisted(env, address) {
        return Err(Error::NotWhitelisted);
    }
    Ok(())
}

pub fn is_acceptable_gas_price(config: &SaleConfig, gas_price: u64) -> bool {
    gas_price <= config.max_gas_price
}

pub fn require_acceptable_gas_price(config: &SaleConfig, gas_price: u64) -> Result<(), Error> {
    if !is_acceptable_gas_price(config, gas_price) {
        return Err(Error::GasPriceTooHigh);
    }
    Ok(())
}
