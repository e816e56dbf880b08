#![cfg(test)]

extern crate std;

use soroban_sdk::{testutils::Address as _, vec, Address};

use crate::test_helpers::{setup, GAS_PRICE};
use crate::Error;

// ─── Ownership handover ──────────────────────────────────

#[test]
fn test_owner_is_set_at_init() {
    let f = setup();
    assert_eq!(f.client.owner(), f.owner);
    assert_eq!(f.client.pending_owner(), None);
}

#[test]
fn test_two_step_handover() {
    let f = setup();
    let new_owner = Address::generate(&f.env);

    f.client.transfer_ownership(&f.owner, &new_owner);
    assert_eq!(f.client.owner(), f.owner);
    assert_eq!(f.client.pending_owner(), Some(new_owner.clone()));

    f.client.accept_ownership(&new_owner);
    assert_eq!(f.client.owner(), new_owner);
    assert_eq!(f.client.pending_owner(), None);
}

#[test]
fn test_old_owner_loses_rights_after_handover() {
    let f = setup();
    let new_owner = Address::generate(&f.env);
    f.client.transfer_ownership(&f.owner, &new_owner);
    f.client.accept_ownership(&new_owner);

    assert_eq!(
        f.client.try_set_beneficiary(&f.owner, &new_owner),
        Err(Ok(Error::NotOwner))
    );
    f.client.set_beneficiary(&new_owner, &new_owner);
    assert_eq!(f.client.config().beneficiary, new_owner);
}

#[test]
fn test_transfer_ownership_requires_owner() {
    let f = setup();
    let stranger = Address::generate(&f.env);
    assert_eq!(
        f.client.try_transfer_ownership(&stranger, &stranger),
        Err(Ok(Error::NotOwner))
    );
    assert_eq!(f.client.pending_owner(), None);
}

#[test]
fn test_accept_requires_pending_owner() {
    let f = setup();
    let new_owner = Address::generate(&f.env);
    let stranger = Address::generate(&f.env);

    assert_eq!(
        f.client.try_accept_ownership(&new_owner),
        Err(Ok(Error::NotPendingOwner))
    );

    f.client.transfer_ownership(&f.owner, &new_owner);
    assert_eq!(
        f.client.try_accept_ownership(&stranger),
        Err(Ok(Error::NotPendingOwner))
    );
    assert_eq!(f.client.owner(), f.owner);
}

#[test]
fn test_later_proposal_replaces_earlier_one() {
    let f = setup();
    let first = Address::generate(&f.env);
    let second = Address::generate(&f.env);

    f.client.transfer_ownership(&f.owner, &first);
    f.client.transfer_ownership(&f.owner, &second);

    assert_eq!(
        f.client.try_accept_ownership(&first),
        Err(Ok(Error::NotPendingOwner))
    );
    f.client.accept_ownership(&second);
    assert_eq!(f.client.owner(), second);
}

// ─── Whitelist ───────────────────────────────────────────

#[test]
fn test_whitelist_batch() {
    let f = setup();
    let a = Address::generate(&f.env);
    let b = Address::generate(&f.env);
    let c = Address::generate(&f.env);

    f.client
        .whitelist_addresses(&f.owner, &vec![&f.env, a.clone(), b.clone()]);

    assert!(f.client.is_whitelisted(&a));
    assert!(f.client.is_whitelisted(&b));
    assert!(!f.client.is_whitelisted(&c));
}

#[test]
fn test_whitelist_is_idempotent() {
    let f = setup();
    let a = Address::generate(&f.env);

    f.client
        .whitelist_addresses(&f.owner, &vec![&f.env, a.clone(), a.clone()]);
    f.client
        .whitelist_addresses(&f.owner, &vec![&f.env, a.clone()]);
    assert!(f.client.is_whitelisted(&a));
}

#[test]
fn test_blacklist_batch() {
    let f = setup();
    let a = Address::generate(&f.env);
    let b = Address::generate(&f.env);
    let never_listed = Address::generate(&f.env);
    f.client
        .whitelist_addresses(&f.owner, &vec![&f.env, a.clone(), b.clone()]);

    f.client.blacklist_addresses(
        &f.owner,
        &vec![&f.env, a.clone(), never_listed.clone()],
    );

    assert!(!f.client.is_whitelisted(&a));
    assert!(f.client.is_whitelisted(&b));
    assert!(!f.client.is_whitelisted(&never_listed));
}

#[test]
fn test_whitelist_requires_owner() {
    let f = setup();
    let stranger = Address::generate(&f.env);

    assert_eq!(
        f.client
            .try_whitelist_addresses(&stranger, &vec![&f.env, stranger.clone()]),
        Err(Ok(Error::NotOwner))
    );
    assert!(!f.client.is_whitelisted(&stranger));

    assert_eq!(
        f.client
            .try_blacklist_addresses(&stranger, &vec![&f.env, f.owner.clone()]),
        Err(Ok(Error::NotOwner))
    );
}

#[test]
fn test_rewhitelisted_contributor_can_contribute_again() {
    let mut f = setup();
    let who = f.contributor();
    let batch = vec![&f.env, who.clone()];

    f.client.blacklist_addresses(&f.owner, &batch);
    assert_eq!(
        f.client.try_contribute(&who, &1, &GAS_PRICE),
        Err(Ok(Error::NotWhitelisted))
    );

    f.client.whitelist_addresses(&f.owner, &batch);
    assert_eq!(f.contribute(&who, 1), 3_000);
}
