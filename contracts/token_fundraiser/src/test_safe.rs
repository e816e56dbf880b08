#![cfg(test)]

extern crate std;

use soroban_sdk::{testutils::Address as _, Address};

use crate::invariants::{assert_all_invariants, assert_bundle_consistent};
use crate::test_helpers::{
    setup, Fixture, ADVISORS_LOCK, ADVISOR_AMOUNTS, CORE_TEAM_AMOUNTS, CORE_TEAM_LOCK, GENESIS,
};
use crate::{ledger, safe, Bundle, Error, Group};

fn finalized() -> Fixture {
    let mut f = setup();
    f.fill_hard_cap();
    f.finalize();
    f
}

// ── Bundle bookkeeping ───────────────────────────────────

#[test]
fn test_init_bundle_sets_release_date() {
    let f = setup();
    f.env.as_contract(&f.client.address, || {
        safe::init_bundle(&f.env, Group::CoreTeam, GENESIS + 10).unwrap();
    });

    assert_eq!(
        f.client.bundle(&Group::CoreTeam),
        Bundle {
            locked: 0,
            release_timestamp: GENESIS + 10,
        }
    );
    assert_eq!(f.client.bundle(&Group::Advisors), Bundle::default());
}

#[test]
fn test_init_bundle_twice_fails() {
    let f = setup();
    f.env.as_contract(&f.client.address, || {
        safe::init_bundle(&f.env, Group::Advisors, GENESIS).unwrap();
        assert_eq!(
            safe::init_bundle(&f.env, Group::Advisors, GENESIS + 1),
            Err(Error::BundleAlreadyInitialized)
        );
    });
    assert_eq!(f.client.bundle(&Group::Advisors).release_timestamp, GENESIS);
}

#[test]
fn test_init_bundle_with_locked_entries_fails() {
    let f = setup();
    let account = Address::generate(&f.env);
    f.env.as_contract(&f.client.address, || {
        safe::add_locked_account(&f.env, Group::Advisors, &account, 10).unwrap();
        assert_eq!(
            safe::init_bundle(&f.env, Group::Advisors, GENESIS),
            Err(Error::BundleAlreadyInitialized)
        );
    });
}

#[test]
fn test_add_locked_account_accumulates() {
    let f = setup();
    let a = Address::generate(&f.env);
    let b = Address::generate(&f.env);
    f.env.as_contract(&f.client.address, || {
        safe::init_bundle(&f.env, Group::CoreTeam, GENESIS).unwrap();
        safe::add_locked_account(&f.env, Group::CoreTeam, &a, 100).unwrap();
        safe::add_locked_account(&f.env, Group::CoreTeam, &a, 50).unwrap();
        safe::add_locked_account(&f.env, Group::CoreTeam, &b, 25).unwrap();
    });

    assert_eq!(f.client.locked_balance(&Group::CoreTeam, &a), 150);
    assert_eq!(f.client.locked_balance(&Group::CoreTeam, &b), 25);
    assert_eq!(f.client.bundle(&Group::CoreTeam).locked, 175);
    assert_eq!(f.client.locked_balance(&Group::Advisors, &a), 0);
}

// ── Release ──────────────────────────────────────────────

#[test]
fn test_release_pays_out_and_deducts() {
    let f = setup();
    let a = Address::generate(&f.env);
    let b = Address::generate(&f.env);
    f.env.as_contract(&f.client.address, || {
        ledger::mint(&f.env, &safe::holding_address(&f.env), 300).unwrap();
        safe::init_bundle(&f.env, Group::Advisors, GENESIS).unwrap();
        safe::add_locked_account(&f.env, Group::Advisors, &a, 200).unwrap();
        safe::add_locked_account(&f.env, Group::Advisors, &b, 100).unwrap();

        assert_eq!(
            safe::release_account(&f.env, Group::Advisors, &a, GENESIS),
            Ok(200)
        );
    });

    assert_eq!(f.client.balance(&a), 200);
    assert_eq!(f.client.balance(&f.client.safe_address()), 100);
    assert_eq!(f.client.locked_balance(&Group::Advisors, &a), 0);
    assert_eq!(f.client.locked_balance(&Group::Advisors, &b), 100);
    assert_eq!(f.client.bundle(&Group::Advisors).locked, 100);
}

#[test]
fn test_release_before_date_fails() {
    let f = setup();
    let a = Address::generate(&f.env);
    f.env.as_contract(&f.client.address, || {
        ledger::mint(&f.env, &safe::holding_address(&f.env), 100).unwrap();
        safe::init_bundle(&f.env, Group::CoreTeam, GENESIS + 100).unwrap();
        safe::add_locked_account(&f.env, Group::CoreTeam, &a, 100).unwrap();

        assert_eq!(
            safe::release_account(&f.env, Group::CoreTeam, &a, GENESIS + 99),
            Err(Error::NotYetReleasable)
        );
        assert_eq!(
            safe::release_account(&f.env, Group::CoreTeam, &a, GENESIS + 100),
            Ok(100)
        );
    });
}

#[test]
fn test_release_unknown_account_fails() {
    let f = setup();
    let stranger = Address::generate(&f.env);
    f.env.as_contract(&f.client.address, || {
        safe::init_bundle(&f.env, Group::CoreTeam, GENESIS).unwrap();
        assert_eq!(
            safe::release_account(&f.env, Group::CoreTeam, &stranger, GENESIS),
            Err(Error::NoLockedBalance)
        );
    });
}

#[test]
fn test_release_underfunded_safe_fails() {
    let f = setup();
    let a = Address::generate(&f.env);
    f.env.as_contract(&f.client.address, || {
        ledger::mint(&f.env, &safe::holding_address(&f.env), 99).unwrap();
        safe::init_bundle(&f.env, Group::Advisors, GENESIS).unwrap();
        safe::add_locked_account(&f.env, Group::Advisors, &a, 100).unwrap();

        assert_eq!(
            safe::release_account(&f.env, Group::Advisors, &a, GENESIS),
            Err(Error::InsufficientSafeFunding)
        );
    });

    assert_eq!(f.client.locked_balance(&Group::Advisors, &a), 100);
    assert_eq!(f.client.bundle(&Group::Advisors).locked, 100);
    assert_eq!(f.client.balance(&a), 0);
}

// ── Through the contract ─────────────────────────────────

#[test]
fn test_release_before_finalize_fails() {
    let f = setup();
    assert_eq!(
        f.client.try_release_core_team_account(&f.core_team[0]),
        Err(Ok(Error::NoLockedBalance))
    );
}

#[test]
fn test_advisors_locked_until_release_date() {
    let f = finalized();
    f.advance_to(GENESIS + ADVISORS_LOCK - 1);

    assert_eq!(
        f.client.try_release_advisors_account(&f.advisors[0]),
        Err(Ok(Error::NotYetReleasable))
    );
}

#[test]
fn test_advisors_release_after_date() {
    let f = finalized();
    let safe_before = f.client.balance(&f.client.safe_address());
    f.advance_to(GENESIS + ADVISORS_LOCK);

    for (account, amount) in f.group_members(Group::Advisors) {
        assert_eq!(f.client.release_advisors_account(&account), amount);
        assert_eq!(f.client.balance(&account), amount);
        assert_eq!(f.client.locked_balance(&Group::Advisors, &account), 0);
        assert_bundle_consistent(&f, Group::Advisors);
    }

    assert_eq!(f.client.bundle(&Group::Advisors).locked, 0);
    assert_eq!(
        f.client.balance(&f.client.safe_address()),
        safe_before - ADVISOR_AMOUNTS.iter().sum::<u128>()
    );
    assert_all_invariants(&f);
}

#[test]
fn test_core_team_locked_after_advisors_release() {
    let f = finalized();
    f.advance_to(GENESIS + ADVISORS_LOCK);

    assert_eq!(
        f.client.try_release_core_team_account(&f.core_team[0]),
        Err(Ok(Error::NotYetReleasable))
    );

    f.advance_to(GENESIS + CORE_TEAM_LOCK - 1);
    assert_eq!(
        f.client.try_release_core_team_account(&f.core_team[0]),
        Err(Ok(Error::NotYetReleasable))
    );
}

#[test]
fn test_core_team_release_after_date() {
    let f = finalized();
    f.advance_to(GENESIS + CORE_TEAM_LOCK);

    for (account, amount) in f.group_members(Group::CoreTeam) {
        assert_eq!(f.client.release_core_team_account(&account), amount);
        assert_eq!(f.client.balance(&account), amount);
    }
    assert_eq!(f.client.bundle(&Group::CoreTeam).locked, 0);
    assert_eq!(
        f.client.balance(&f.client.safe_address()),
        ADVISOR_AMOUNTS.iter().sum::<u128>()
    );
    assert_eq!(CORE_TEAM_AMOUNTS.len(), f.core_team.len());
    assert_all_invariants(&f);
}

#[test]
fn test_release_twice_fails() {
    let f = finalized();
    f.advance_to(GENESIS + CORE_TEAM_LOCK);
    let member = f.core_team[1].clone();

    f.client.release_core_team_account(&member);
    assert_eq!(
        f.client.try_release_core_team_account(&member),
        Err(Ok(Error::NoLockedBalance))
    );
}

#[test]
fn test_release_from_wrong_group_fails() {
    let f = finalized();
    f.advance_to(GENESIS + CORE_TEAM_LOCK);

    assert_eq!(
        f.client.try_release_advisors_account(&f.core_team[0]),
        Err(Ok(Error::NoLockedBalance))
    );
    assert_eq!(
        f.client.release_account(&f.advisors[0], &Group::Advisors),
        ADVISOR_AMOUNTS[0]
    );
}

#[test]
fn test_released_tokens_are_transferable() {
    let f = finalized();
    f.advance_to(GENESIS + ADVISORS_LOCK);
    let member = f.advisors[0].clone();
    let other = Address::generate(&f.env);

    f.client.release_advisors_account(&member);
    assert!(f.client.transfer(&member, &other, &ADVISOR_AMOUNTS[0]));
    assert_eq!(f.client.balance(&other), ADVISOR_AMOUNTS[0]);
}
