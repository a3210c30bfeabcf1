// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use money_savior::db;
use money_savior::models::{Transaction, TransactionKind, default_categories};
use money_savior::store::error::StoreError;
use money_savior::store::{KvStore, Ledger, Profiles};
use money_savior::utils::start_of_day;

fn kv() -> KvStore {
    KvStore::new(db::open_in_memory().unwrap())
}

fn sample_tx(id: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: 50_000,
        kind: TransactionKind::Expense,
        category: "food".to_string(),
        date: start_of_day(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
        time: None,
        description: "lunch".to_string(),
        created_at: Utc::now(),
    }
}

#[test]
fn first_load_synthesizes_default_profile() {
    let kv = kv();
    let profiles = Profiles::load(&kv);
    assert_eq!(profiles.list().len(), 1);
    assert_eq!(profiles.current().id, "default");
    assert_eq!(profiles.current().name, "Default Profile");
    // The synthesized list is persisted so the next load sees the same state.
    assert_eq!(kv.get("currentProfileId").unwrap().unwrap(), "default");
}

#[test]
fn create_profile_starts_empty_and_switching_back_restores() {
    let kv = kv();
    let mut profiles = Profiles::load(&kv);
    let mut ledger = Ledger::load(&kv);

    ledger.add_transaction(&kv, sample_tx("t1"));

    let trip = profiles.create_profile(&kv, &mut ledger, "Trip");
    assert_eq!(profiles.current().id, trip.id);
    assert_eq!(profiles.list().len(), 2);
    assert!(ledger.transactions().is_empty());
    assert_eq!(ledger.categories(), &default_categories()[..]);

    profiles.switch_profile(&kv, &mut ledger, "default");
    assert_eq!(profiles.current().id, "default");
    assert_eq!(ledger.transactions().len(), 1);
    let restored = &ledger.transactions()[0];
    assert_eq!(restored.id, "t1");
    assert_eq!(restored.amount, 50_000);
    assert_eq!(restored.category, "food");
    assert_eq!(restored.date, start_of_day(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()));
}

#[test]
fn switch_round_trip_restores_both_sides() {
    let kv = kv();
    let mut profiles = Profiles::load(&kv);
    let mut ledger = Ledger::load(&kv);

    ledger.add_transaction(&kv, sample_tx("a1"));
    let b = profiles.create_profile(&kv, &mut ledger, "B");
    ledger.add_transaction(&kv, sample_tx("b1"));
    ledger.add_transaction(&kv, sample_tx("b2"));

    profiles.switch_profile(&kv, &mut ledger, "default");
    let ids: Vec<&str> = ledger.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["a1"]);

    profiles.switch_profile(&kv, &mut ledger, &b.id);
    let ids: Vec<&str> = ledger.transactions().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["b1", "b2"]);
}

#[test]
fn switch_to_current_or_unknown_is_a_noop() {
    let kv = kv();
    let mut profiles = Profiles::load(&kv);
    let mut ledger = Ledger::load(&kv);
    ledger.add_transaction(&kv, sample_tx("t1"));

    profiles.switch_profile(&kv, &mut ledger, "default");
    assert_eq!(ledger.transactions().len(), 1);

    profiles.switch_profile(&kv, &mut ledger, "no-such-profile");
    assert_eq!(profiles.current().id, "default");
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn deleting_the_last_profile_is_rejected() {
    let kv = kv();
    let mut profiles = Profiles::load(&kv);
    let mut ledger = Ledger::load(&kv);

    let err = profiles.delete_profile(&kv, &mut ledger, "default").unwrap_err();
    assert!(matches!(err, StoreError::LastProfile));
    assert_eq!(profiles.list().len(), 1);
}

#[test]
fn deleting_an_unknown_profile_is_rejected() {
    let kv = kv();
    let mut profiles = Profiles::load(&kv);
    let mut ledger = Ledger::load(&kv);

    let err = profiles
        .delete_profile(&kv, &mut ledger, "no-such-profile")
        .unwrap_err();
    assert!(matches!(err, StoreError::ProfileNotFound(_)));
}

#[test]
fn deleting_the_current_profile_switches_away_first() {
    let kv = kv();
    let mut profiles = Profiles::load(&kv);
    let mut ledger = Ledger::load(&kv);

    ledger.add_transaction(&kv, sample_tx("t1"));
    let trip = profiles.create_profile(&kv, &mut ledger, "Trip");

    profiles.delete_profile(&kv, &mut ledger, &trip.id).unwrap();

    assert_eq!(profiles.list().len(), 1);
    assert_eq!(profiles.current().id, "default");
    // The deleted profile's data comes out of durable storage too.
    assert!(kv.get(&format!("profile_{}", trip.id)).unwrap().is_none());
    // And the ledger now holds the surviving profile's data.
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn profile_list_survives_reload() {
    let kv = kv();
    {
        let mut profiles = Profiles::load(&kv);
        let mut ledger = Ledger::load(&kv);
        profiles.create_profile(&kv, &mut ledger, "Trip");
    }
    let profiles = Profiles::load(&kv);
    assert_eq!(profiles.list().len(), 2);
    assert_eq!(profiles.current().name, "Trip");
}
