// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use money_savior::db;
use money_savior::models::{Category, CategoryKind, Transaction, TransactionKind, default_categories};
use money_savior::store::ledger::{CategoryPatch, TransactionPatch, KEY_CATEGORIES, KEY_TRANSACTIONS, UNCATEGORIZED};
use money_savior::store::{KvStore, Ledger};
use money_savior::utils::start_of_day;

fn kv() -> KvStore {
    KvStore::new(db::open_in_memory().unwrap())
}

fn tx(id: &str, amount: i64, kind: TransactionKind, category: &str, ymd: (i32, u32, u32)) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        kind,
        category: category.to_string(),
        date: start_of_day(NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap()),
        time: None,
        description: String::new(),
        created_at: Utc::now(),
    }
}

fn persisted_transactions(kv: &KvStore) -> Vec<Transaction> {
    serde_json::from_str(&kv.get(KEY_TRANSACTIONS).unwrap().unwrap()).unwrap()
}

fn persisted_categories(kv: &KvStore) -> Vec<Category> {
    serde_json::from_str(&kv.get(KEY_CATEGORIES).unwrap().unwrap()).unwrap()
}

#[test]
fn crud_sequence_keeps_memory_and_storage_equal() {
    let kv = kv();
    let mut ledger = Ledger::load(&kv);

    ledger.add_transaction(&kv, tx("t1", 50_000, TransactionKind::Expense, "food", (2024, 1, 5)));
    assert_eq!(persisted_transactions(&kv), ledger.transactions());

    ledger.add_transaction(&kv, tx("t2", 1_000_000, TransactionKind::Income, "salary", (2024, 1, 10)));
    assert_eq!(ledger.transactions().len(), 2);
    assert_eq!(persisted_transactions(&kv), ledger.transactions());

    ledger.update_transaction(
        &kv,
        "t1",
        TransactionPatch {
            amount: Some(60_000),
            description: Some("groceries".to_string()),
            ..Default::default()
        },
    );
    let t1 = &ledger.transactions()[0];
    assert_eq!(t1.amount, 60_000);
    assert_eq!(t1.description, "groceries");
    assert_eq!(t1.kind, TransactionKind::Expense);
    assert_eq!(persisted_transactions(&kv), ledger.transactions());

    ledger.delete_transaction(&kv, "t2");
    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(persisted_transactions(&kv), ledger.transactions());
}

#[test]
fn update_and_delete_unknown_ids_are_noops() {
    let kv = kv();
    let mut ledger = Ledger::load(&kv);
    ledger.add_transaction(&kv, tx("t1", 100, TransactionKind::Expense, "food", (2024, 2, 1)));

    ledger.update_transaction(
        &kv,
        "missing",
        TransactionPatch {
            amount: Some(999),
            ..Default::default()
        },
    );
    ledger.delete_transaction(&kv, "missing");

    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(ledger.transactions()[0].amount, 100);
}

#[test]
fn fresh_store_starts_with_default_categories() {
    let kv = kv();
    let ledger = Ledger::load(&kv);
    assert!(ledger.transactions().is_empty());
    assert_eq!(ledger.categories(), &default_categories()[..]);
    // The default set is persisted on first load.
    assert_eq!(persisted_categories(&kv), ledger.categories());
}

#[test]
fn corrupt_state_degrades_to_defaults() {
    let kv = kv();
    kv.set(KEY_TRANSACTIONS, "{not json").unwrap();
    kv.set(KEY_CATEGORIES, "[1, 2, 3]").unwrap();

    let ledger = Ledger::load(&kv);
    assert!(ledger.transactions().is_empty());
    assert_eq!(ledger.categories(), &default_categories()[..]);
}

#[test]
fn category_crud_persists() {
    let kv = kv();
    let mut ledger = Ledger::load(&kv);
    let before = ledger.categories().len();

    ledger.add_category(
        &kv,
        Category {
            id: "pets".to_string(),
            name: "Pets".to_string(),
            kind: CategoryKind::Expense,
            icon: "paw".to_string(),
            color: "#a16207".to_string(),
        },
    );
    assert_eq!(ledger.categories().len(), before + 1);
    assert_eq!(persisted_categories(&kv), ledger.categories());

    ledger.update_category(
        &kv,
        "pets",
        CategoryPatch {
            name: Some("Pet Care".to_string()),
            kind: Some(CategoryKind::Both),
            ..Default::default()
        },
    );
    let c = ledger.category("pets").unwrap();
    assert_eq!(c.name, "Pet Care");
    assert_eq!(c.kind, CategoryKind::Both);
    assert_eq!(c.icon, "paw");
    assert_eq!(persisted_categories(&kv), ledger.categories());

    ledger.delete_category(&kv, "pets");
    assert!(ledger.category("pets").is_none());
    assert_eq!(persisted_categories(&kv), ledger.categories());
}

#[test]
fn deleting_a_category_leaves_referencing_transactions() {
    let kv = kv();
    let mut ledger = Ledger::load(&kv);
    ledger.add_transaction(&kv, tx("t1", 500, TransactionKind::Expense, "food", (2024, 3, 1)));

    ledger.delete_category(&kv, "food");

    assert_eq!(ledger.transactions().len(), 1);
    assert_eq!(ledger.transactions()[0].category, "food");
    assert_eq!(ledger.category_name("food"), UNCATEGORIZED);
}
