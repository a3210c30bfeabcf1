// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};

use crate::models::{Category, CategoryKind, Transaction, TransactionKind, default_categories};
use crate::store::kv::{KvStore, read_json, write_json};

pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_CATEGORIES: &str = "categories";

/// Display name used when a transaction references a deleted category.
pub const UNCATEGORIZED: &str = "(uncategorized)";

/// Authoritative in-memory copy of the active profile's transactions and
/// categories. Every mutation overwrites the affected collection in the
/// durable layer; a failed write keeps the in-memory state and is only logged.
pub struct Ledger {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

#[derive(Debug, Default, Clone)]
pub struct TransactionPatch {
    pub amount: Option<i64>,
    pub kind: Option<TransactionKind>,
    pub category: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub time: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub kind: Option<CategoryKind>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl Ledger {
    /// Load the active ledger. Absent or corrupt persisted state degrades to
    /// the default state rather than failing.
    pub fn load(kv: &KvStore) -> Ledger {
        let transactions = match read_json::<Vec<Transaction>>(kv, KEY_TRANSACTIONS) {
            Some(list) => list,
            None => Vec::new(),
        };
        let categories = match read_json::<Vec<Category>>(kv, KEY_CATEGORIES) {
            Some(list) => list,
            None => {
                let defaults = default_categories();
                write_json(kv, KEY_CATEGORIES, &defaults);
                defaults
            }
        };
        Ledger {
            transactions,
            categories,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Display-time resolution of a category reference; dangling ids are legal.
    pub fn category_name(&self, id: &str) -> &str {
        self.category(id).map_or(UNCATEGORIZED, |c| c.name.as_str())
    }

    pub fn add_transaction(&mut self, kv: &KvStore, t: Transaction) {
        self.transactions.push(t);
        self.persist_transactions(kv);
    }

    /// Merge `patch` into the matching transaction; unknown ids are a no-op.
    pub fn update_transaction(&mut self, kv: &KvStore, id: &str, patch: TransactionPatch) {
        if let Some(t) = self.transactions.iter_mut().find(|t| t.id == id) {
            if let Some(amount) = patch.amount {
                t.amount = amount;
            }
            if let Some(kind) = patch.kind {
                t.kind = kind;
            }
            if let Some(category) = patch.category {
                t.category = category;
            }
            if let Some(date) = patch.date {
                t.date = date;
            }
            if let Some(time) = patch.time {
                t.time = Some(time);
            }
            if let Some(description) = patch.description {
                t.description = description;
            }
            self.persist_transactions(kv);
        }
    }

    pub fn delete_transaction(&mut self, kv: &KvStore, id: &str) {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() != before {
            self.persist_transactions(kv);
        }
    }

    pub fn add_category(&mut self, kv: &KvStore, c: Category) {
        self.categories.push(c);
        self.persist_categories(kv);
    }

    pub fn update_category(&mut self, kv: &KvStore, id: &str, patch: CategoryPatch) {
        if let Some(c) = self.categories.iter_mut().find(|c| c.id == id) {
            if let Some(name) = patch.name {
                c.name = name;
            }
            if let Some(kind) = patch.kind {
                c.kind = kind;
            }
            if let Some(icon) = patch.icon {
                c.icon = icon;
            }
            if let Some(color) = patch.color {
                c.color = color;
            }
            self.persist_categories(kv);
        }
    }

    /// Transactions referencing the removed category keep their reference.
    pub fn delete_category(&mut self, kv: &KvStore, id: &str) {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() != before {
            self.persist_categories(kv);
        }
    }

    /// Swap in another profile's data wholesale, then persist both collections.
    pub fn replace(
        &mut self,
        kv: &KvStore,
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
    ) {
        self.transactions = transactions;
        self.categories = categories;
        self.persist_all(kv);
    }

    pub fn persist_all(&self, kv: &KvStore) {
        self.persist_transactions(kv);
        self.persist_categories(kv);
    }

    fn persist_transactions(&self, kv: &KvStore) {
        write_json(kv, KEY_TRANSACTIONS, &self.transactions);
    }

    fn persist_categories(&self, kv: &KvStore) {
        write_json(kv, KEY_CATEGORIES, &self.categories);
    }
}
