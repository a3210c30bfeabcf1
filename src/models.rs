// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
    Both,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
            CategoryKind::Both => "both",
        }
    }

    pub fn applies_to(&self, kind: TransactionKind) -> bool {
        match self {
            CategoryKind::Both => true,
            CategoryKind::Expense => kind == TransactionKind::Expense,
            CategoryKind::Income => kind == TransactionKind::Income,
        }
    }
}

/// Amounts are whole units of the smallest currency denomination and are
/// always non-negative; the transaction kind carries the direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Category id. May reference a category that no longer exists;
    /// consumers resolve that to an "(uncategorized)" display.
    pub category: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub description: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    /// Symbolic icon name; unknown names fall back to a default at display time.
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(name: &str) -> Self {
        Profile {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    /// The profile synthesized on first launch, before any profile list exists.
    pub fn default_profile() -> Self {
        Profile {
            id: "default".to_string(),
            name: "Default Profile".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// The unit of per-profile durable storage and of export/import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profile: Profile,
    pub transactions: Vec<Transaction>,
    pub categories: Vec<Category>,
}

fn cat(id: &str, name: &str, kind: CategoryKind, icon: &str, color: &str) -> Category {
    Category {
        id: id.into(),
        name: name.into(),
        kind,
        icon: icon.into(),
        color: color.into(),
    }
}

/// Category set every fresh profile starts with.
pub fn default_categories() -> Vec<Category> {
    vec![
        cat("food", "Food & Drink", CategoryKind::Expense, "utensils", "#ef4444"),
        cat("transport", "Transport", CategoryKind::Expense, "bus", "#f97316"),
        cat("shopping", "Shopping", CategoryKind::Expense, "shopping-bag", "#8b5cf6"),
        cat("entertainment", "Entertainment", CategoryKind::Expense, "coffee", "#ec4899"),
        cat("utilities", "Utilities", CategoryKind::Expense, "lightbulb", "#14b8a6"),
        cat("health", "Health", CategoryKind::Expense, "pill", "#22c55e"),
        cat("salary", "Salary", CategoryKind::Income, "banknote", "#10b981"),
        cat("bonus", "Bonus", CategoryKind::Income, "gift", "#6366f1"),
        cat("investment", "Investment", CategoryKind::Income, "landmark", "#0ea5e9"),
    ]
}
