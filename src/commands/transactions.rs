// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Transaction, TransactionKind};
use crate::store::ledger::TransactionPatch;
use crate::store::{KvStore, Ledger};
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_month, pretty_table, start_of_day};

pub fn handle(kv: &KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(kv, sub)?,
        Some(("edit", sub)) => edit(kv, sub)?,
        Some(("rm", sub)) => rm(kv, sub)?,
        Some(("list", sub)) => list(kv, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> TransactionKind {
    match s {
        "income" => TransactionKind::Income,
        _ => TransactionKind::Expense,
    }
}

fn add(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let mut ledger = Ledger::load(kv);

    let amount = *sub.get_one::<i64>("amount").unwrap();
    let kind = parse_kind(sub.get_one::<String>("type").unwrap());
    let category = sub.get_one::<String>("category").unwrap().to_string();
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let time = sub.get_one::<String>("time").map(|s| s.to_string());
    let description = sub.get_one::<String>("description").unwrap().to_string();

    // Dangling ids are allowed; only a category that resolves to the
    // wrong kind is rejected.
    if let Some(c) = ledger.category(&category) {
        if !c.kind.applies_to(kind) {
            bail!(
                "Category '{}' does not apply to {} transactions",
                c.name,
                kind.as_str()
            );
        }
    }

    let label = ledger.category_name(&category).to_string();
    ledger.add_transaction(
        kv,
        Transaction {
            id: Uuid::new_v4().to_string(),
            amount,
            kind,
            category,
            date: start_of_day(date),
            time,
            description,
            created_at: Utc::now(),
        },
    );
    println!(
        "Recorded {} {} on {} ({})",
        kind.as_str(),
        fmt_amount(amount),
        date,
        label
    );
    Ok(())
}

fn edit(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let mut ledger = Ledger::load(kv);
    let id = sub.get_one::<String>("id").unwrap();

    let date = match sub.get_one::<String>("date") {
        Some(s) => Some(start_of_day(parse_date(s)?)),
        None => None,
    };
    let patch = TransactionPatch {
        amount: sub.get_one::<i64>("amount").copied(),
        kind: sub.get_one::<String>("type").map(|s| parse_kind(s)),
        category: sub.get_one::<String>("category").cloned(),
        date,
        time: sub.get_one::<String>("time").cloned(),
        description: sub.get_one::<String>("description").cloned(),
    };
    ledger.update_transaction(kv, id, patch);
    println!("Updated transaction {}", id);
    Ok(())
}

fn rm(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let mut ledger = Ledger::load(kv);
    let id = sub.get_one::<String>("id").unwrap();
    ledger.delete_transaction(kv, id);
    println!("Removed transaction {}", id);
    Ok(())
}

fn list(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(kv);
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(&ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.time.clone().unwrap_or_default(),
                    r.kind.clone(),
                    r.category.clone(),
                    fmt_amount(r.amount),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Time", "Type", "Category", "Amount", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    /// Resolved display name, not the stored category id.
    pub category: String,
    pub amount: i64,
    pub description: String,
}

pub fn query_rows(ledger: &Ledger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let month = match sub.get_one::<String>("month") {
        Some(s) => Some(parse_month(s)?),
        None => None,
    };
    let kind = sub.get_one::<String>("type").map(|s| parse_kind(s));
    let category = sub.get_one::<String>("category");

    let mut matched: Vec<&Transaction> = ledger
        .transactions()
        .iter()
        .filter(|t| match &month {
            Some(m) => t.date.format("%Y-%m").to_string() == *m,
            None => true,
        })
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .filter(|t| category.is_none_or(|c| t.category == *c))
        .collect();
    matched.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matched.truncate(*limit);
    }

    Ok(matched
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id.clone(),
            date: t.date.format("%Y-%m-%d").to_string(),
            time: t.time.clone(),
            kind: t.kind.as_str().to_string(),
            category: ledger.category_name(&t.category).to_string(),
            amount: t.amount,
            description: t.description.clone(),
        })
        .collect())
}
