// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Category, Transaction, TransactionKind};
use crate::store::ledger::UNCATEGORIZED;
use crate::store::{KvStore, Ledger};
use crate::utils::{fmt_amount, maybe_print_json, month_end, month_start, parse_date, pretty_table, this_month};

pub fn handle(kv: &KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary_cmd(kv, sub)?,
        Some(("by-category", sub)) => by_category_cmd(kv, sub)?,
        Some(("monthly", sub)) => monthly_cmd(kv, sub)?,
        Some(("export", sub)) => crate::commands::exporter::export_report(kv, sub)?,
        _ => {}
    }
    Ok(())
}

/// Resolve `--from`/`--to`, defaulting to the current calendar month.
pub fn range_args(sub: &clap::ArgMatches) -> Result<(NaiveDate, NaiveDate)> {
    let from = match sub.get_one::<String>("from") {
        Some(s) => parse_date(s)?,
        None => month_start(&this_month())?,
    };
    let to = match sub.get_one::<String>("to") {
        Some(s) => parse_date(s)?,
        None => month_end(&this_month())?,
    };
    Ok((from, to))
}

fn in_range(t: &Transaction, from: NaiveDate, to: NaiveDate) -> bool {
    let d = t.date.date_naive();
    d >= from && d <= to
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub income: i64,
    pub expense: i64,
    pub balance: i64,
}

pub fn summary(transactions: &[Transaction], from: NaiveDate, to: NaiveDate) -> Summary {
    let mut income = 0;
    let mut expense = 0;
    for t in transactions.iter().filter(|t| in_range(t, from, to)) {
        match t.kind {
            TransactionKind::Income => income += t.amount,
            TransactionKind::Expense => expense += t.amount,
        }
    }
    Summary {
        income,
        expense,
        balance: income - expense,
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: i64,
    pub percent: f64,
}

/// Expense totals per category, largest first. Transactions whose category id
/// no longer resolves are bucketed together under the uncategorized label.
pub fn expenses_by_category(
    transactions: &[Transaction],
    categories: &[Category],
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<CategoryShare> {
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for t in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && in_range(t, from, to))
    {
        let name = categories
            .iter()
            .find(|c| c.id == t.category)
            .map_or(UNCATEGORIZED, |c| c.name.as_str());
        *totals.entry(name.to_string()).or_insert(0) += t.amount;
    }
    let total_expense: i64 = totals.values().sum();

    let mut shares: Vec<CategoryShare> = totals
        .into_iter()
        .map(|(category, total)| CategoryShare {
            category,
            total,
            percent: if total_expense == 0 {
                0.0
            } else {
                total as f64 * 100.0 / total_expense as f64
            },
        })
        .collect();
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub month: String,
    pub income: i64,
    pub expense: i64,
}

/// Per-month income/expense pairs over the whole ledger, newest month first.
pub fn monthly_totals(transactions: &[Transaction], months: usize) -> Vec<MonthTotals> {
    let mut map: BTreeMap<String, (i64, i64)> = BTreeMap::new();
    for t in transactions {
        let entry = map
            .entry(t.date.format("%Y-%m").to_string())
            .or_insert((0, 0));
        match t.kind {
            TransactionKind::Income => entry.0 += t.amount,
            TransactionKind::Expense => entry.1 += t.amount,
        }
    }
    map.into_iter()
        .rev()
        .take(months)
        .map(|(month, (income, expense))| MonthTotals {
            month,
            income,
            expense,
        })
        .collect()
}

fn summary_cmd(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(kv);
    let (from, to) = range_args(sub)?;
    let s = summary(ledger.transactions(), from, to);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_amount(s.income)],
            vec!["Expense".to_string(), fmt_amount(s.expense)],
            vec!["Balance".to_string(), fmt_amount(s.balance)],
        ];
        println!("{}", pretty_table(&["Total", "Amount"], rows));
    }
    Ok(())
}

fn by_category_cmd(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(kv);
    let (from, to) = range_args(sub)?;
    let shares = expenses_by_category(ledger.transactions(), ledger.categories(), from, to);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shares)? {
        let rows: Vec<Vec<String>> = shares
            .iter()
            .map(|s| {
                vec![
                    s.category.clone(),
                    fmt_amount(s.total),
                    format!("{:.2}%", s.percent),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn monthly_cmd(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(kv);
    let months: usize = *sub.get_one::<usize>("months").unwrap();
    let data = monthly_totals(ledger.transactions(), months);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|m| {
                vec![
                    m.month.clone(),
                    fmt_amount(m.income),
                    fmt_amount(m.expense),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Income", "Expense"], rows));
    }
    Ok(())
}
