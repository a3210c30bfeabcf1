// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::commands::reports;
use crate::models::TransactionKind;
use crate::store::{KvStore, Ledger};
use crate::utils::fmt_amount;

pub fn export_report(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(kv);
    let (from, to) = reports::range_args(sub)?;
    let dir = sub.get_one::<String>("dir").unwrap();
    let (summary_path, detail_path) = write_report_csvs(&ledger, from, to, Path::new(dir))?;
    println!(
        "Exported report to {} and {}",
        summary_path.display(),
        detail_path.display()
    );
    Ok(())
}

/// The two sheets of the report workbook as CSV files: totals plus a
/// per-category breakdown, and the transaction detail over the range.
pub fn write_report_csvs(
    ledger: &Ledger,
    from: NaiveDate,
    to: NaiveDate,
    dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let stem = format!("money-savior-report-{}-to-{}", from, to);
    let summary_path = dir.join(format!("{stem}-summary.csv"));
    let detail_path = dir.join(format!("{stem}-transactions.csv"));

    let s = reports::summary(ledger.transactions(), from, to);
    let shares = reports::expenses_by_category(ledger.transactions(), ledger.categories(), from, to);

    let mut wtr = csv::Writer::from_path(&summary_path)
        .with_context(|| format!("Create {}", summary_path.display()))?;
    let range_line = format!("From {} to {}", from, to);
    wtr.write_record(["EXPENSE REPORT", "", ""])?;
    wtr.write_record([range_line.as_str(), "", ""])?;
    wtr.write_record(["Total Expenses", fmt_amount(s.expense).as_str(), ""])?;
    wtr.write_record(["Total Income", fmt_amount(s.income).as_str(), ""])?;
    wtr.write_record(["Balance", fmt_amount(s.balance).as_str(), ""])?;
    wtr.write_record(["Expenses by Category", "", ""])?;
    for share in &shares {
        let total = fmt_amount(share.total);
        let pct = format!("{:.2}%", share.percent);
        wtr.write_record([share.category.as_str(), total.as_str(), pct.as_str()])?;
    }
    wtr.flush()?;

    let mut wtr = csv::Writer::from_path(&detail_path)
        .with_context(|| format!("Create {}", detail_path.display()))?;
    wtr.write_record(["Date", "Type", "Category", "Description", "Amount"])?;
    for t in ledger.transactions().iter().filter(|t| {
        let d = t.date.date_naive();
        d >= from && d <= to
    }) {
        let kind = match t.kind {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        };
        let date = t.date.format("%Y-%m-%d").to_string();
        let amount = fmt_amount(t.amount);
        wtr.write_record([
            date.as_str(),
            kind,
            ledger.category_name(&t.category),
            t.description.as_str(),
            amount.as_str(),
        ])?;
    }
    wtr.flush()?;

    Ok((summary_path, detail_path))
}
