// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Utc};
use money_savior::models::{Transaction, TransactionKind};
use money_savior::store::{KvStore, Ledger};
use money_savior::utils::start_of_day;
use money_savior::{cli, commands::reports, db};
use tempfile::tempdir;

fn seeded_kv() -> KvStore {
    let kv = KvStore::new(db::open_in_memory().unwrap());
    let mut ledger = Ledger::load(&kv);
    ledger.add_transaction(
        &kv,
        Transaction {
            id: "t1".to_string(),
            amount: 50_000,
            kind: TransactionKind::Expense,
            category: "food".to_string(),
            date: start_of_day(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()),
            time: None,
            description: "lunch".to_string(),
            created_at: Utc::now(),
        },
    );
    ledger.add_transaction(
        &kv,
        Transaction {
            id: "t2".to_string(),
            amount: 1_200_000,
            kind: TransactionKind::Income,
            category: "salary".to_string(),
            date: start_of_day(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            time: None,
            description: "january pay".to_string(),
            created_at: Utc::now(),
        },
    );
    kv
}

#[test]
fn report_export_writes_both_csv_files() {
    let kv = seeded_kv();
    let dir = tempdir().unwrap();
    let dir_str = dir.path().to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "money-savior",
        "report",
        "export",
        "--from",
        "2024-01-01",
        "--to",
        "2024-01-31",
        "--dir",
        &dir_str,
    ]);
    if let Some(("report", report_m)) = matches.subcommand() {
        reports::handle(&kv, report_m).unwrap();
    } else {
        panic!("no report subcommand");
    }

    let summary_path = dir
        .path()
        .join("money-savior-report-2024-01-01-to-2024-01-31-summary.csv");
    let detail_path = dir
        .path()
        .join("money-savior-report-2024-01-01-to-2024-01-31-transactions.csv");
    assert!(summary_path.exists());
    assert!(detail_path.exists());

    let summary = std::fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("EXPENSE REPORT"));
    assert!(summary.contains("From 2024-01-01 to 2024-01-31"));
    assert!(summary.contains("Total Expenses,\"50,000\""));
    assert!(summary.contains("Total Income,\"1,200,000\""));
    assert!(summary.contains("Balance,\"1,150,000\""));
    assert!(summary.contains("Food & Drink,\"50,000\",100.00%"));

    let mut rdr = csv::Reader::from_path(&detail_path).unwrap();
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "2024-01-05");
    assert_eq!(&rows[0][1], "Expense");
    assert_eq!(&rows[0][2], "Food & Drink");
    assert_eq!(&rows[0][3], "lunch");
    assert_eq!(&rows[0][4], "50,000");
    assert_eq!(&rows[1][1], "Income");
    assert_eq!(&rows[1][2], "Salary");
}

#[test]
fn report_export_skips_out_of_range_transactions() {
    let kv = seeded_kv();
    let dir = tempdir().unwrap();

    let ledger = Ledger::load(&kv);
    let (summary_path, detail_path) = money_savior::commands::exporter::write_report_csvs(
        &ledger,
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        dir.path(),
    )
    .unwrap();

    let summary = std::fs::read_to_string(&summary_path).unwrap();
    assert!(summary.contains("Total Expenses,0,"));
    assert!(summary.contains("Total Income,0,"));

    let mut rdr = csv::Reader::from_path(&detail_path).unwrap();
    assert_eq!(rdr.records().count(), 0);
}
