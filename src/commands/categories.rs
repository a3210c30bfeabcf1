// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Category, CategoryKind};
use crate::store::ledger::CategoryPatch;
use crate::store::{KvStore, Ledger};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(kv: &KvStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let mut ledger = Ledger::load(kv);
            let name = sub.get_one::<String>("name").unwrap().to_string();
            let id = Uuid::new_v4().to_string();
            ledger.add_category(
                kv,
                Category {
                    id: id.clone(),
                    name: name.clone(),
                    kind: parse_kind(sub.get_one::<String>("type").unwrap()),
                    icon: sub.get_one::<String>("icon").unwrap().to_string(),
                    color: sub.get_one::<String>("color").unwrap().to_string(),
                },
            );
            println!("Added category '{}' ({})", name, id);
        }
        Some(("edit", sub)) => {
            let mut ledger = Ledger::load(kv);
            let id = sub.get_one::<String>("id").unwrap();
            let patch = CategoryPatch {
                name: sub.get_one::<String>("name").cloned(),
                kind: sub.get_one::<String>("type").map(|s| parse_kind(s)),
                icon: sub.get_one::<String>("icon").cloned(),
                color: sub.get_one::<String>("color").cloned(),
            };
            ledger.update_category(kv, id, patch);
            println!("Updated category {}", id);
        }
        Some(("rm", sub)) => {
            let mut ledger = Ledger::load(kv);
            let id = sub.get_one::<String>("id").unwrap();
            ledger.delete_category(kv, id);
            println!("Removed category {}", id);
        }
        Some(("list", sub)) => list(kv, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_kind(s: &str) -> CategoryKind {
    match s {
        "income" => CategoryKind::Income,
        "both" => CategoryKind::Both,
        _ => CategoryKind::Expense,
    }
}

#[derive(Serialize)]
struct CategoryRow {
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: String,
    icon: String,
    color: String,
}

fn list(kv: &KvStore, sub: &clap::ArgMatches) -> Result<()> {
    let ledger = Ledger::load(kv);
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<CategoryRow> = ledger
        .categories()
        .iter()
        .map(|c| CategoryRow {
            id: c.id.clone(),
            name: c.name.clone(),
            kind: c.kind.as_str().to_string(),
            icon: c.icon.clone(),
            color: c.color.clone(),
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.id.clone(),
                    c.name.clone(),
                    c.kind.clone(),
                    c.icon.clone(),
                    c.color.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Type", "Icon", "Color"], rows)
        );
    }
    Ok(())
}
