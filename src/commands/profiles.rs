// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::store::{KvStore, Ledger, Profiles};
use crate::utils::{maybe_print_json, pretty_table};

pub fn handle(kv: &KvStore, m: &clap::ArgMatches) -> Result<()> {
    let mut profiles = Profiles::load(kv);
    let mut ledger = Ledger::load(kv);

    match m.subcommand() {
        Some(("create", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            if name.is_empty() {
                bail!("Profile name must not be empty");
            }
            let p = profiles.create_profile(kv, &mut ledger, &name);
            println!("Created profile '{}' ({}) and switched to it", p.name, p.id);
        }
        Some(("list", sub)) => list(&profiles, sub)?,
        Some(("switch", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            if !profiles.list().iter().any(|p| p.id == *id) {
                bail!("Profile '{}' not found", id);
            }
            profiles.switch_profile(kv, &mut ledger, id);
            println!("Switched to profile '{}'", profiles.current().name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            profiles.delete_profile(kv, &mut ledger, id)?;
            println!("Removed profile {}", id);
        }
        Some(("export", sub)) => {
            let dir = sub.get_one::<String>("dir").unwrap();
            let path = profiles.export_profile(kv, &ledger, Path::new(dir))?;
            println!("Exported profile '{}' to {}", profiles.current().name, path.display());
        }
        Some(("import", sub)) => {
            let path = sub.get_one::<String>("path").unwrap();
            let p = profiles.import_profile(kv, &mut ledger, Path::new(path))?;
            println!("Imported profile '{}' ({}) and switched to it", p.name, p.id);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct ProfileRow {
    id: String,
    name: String,
    #[serde(rename = "createdAt")]
    created_at: String,
    current: bool,
}

fn list(profiles: &Profiles, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let current_id = profiles.current().id.clone();
    let data: Vec<ProfileRow> = profiles
        .list()
        .iter()
        .map(|p| ProfileRow {
            id: p.id.clone(),
            name: p.name.clone(),
            created_at: p.created_at.to_rfc3339(),
            current: p.id == current_id,
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|p| {
                vec![
                    p.id.clone(),
                    p.name.clone(),
                    p.created_at.clone(),
                    if p.current { "*".to_string() } else { String::new() },
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Name", "Created", "Current"], rows)
        );
    }
    Ok(())
}
