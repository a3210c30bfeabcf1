// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use money_savior::store::KvStore;
use money_savior::{cli, commands, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let matches = cli::build_cli().get_matches();

    let conn = db::open_or_init()?;
    let kv = KvStore::new(conn);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data store initialized at {}", db::db_path()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&kv, sub)?,
        Some(("category", sub)) => commands::categories::handle(&kv, sub)?,
        Some(("profile", sub)) => commands::profiles::handle(&kv, sub)?,
        Some(("report", sub)) => commands::reports::handle(&kv, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
