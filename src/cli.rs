// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("money-savior")
        .about("Personal income/expense tracking with isolated data profiles")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(Command::new("init").about("Initialize the data store"))
        .subcommand(tx_cmd())
        .subcommand(category_cmd())
        .subcommand(profile_cmd())
        .subcommand(report_cmd())
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .about("Record a transaction")
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .value_parser(value_parser!(i64).range(0..))
                        .help("Amount in the smallest currency unit"),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["expense", "income"])
                        .default_value("expense"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Category id"),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("Occurrence date (YYYY-MM-DD)"),
                )
                .arg(Arg::new("time").long("time").help("Time of day (HH:MM)"))
                .arg(
                    Arg::new("description")
                        .long("description")
                        .default_value(""),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Update fields of a transaction")
                .arg(Arg::new("id").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .value_parser(value_parser!(i64).range(0..)),
                )
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["expense", "income"]),
                )
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("date").long("date").help("YYYY-MM-DD"))
                .arg(Arg::new("time").long("time"))
                .arg(Arg::new("description").long("description")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a transaction")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(with_json_flags(
            Command::new("list")
                .about("List transactions")
                .arg(Arg::new("month").long("month").help("Filter by month (YYYY-MM)"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["expense", "income"])
                        .help("Filter by kind"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .help("Filter by category id"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
}

fn category_cmd() -> Command {
    Command::new("category")
        .about("Manage categories")
        .subcommand(
            Command::new("add")
                .about("Add a category")
                .arg(Arg::new("name").required(true))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["expense", "income", "both"])
                        .default_value("expense"),
                )
                .arg(
                    Arg::new("icon")
                        .long("icon")
                        .default_value("circle")
                        .help("Symbolic icon name"),
                )
                .arg(
                    Arg::new("color")
                        .long("color")
                        .default_value("#888888")
                        .help("Hex color"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Update fields of a category")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["expense", "income", "both"]),
                )
                .arg(Arg::new("icon").long("icon"))
                .arg(Arg::new("color").long("color")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a category (transactions keep their reference)")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(with_json_flags(
            Command::new("list").about("List categories"),
        ))
}

fn profile_cmd() -> Command {
    Command::new("profile")
        .about("Manage isolated data profiles")
        .subcommand(
            Command::new("create")
                .about("Create a profile and switch to it")
                .arg(Arg::new("name").required(true)),
        )
        .subcommand(with_json_flags(Command::new("list").about("List profiles")))
        .subcommand(
            Command::new("switch")
                .about("Switch the active profile")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a profile and its stored data")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("export")
                .about("Write the current profile as a snapshot file")
                .arg(Arg::new("dir").long("dir").default_value(".")),
        )
        .subcommand(
            Command::new("import")
                .about("Load a snapshot file and make it the current profile")
                .arg(Arg::new("path").required(true)),
        )
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated views over the active profile")
        .subcommand(with_json_flags(
            Command::new("summary")
                .about("Income, expense and balance totals")
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD, defaults to start of this month"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD, defaults to end of this month")),
        ))
        .subcommand(with_json_flags(
            Command::new("by-category")
                .about("Expense totals per category with percentage shares")
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD")),
        ))
        .subcommand(with_json_flags(
            Command::new("monthly")
                .about("Per-month income/expense totals, newest first")
                .arg(
                    Arg::new("months")
                        .long("months")
                        .value_parser(value_parser!(usize))
                        .default_value("12"),
                ),
        ))
        .subcommand(
            Command::new("export")
                .about("Write summary and transaction-detail CSV files")
                .arg(Arg::new("from").long("from").help("YYYY-MM-DD"))
                .arg(Arg::new("to").long("to").help("YYYY-MM-DD"))
                .arg(Arg::new("dir").long("dir").default_value(".")),
        )
}
