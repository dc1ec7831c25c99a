// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

use crate::config::DATA_DIR_ENV;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn record_args(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .help("Non-negative amount"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .required(required)
            .help("income|expense"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .required(required)
            .help("Category label, e.g. Food"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD, defaults to now"),
    )
}

pub fn build_cli() -> Command {
    Command::new("pocketledger")
        .about("Local transaction ledger with budgets, category spending and JSON backups")
        .version(clap::crate_version!())
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .env(DATA_DIR_ENV)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Directory holding the ledger database and backup"),
        )
        .subcommand(Command::new("init").about("Create the ledger database"))
        .subcommand(
            Command::new("tx")
                .about("Record and edit transactions")
                .subcommand_required(true)
                .subcommand(
                    record_args(Command::new("add").about("Add a transaction"), true)
                        .arg(Arg::new("id").long("id").help("Explicit id, defaults to a UUID")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(record_args(
                    Command::new("update")
                        .about("Replace fields of an existing transaction")
                        .arg(Arg::new("id").required(true)),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly budget")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .about("Set the monthly budget")
                        .arg(Arg::new("amount").required(true)),
                )
                .subcommand(json_args(
                    Command::new("show").about("Budget against this month's expenses"),
                )),
        )
        .subcommand(
            Command::new("currency")
                .about("Display currency")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .about("Select the display currency")
                        .arg(Arg::new("code").required(true)),
                )
                .subcommand(Command::new("show").about("Show the selected currency"))
                .subcommand(Command::new("list").about("List offered currencies")),
        )
        .subcommand(
            Command::new("category")
                .about("Categories")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List default categories")),
        )
        .subcommand(
            Command::new("report")
                .about("Totals and breakdowns")
                .subcommand_required(true)
                .subcommand(json_args(
                    Command::new("summary").about("Balance, income, expense and budget"),
                ))
                .subcommand(json_args(
                    Command::new("spend-by-category")
                        .about("Amounts per category")
                        .arg(Arg::new("month").long("month").help("YYYY-MM")),
                )),
        )
        .subcommand(Command::new("backup").about("Write transactions to the backup file"))
        .subcommand(Command::new("restore").about("Replace transactions with the backup file"))
        .subcommand(Command::new("doctor").about("Check the stored ledger for problems"))
}
