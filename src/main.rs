// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;

use pocketledger::{LedgerStore, SqliteStore, cli, commands, config::AppPaths, logging};

fn main() -> Result<()> {
    logging::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let paths = AppPaths::resolve(matches.get_one::<PathBuf>("data-dir").map(|p| p.as_path()))?;
    let store = LedgerStore::new(SqliteStore::open_or_init(&paths.db_path())?);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger initialized at {}", paths.db_path().display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&store, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("currency", sub)) => commands::currency::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("backup", _)) => commands::backups::backup(&store, &paths.backup_service())?,
        Some(("restore", _)) => commands::backups::restore(&store, &paths.backup_service())?,
        Some(("doctor", _)) => commands::doctor::handle(&store)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
