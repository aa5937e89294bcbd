use rusqlite::Connection;

use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file
///  - the SQLite database schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    Config::init_all(cli.db.clone(), cli.test)?;

    let cfg = Config::load()?;

    info(format!("Config file : {}", Config::config_file().display()));
    info(format!("Database    : {}", cfg.database));

    let conn = Connection::open(&cfg.database)?;
    init_db(&conn)?;

    success(format!("Database initialized at {}", cfg.database));
    Ok(())
}
