use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::init::{InitLogic, InitOptions};
use crate::errors::AppResult;
use crate::ui::sink::ConsoleSink;
use std::path::PathBuf;

/// Handle the `init` command
///
/// This prepares:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database file
///
/// and then runs the schema initialization in a single transaction.
/// With `--dry-run` only the database is touched, and nothing is kept.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Init { backup, dry_run } = &cli.command else {
        return Ok(());
    };

    let opts = InitOptions {
        backup: *backup || cfg.backup_before_init,
        dry_run: *dry_run,
    };

    let db_path = if opts.dry_run {
        PathBuf::from(&cfg.database)
    } else {
        Config::init_all(cli.db.clone(), cli.test)?
    };

    println!("⚙️  Initializing filmloc…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}\n", db_path.display());

    InitLogic::run(&db_path, opts, &mut ConsoleSink)?;

    if !opts.dry_run {
        println!("🎉 filmloc initialization completed!");
    }
    Ok(())
}
