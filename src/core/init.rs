use crate::core::backup::BackupLogic;
use crate::db::initialize::{dry_run, init_db};
use crate::db::log;
use crate::db::pool::DbPool;
use crate::db::stats::render_counts;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::ui::sink::DiagnosticSink;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct InitOptions {
    /// Zip the current database before purging it.
    pub backup: bool,
    /// Roll back instead of committing.
    pub dry_run: bool,
}

pub struct InitLogic;

impl InitLogic {
    pub fn run(db_path: &Path, opts: InitOptions, sink: &mut dyn DiagnosticSink) -> AppResult<()> {
        let path_str = db_path.to_string_lossy().to_string();

        if opts.dry_run {
            let mut pool = DbPool::open_existing(&path_str)?;
            let counts = dry_run(&mut pool.conn, sink)?;

            println!("\n🔎 Dry run: every change was rolled back. After init the tables would hold:\n");
            print!("{}", render_counts(&counts));

            Self::note(&pool, "dry_run", &path_str, "Dry run of database initialization");
            return Ok(());
        }

        if opts.backup {
            BackupLogic::snapshot_before_init(db_path)?;
        }

        let mut pool = DbPool::new(&path_str)?;
        init_db(&mut pool.conn, sink)?;

        success(format!("Database initialized at {}", &path_str));

        Self::note(
            &pool,
            "init",
            "Database initialized",
            &format!("Database initialized at {}", &path_str),
        );

        Ok(())
    }

    // Internal log, never fails the command
    fn note(pool: &DbPool, operation: &str, target: &str, message: &str) {
        if let Err(e) = log::ttlog(&pool.conn, operation, target, message) {
            warning(format!("Failed to write internal log: {}", e));
        }
    }
}
