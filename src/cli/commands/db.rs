use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        info,
        check,
        vacuum,
    } = cmd
    else {
        return Ok(());
    };

    if !(*info || *check || *vacuum) {
        return Ok(());
    }

    let mut pool = DbPool::open_existing(&cfg.database)?;

    //
    // 1) INFO
    //
    if *info {
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    //
    // 2) CHECK
    //
    if *check {
        println!("{}▶ Running integrity check…{}", CYAN, RESET);

        let problems = stats::integrity_problems(&pool.conn)?;

        if problems.is_empty() {
            println!("{}✔ Integrity check passed.{}", GREEN, RESET);
        } else {
            println!(
                "{}✘ Integrity check failed:{} {} problem(s)",
                RED,
                RESET,
                problems.len()
            );
            for p in &problems {
                println!("    {p}");
            }
        }

        // one row per dangling reference: (table, rowid, parent, fkid)
        let mut stmt = pool.conn.prepare("PRAGMA foreign_key_check;")?;
        let violations = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if violations.is_empty() {
            println!("{}✔ Foreign key check passed.{}\n", GREEN, RESET);
        } else {
            println!(
                "{}✘ Foreign key check failed:{} {} dangling reference(s)",
                RED,
                RESET,
                violations.len()
            );
            for (table, parent) in &violations {
                println!("    {table} → {parent}");
            }
            println!();
        }
    }

    //
    // 3) VACUUM
    //
    if *vacuum {
        println!("{}▶ Running VACUUM…{}", CYAN, RESET);

        pool.conn.execute_batch("VACUUM;")?;

        println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);

        if let Err(e) = ttlog(&pool.conn, "vacuum", &cfg.database, "Database vacuumed") {
            eprintln!("⚠️ Failed to write internal log: {}", e);
        }
    }

    Ok(())
}
