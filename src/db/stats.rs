use crate::db::pool::DbPool;
use crate::db::schema::{CACHE_TABLES, PRIMARY_TABLES, is_cache_table};
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW, color_for_role, colorize_count};
use crate::utils::table::Table;
use rusqlite::{Connection, OptionalExtension};
use std::fs;

/// Row count of one managed table; `rows` is `None` when the table is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: Option<i64>,
}

impl TableCount {
    pub fn is_cache(&self) -> bool {
        is_cache_table(self.table)
    }
}

pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Every problem reported by `PRAGMA integrity_check`; empty when healthy.
pub fn integrity_problems(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare("PRAGMA integrity_check;")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    // a single "ok" row, or one row per problem found
    if rows.len() == 1 && rows[0] == "ok" {
        Ok(Vec::new())
    } else {
        Ok(rows)
    }
}

/// Counts for the primary tables followed by the cache tables.
pub fn managed_table_counts(conn: &Connection) -> rusqlite::Result<Vec<TableCount>> {
    let mut out = Vec::new();

    for table in PRIMARY_TABLES.into_iter().chain(CACHE_TABLES) {
        let rows = if table_exists(conn, table)? {
            // names come from the fixed schema lists, never from input
            let n: i64 =
                conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
            Some(n)
        } else {
            None
        };
        out.push(TableCount { table, rows });
    }

    Ok(out)
}

pub fn render_counts(counts: &[TableCount]) -> String {
    let mut table = Table::new(["table", "rows", "role"]);

    for c in counts {
        let role = if c.is_cache() { "cache" } else { "primary" };
        table.add_row(vec![
            c.table.to_string(),
            colorize_count(c.rows),
            format!("{}{}{}", color_for_role(c.is_cache()), role, RESET),
        ]);
    }

    table.render()
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) FOREIGN KEYS
    //
    let fk = if pool.foreign_keys_enabled()? {
        format!("{GREEN}on{RESET}")
    } else {
        format!("{RED}off{RESET}")
    };
    println!("{}• Foreign keys:{} {}", CYAN, RESET, fk);

    //
    // 3) TABLES
    //
    let counts = managed_table_counts(&pool.conn)?;
    println!("{}• Tables:{}\n", CYAN, RESET);
    print!("{}", render_counts(&counts));

    println!();
    Ok(())
}
