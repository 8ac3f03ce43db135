use crate::db::log::ensure_log_table;
use crate::db::schema::init_tables;
use crate::db::stats::{TableCount, managed_table_counts};
use crate::errors::AppResult;
use crate::ui::sink::DiagnosticSink;
use rusqlite::Connection;

/// Initialize the database.
///
/// Owns the transaction around the schema initializer: it is committed only
/// when all steps succeed. On error the transaction is dropped, which rolls
/// it back, and the first database error is returned.
pub fn init_db(conn: &mut Connection, sink: &mut dyn DiagnosticSink) -> AppResult<()> {
    let tx = conn.transaction()?;
    init_tables(&tx, sink)?;
    tx.commit()?;

    // internal bookkeeping, outside the initialization sequence
    ensure_log_table(conn)?;
    Ok(())
}

/// Run the full sequence and report the resulting row counts, then roll
/// everything back. The database is left exactly as it was.
pub fn dry_run(conn: &mut Connection, sink: &mut dyn DiagnosticSink) -> AppResult<Vec<TableCount>> {
    let tx = conn.transaction()?;
    init_tables(&tx, sink)?;
    let counts = managed_table_counts(&tx)?;
    tx.rollback()?;

    Ok(counts)
}
