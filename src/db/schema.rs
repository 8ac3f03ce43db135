//! Schema initializer for the film locations database.
//!
//! Creates the six tables if they are missing, then empties the four primary
//! tables so a fresh import can start from a clean slate. The two cache
//! tables (`coordinates`, `movie_info`) are keyed by natural names rather
//! than surrogate ids, so they are created but never cleared and their rows
//! survive every re-initialization.
//!
//! Everything runs inside a transaction owned by the caller: this module
//! never begins, commits or rolls back.

use crate::ui::sink::DiagnosticSink;
use rusqlite::{Result, Transaction};

// Writer and director are plain columns for now; they are expected to move
// into a role-tagged actors relation later.
const CREATE_MOVIES: &str = r#"
    CREATE TABLE IF NOT EXISTS movies (
        id                 INTEGER PRIMARY KEY AUTOINCREMENT,
        title              TEXT,
        writer             TEXT,
        director           TEXT,
        distributor        TEXT,
        production_company TEXT,
        release_year       INTEGER CHECK (release_year >= 0)
    )
"#;

const CREATE_LOCATIONS: &str = r#"
    CREATE TABLE IF NOT EXISTS locations (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        movie_id INTEGER NOT NULL,
        name     TEXT,
        fun_fact TEXT,

        FOREIGN KEY (movie_id) REFERENCES movies(id)
    )
"#;

const CREATE_ACTORS: &str = r#"
    CREATE TABLE IF NOT EXISTS actors (
        id   INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT
    )
"#;

const CREATE_MOVIES_ACTORS: &str = r#"
    CREATE TABLE IF NOT EXISTS movies_actors (
        movie_id INTEGER NOT NULL,
        actor_id INTEGER NOT NULL,

        PRIMARY KEY (movie_id, actor_id),
        FOREIGN KEY (movie_id) REFERENCES movies(id),
        FOREIGN KEY (actor_id) REFERENCES actors(id)
    )
"#;

// Cache: `location_name` deliberately does not reference `locations`.
const CREATE_COORDINATES: &str = r#"
    CREATE TABLE IF NOT EXISTS coordinates (
        location_name TEXT NOT NULL PRIMARY KEY,
        lat           DECIMAL(10, 6) NOT NULL,
        lng           DECIMAL(10, 6) NOT NULL
    )
"#;

// Cache: `movie_title` deliberately does not reference `movies`.
const CREATE_MOVIE_INFO: &str = r#"
    CREATE TABLE IF NOT EXISTS movie_info (
        movie_title TEXT NOT NULL PRIMARY KEY,
        info_json   TEXT
    )
"#;

/// What a step does to its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `CREATE TABLE IF NOT EXISTS`
    Create,
    /// `DELETE FROM`, every row
    Clear,
}

/// One statement of the initialization sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub table: &'static str,
    pub action: Action,
    pub sql: &'static str,
}

impl Step {
    const fn create(table: &'static str, sql: &'static str) -> Self {
        Self {
            table,
            action: Action::Create,
            sql,
        }
    }

    const fn clear(table: &'static str, sql: &'static str) -> Self {
        Self {
            table,
            action: Action::Clear,
            sql,
        }
    }

    /// The line reported to the sink right before the statement runs.
    pub fn describe(&self) -> String {
        match self.action {
            Action::Create => format!("Creating table '{}' unless it already exists", self.table),
            Action::Clear => format!("Clearing table '{}'", self.table),
        }
    }

    fn apply(&self, tx: &Transaction<'_>) -> Result<()> {
        tx.execute(self.sql, [])?;
        Ok(())
    }
}

/// The full sequence, in execution order.
///
/// Clearing goes children first (`movies_actors`, `actors`, `locations`,
/// `movies`) so foreign keys never point at a deleted parent.
pub const STEPS: [Step; 10] = [
    Step::create("movies", CREATE_MOVIES),
    Step::create("locations", CREATE_LOCATIONS),
    Step::create("actors", CREATE_ACTORS),
    Step::create("movies_actors", CREATE_MOVIES_ACTORS),
    Step::clear("movies_actors", "DELETE FROM movies_actors"),
    Step::clear("actors", "DELETE FROM actors"),
    Step::clear("locations", "DELETE FROM locations"),
    Step::clear("movies", "DELETE FROM movies"),
    Step::create("coordinates", CREATE_COORDINATES),
    Step::create("movie_info", CREATE_MOVIE_INFO),
];

/// Tables emptied on every run.
pub const PRIMARY_TABLES: [&str; 4] = ["movies", "locations", "actors", "movies_actors"];

/// Tables created but never cleared.
pub const CACHE_TABLES: [&str; 2] = ["coordinates", "movie_info"];

pub fn is_cache_table(table: &str) -> bool {
    CACHE_TABLES.contains(&table)
}

/// Run every step of [`STEPS`] in order inside `tx`.
///
/// Stops at the first failing statement and returns its error untouched.
/// Nothing after the failing step is executed or reported.
pub fn init_tables(tx: &Transaction<'_>, sink: &mut dyn DiagnosticSink) -> Result<()> {
    for step in &STEPS {
        sink.info(&step.describe());
        step.apply(tx)?;
    }

    Ok(())
}
