use filmloc::db::initialize::{dry_run, init_db};
use filmloc::db::pool::DbPool;
use filmloc::db::schema::{Action, CACHE_TABLES, PRIMARY_TABLES, STEPS, init_tables};
use filmloc::db::stats::{integrity_problems, table_exists};
use filmloc::errors::AppError;
use filmloc::ui::sink::{NullSink, RecordingSink};
use rusqlite::{Connection, ErrorCode, params};
use serde_json::json;

mod common;
use common::{count, seed};

fn fresh() -> DbPool {
    DbPool::in_memory().expect("open in-memory db")
}

/// Every user object in the database, except the internal log table.
fn schema_snapshot(conn: &Connection) -> Vec<(String, String, Option<String>)> {
    let mut stmt = conn
        .prepare(
            "SELECT type, name, sql FROM sqlite_master
             WHERE name NOT LIKE 'sqlite_%' AND tbl_name <> 'log'
             ORDER BY type, name",
        )
        .unwrap();
    stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

#[test]
fn test_init_creates_all_six_tables() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();

    for table in PRIMARY_TABLES.iter().chain(CACHE_TABLES.iter()) {
        assert!(table_exists(&pool.conn, table).unwrap(), "missing {table}");
    }
}

#[test]
fn test_init_twice_yields_identical_schema() {
    let mut pool = fresh();

    init_db(&mut pool.conn, &mut NullSink).unwrap();
    let first = schema_snapshot(&pool.conn);

    init_db(&mut pool.conn, &mut NullSink).unwrap();
    let second = schema_snapshot(&pool.conn);

    assert_eq!(first.len(), 6);
    assert_eq!(first, second);
}

#[test]
fn test_primary_tables_are_empty_after_init() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();
    seed(&pool.conn);

    for table in PRIMARY_TABLES {
        assert!(count(&pool.conn, table) > 0, "seed left {table} empty");
    }

    init_db(&mut pool.conn, &mut NullSink).unwrap();

    for table in PRIMARY_TABLES {
        assert_eq!(count(&pool.conn, table), 0, "{table} not cleared");
    }
}

#[test]
fn test_cache_rows_survive_init() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();

    let info = json!({
        "Title": "Inception",
        "Year": "2010",
        "Director": "Christopher Nolan"
    })
    .to_string();

    pool.conn
        .execute(
            "INSERT INTO coordinates (location_name, lat, lng) VALUES (?1, ?2, ?3)",
            params!["Paris", 48.856613_f64, 2.352222_f64],
        )
        .unwrap();
    pool.conn
        .execute(
            "INSERT INTO movie_info (movie_title, info_json) VALUES (?1, ?2)",
            params!["Inception", info],
        )
        .unwrap();

    init_db(&mut pool.conn, &mut NullSink).unwrap();

    let (lat, lng): (f64, f64) = pool
        .conn
        .query_row(
            "SELECT lat, lng FROM coordinates WHERE location_name = 'Paris'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(lat, 48.856613);
    assert_eq!(lng, 2.352222);

    let stored: String = pool
        .conn
        .query_row(
            "SELECT info_json FROM movie_info WHERE movie_title = 'Inception'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(stored, info);

    let parsed: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(parsed["Director"], "Christopher Nolan");
}

#[test]
fn test_location_with_unknown_movie_is_rejected() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();

    let err = pool
        .conn
        .execute(
            "INSERT INTO locations (movie_id, name, fun_fact) VALUES (42, 'Coit Tower', '')",
            [],
        )
        .unwrap_err();

    assert!(is_constraint_violation(&err), "unexpected error: {err}");
    assert_eq!(count(&pool.conn, "locations"), 0);
}

#[test]
fn test_link_requires_existing_movie_and_actor() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();

    pool.conn
        .execute("INSERT INTO movies (id, title) VALUES (7, 'Bullitt')", [])
        .unwrap();

    let err = pool
        .conn
        .execute(
            "INSERT INTO movies_actors (movie_id, actor_id) VALUES (7, 99)",
            [],
        )
        .unwrap_err();
    assert!(is_constraint_violation(&err), "unexpected error: {err}");

    pool.conn
        .execute("INSERT INTO actors (id, name) VALUES (99, 'Steve McQueen')", [])
        .unwrap();
    pool.conn
        .execute(
            "INSERT INTO movies_actors (movie_id, actor_id) VALUES (7, 99)",
            [],
        )
        .unwrap();

    // composite key: the same pair twice is a duplicate
    let err = pool
        .conn
        .execute(
            "INSERT INTO movies_actors (movie_id, actor_id) VALUES (7, 99)",
            [],
        )
        .unwrap_err();
    assert!(is_constraint_violation(&err), "unexpected error: {err}");
}

#[test]
fn test_negative_release_year_is_rejected() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();

    let err = pool
        .conn
        .execute(
            "INSERT INTO movies (title, release_year) VALUES ('Time Travel', -1)",
            [],
        )
        .unwrap_err();

    assert!(is_constraint_violation(&err), "unexpected error: {err}");
}

#[test]
fn test_coordinates_require_lat_and_lng() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();

    let err = pool
        .conn
        .execute(
            "INSERT INTO coordinates (location_name, lat) VALUES ('Alcatraz Island', 37.8267)",
            [],
        )
        .unwrap_err();

    assert!(is_constraint_violation(&err), "unexpected error: {err}");
}

#[test]
fn test_messages_follow_step_order() {
    let mut pool = fresh();
    let mut sink = RecordingSink::new();

    init_db(&mut pool.conn, &mut sink).unwrap();

    let expected: Vec<String> = STEPS.iter().map(|s| s.describe()).collect();
    assert_eq!(sink.messages(), expected.as_slice());

    let messages = sink.into_messages();
    assert_eq!(messages.len(), 10);
    assert_eq!(
        messages[0],
        "Creating table 'movies' unless it already exists"
    );
    assert_eq!(
        &messages[4..8],
        [
            "Clearing table 'movies_actors'",
            "Clearing table 'actors'",
            "Clearing table 'locations'",
            "Clearing table 'movies'",
        ]
    );
    assert_eq!(
        messages[9],
        "Creating table 'movie_info' unless it already exists"
    );
}

#[test]
fn test_caches_are_created_but_never_cleared() {
    let cleared: Vec<&str> = STEPS
        .iter()
        .filter(|s| s.action == Action::Clear)
        .map(|s| s.table)
        .collect();

    assert_eq!(cleared, ["movies_actors", "actors", "locations", "movies"]);
    for cache in CACHE_TABLES {
        assert!(!cleared.contains(&cache));
    }

    // every cleared table is created before it is cleared
    for (i, step) in STEPS.iter().enumerate() {
        if step.action == Action::Clear {
            assert!(
                STEPS[..i]
                    .iter()
                    .any(|s| s.action == Action::Create && s.table == step.table)
            );
        }
    }
}

#[test]
fn test_failing_step_stops_the_sequence() {
    let mut pool = fresh();

    // movies exists with the exact shape, holds a row, and refuses deletes
    pool.conn.execute(STEPS[0].sql, []).unwrap();
    pool.conn
        .execute_batch(
            r#"
            INSERT INTO movies (id, title) VALUES (1, 'The Rock');
            CREATE TRIGGER deny_movie_purge BEFORE DELETE ON movies
            BEGIN
                SELECT RAISE(ABORT, 'purge denied');
            END;
            "#,
        )
        .unwrap();

    let tx = pool.conn.transaction().unwrap();
    let mut sink = RecordingSink::new();

    let err = init_tables(&tx, &mut sink).unwrap_err();
    assert!(err.to_string().contains("purge denied"), "unexpected error: {err}");

    assert_eq!(sink.messages().len(), 8);
    assert_eq!(
        sink.messages().last().map(String::as_str),
        Some("Clearing table 'movies'")
    );

    // steps 9 and 10 never ran
    assert!(!table_exists(&tx, "coordinates").unwrap());
    assert!(!table_exists(&tx, "movie_info").unwrap());
    // steps 2 to 4 did, inside the still open transaction
    assert!(table_exists(&tx, "locations").unwrap());
}

#[test]
fn test_init_db_rolls_back_on_failure() {
    let mut pool = fresh();

    pool.conn.execute(STEPS[0].sql, []).unwrap();
    pool.conn
        .execute_batch(
            r#"
            INSERT INTO movies (id, title) VALUES (1, 'The Rock');
            CREATE TRIGGER deny_movie_purge BEFORE DELETE ON movies
            BEGIN
                SELECT RAISE(ABORT, 'purge denied');
            END;
            "#,
        )
        .unwrap();

    let err = init_db(&mut pool.conn, &mut NullSink).unwrap_err();
    assert!(matches!(err, AppError::Db(_)), "unexpected error: {err}");

    assert!(!table_exists(&pool.conn, "locations").unwrap());
    assert!(!table_exists(&pool.conn, "coordinates").unwrap());
    assert_eq!(count(&pool.conn, "movies"), 1);
}

#[test]
fn test_init_tables_leaves_commit_to_the_caller() {
    let mut pool = fresh();

    {
        let tx = pool.conn.transaction().unwrap();
        init_tables(&tx, &mut NullSink).unwrap();
        assert!(table_exists(&tx, "movies").unwrap());
        // dropped without commit
    }

    for table in PRIMARY_TABLES.iter().chain(CACHE_TABLES.iter()) {
        assert!(!table_exists(&pool.conn, table).unwrap(), "{table} was committed");
    }
}

#[test]
fn test_existing_identical_tables_are_left_alone() {
    let mut pool = fresh();

    for step in STEPS.iter().filter(|s| s.action == Action::Create) {
        pool.conn.execute(step.sql, []).unwrap();
    }
    pool.conn
        .execute_batch("CREATE INDEX idx_locations_movie ON locations(movie_id);")
        .unwrap();

    let before = schema_snapshot(&pool.conn);
    init_db(&mut pool.conn, &mut NullSink).unwrap();
    let after = schema_snapshot(&pool.conn);

    assert_eq!(before, after);
}

#[test]
fn test_dry_run_reports_counts_and_keeps_data() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();
    seed(&pool.conn);

    let counts = dry_run(&mut pool.conn, &mut NullSink).unwrap();

    assert_eq!(counts.len(), 6);
    for c in &counts {
        if c.is_cache() {
            assert_eq!(c.rows, Some(1), "{}", c.table);
        } else {
            assert_eq!(c.rows, Some(0), "{}", c.table);
        }
    }

    assert_eq!(count(&pool.conn, "movies"), 1);
    assert_eq!(count(&pool.conn, "movies_actors"), 2);
}

#[test]
fn test_dry_run_on_empty_database_creates_nothing() {
    let mut pool = fresh();

    let counts = dry_run(&mut pool.conn, &mut NullSink).unwrap();
    assert!(counts.iter().all(|c| c.rows == Some(0)));

    assert!(!table_exists(&pool.conn, "movies").unwrap());
    assert!(!table_exists(&pool.conn, "movie_info").unwrap());
}

#[test]
fn test_pool_enables_foreign_keys() {
    let pool = fresh();
    assert!(pool.foreign_keys_enabled().unwrap());
}

#[test]
fn test_integrity_problems_empty_for_healthy_database() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();
    seed(&pool.conn);

    assert!(integrity_problems(&pool.conn).unwrap().is_empty());
}

#[test]
fn test_integrity_problems_lists_every_row() {
    let mut pool = fresh();
    init_db(&mut pool.conn, &mut NullSink).unwrap();

    // sneak two rows past the release year CHECK
    pool.conn
        .execute_batch(
            r#"
            PRAGMA ignore_check_constraints = ON;
            INSERT INTO movies (title, release_year) VALUES ('Before Time', -1);
            INSERT INTO movies (title, release_year) VALUES ('Way Before Time', -2);
            PRAGMA ignore_check_constraints = OFF;
            "#,
        )
        .unwrap();

    let problems = integrity_problems(&pool.conn).unwrap();
    assert_eq!(problems.len(), 2, "{problems:?}");
    assert!(problems.iter().all(|p| p.contains("CHECK")), "{problems:?}");
}
