#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn filmloc() -> Command {
    cargo_bin_cmd!("filmloc")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_filmloc.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the DB through the CLI in test mode
pub fn init_db(db_path: &str) {
    filmloc()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// One movie with two actors and a location, plus one entry in each cache.
pub fn seed(conn: &Connection) {
    conn.execute_batch(
        r#"
        INSERT INTO movies (id, title, writer, director, distributor, production_company, release_year)
            VALUES (1, 'Vertigo', 'Alec Coppel', 'Alfred Hitchcock', 'Paramount Pictures',
                    'Alfred J. Hitchcock Productions', 1958);
        INSERT INTO actors (id, name) VALUES (1, 'James Stewart'), (2, 'Kim Novak');
        INSERT INTO locations (movie_id, name, fun_fact)
            VALUES (1, 'Fort Point', 'Madeleine jumps into the bay right below the bridge.');
        INSERT INTO movies_actors (movie_id, actor_id) VALUES (1, 1), (1, 2);
        INSERT INTO coordinates (location_name, lat, lng) VALUES ('Paris', 48.856613, 2.352222);
        INSERT INTO movie_info (movie_title, info_json)
            VALUES ('Inception', '{"Year":"2010","Director":"Christopher Nolan"}');
        "#,
    )
    .expect("seed rows");
}

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .expect("count rows")
}
