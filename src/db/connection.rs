use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::debug;

/// Ensure the database file exists, run lazy migrations, and return a live
/// connection. Parent directories are created on demand so a fresh data
/// directory works without any setup step.
pub fn ensure_schema(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    migrate(&conn)?;
    debug!(path = %path.display(), "database ready");
    Ok(conn)
}

/// Fresh in-memory database with the full schema. Used by tests and dry runs.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    migrate(&conn)?;
    Ok(conn)
}

fn migrate(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            occupation TEXT NOT NULL DEFAULT '',
            nationality TEXT NOT NULL DEFAULT '',
            birth_date INTEGER,
            birth_place TEXT NOT NULL DEFAULT '',
            bio TEXT NOT NULL DEFAULT '',
            achievements TEXT NOT NULL DEFAULT '',
            image TEXT
        )",
        [],
    )
    .context("failed to create people table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS musicians (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            genres TEXT NOT NULL DEFAULT '',
            instruments TEXT NOT NULL DEFAULT '',
            labels TEXT NOT NULL DEFAULT '',
            dob INTEGER,
            active_years TEXT,
            spouses TEXT NOT NULL DEFAULT '',
            kids TEXT NOT NULL DEFAULT '',
            relatives TEXT NOT NULL DEFAULT '',
            works TEXT NOT NULL DEFAULT '',
            photo TEXT
        )",
        [],
    )
    .context("failed to create musicians table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE COLLATE NOCASE,
            password_salt TEXT NOT NULL,
            password_hash TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create users table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create settings table")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parent_directories_and_is_reopenable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("roster.sqlite");

        let conn = ensure_schema(&path).unwrap();
        conn.execute("INSERT INTO settings (key, value) VALUES ('k', 'v')", [])
            .unwrap();
        drop(conn);

        let conn = ensure_schema(&path).unwrap();
        let value: String = conn
            .query_row("SELECT value FROM settings WHERE key = 'k'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(value, "v");
    }
}
