//! Small key/value preferences: the sort option and picker images per
//! collection, whether the seed file has been imported, and who is signed in.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::warn;

use crate::models::RecordKind;
use crate::sort::SortOption;

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("failed to read setting {key}"))
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![key, value],
    )
    .with_context(|| format!("failed to write setting {key}"))?;
    Ok(())
}

fn key_for(kind: RecordKind, name: &str) -> String {
    format!("{}.{name}", kind.key())
}

/// Stored sort option. Unreadable values are ignored so a bad row never
/// blocks the list from loading.
pub fn load_sort_option(conn: &Connection, kind: RecordKind) -> Result<Option<SortOption>> {
    let Some(raw) = get_setting(conn, &key_for(kind, "sort_option"))? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(option) => Ok(Some(option)),
        Err(err) => {
            warn!(%err, collection = kind.key(), "ignoring stored sort option");
            Ok(None)
        }
    }
}

pub fn save_sort_option(conn: &Connection, kind: RecordKind, option: SortOption) -> Result<()> {
    set_setting(conn, &key_for(kind, "sort_option"), option.as_str())
}

pub fn load_images(conn: &Connection, kind: RecordKind) -> Result<Vec<String>> {
    match get_setting(conn, &key_for(kind, "images"))? {
        Some(raw) => serde_json::from_str(&raw).context("stored image list is not valid JSON"),
        None => Ok(Vec::new()),
    }
}

pub fn save_images(conn: &Connection, kind: RecordKind, images: &[String]) -> Result<()> {
    let raw = serde_json::to_string(images).context("failed to encode image list")?;
    set_setting(conn, &key_for(kind, "images"), &raw)
}

/// Settings key holding the username of the signed-in account.
const SESSION_KEY: &str = "session.username";

pub fn load_session(conn: &Connection) -> Result<Option<String>> {
    get_setting(conn, SESSION_KEY)
}

pub fn save_session(conn: &Connection, username: &str) -> Result<()> {
    set_setting(conn, SESSION_KEY, username)
}

/// Forget the signed-in account, returning whether one was signed in.
pub fn clear_session(conn: &Connection) -> Result<bool> {
    let removed = conn
        .execute("DELETE FROM settings WHERE key = ?1", params![SESSION_KEY])
        .context("failed to clear session")?;
    Ok(removed > 0)
}

pub fn is_seeded(conn: &Connection, kind: RecordKind) -> Result<bool> {
    Ok(get_setting(conn, &key_for(kind, "seeded"))?.is_some())
}

pub fn mark_seeded(conn: &Connection, kind: RecordKind) -> Result<()> {
    set_setting(conn, &key_for(kind, "seeded"), "1")
}
