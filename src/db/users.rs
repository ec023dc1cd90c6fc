use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::models::User;

/// A user row together with the salted password digest it was created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUser {
    pub user: User,
    pub salt: String,
    pub password_hash: String,
}

fn stored_user_from_row(row: &Row<'_>) -> rusqlite::Result<StoredUser> {
    Ok(StoredUser {
        user: User {
            id: row.get(0)?,
            username: row.get(1)?,
            full_name: row.get(2)?,
            email: row.get(3)?,
        },
        salt: row.get(4)?,
        password_hash: row.get(5)?,
    })
}

/// Look a user up by username. Sign-in resolves the username to the
/// account's email and credentials through this query.
pub fn fetch_user_by_username(conn: &Connection, username: &str) -> Result<Option<StoredUser>> {
    conn.query_row(
        "SELECT id, username, full_name, email, password_salt, password_hash
         FROM users WHERE username = ?1",
        params![username],
        stored_user_from_row,
    )
    .optional()
    .context("failed to load user")
}

/// Whether an account already uses `email`. Emails compare without regard to
/// case.
pub fn email_registered(conn: &Connection, email: &str) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM users WHERE email = ?1 COLLATE NOCASE",
            params![email],
            |row| row.get(0),
        )
        .context("failed to check registered emails")?;
    Ok(count > 0)
}

/// Insert a new account and return it with its assigned id. The unique
/// indexes on `username` and `email` back up the checks done before calling
/// this.
pub fn create_user(
    conn: &Connection,
    user: &User,
    salt: &str,
    password_hash: &str,
) -> Result<User> {
    conn.execute(
        "INSERT INTO users (username, full_name, email, password_salt, password_hash)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user.username, user.full_name, user.email, salt, password_hash],
    )
    .context("failed to insert user")?;

    Ok(User {
        id: Some(conn.last_insert_rowid()),
        ..user.clone()
    })
}
