use std::path::Path;

use anyhow::{anyhow, Result};
use rusqlite::Connection;

use super::{connection, musicians, people, settings, users, RecordStore, StoredUser};
use crate::models::{Musician, Person, Record, RecordKind, User};
use crate::sort::SortOption;

/// [`RecordStore`] backed by a single SQLite connection. One store serves both
/// collections.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and bring its schema
    /// up to date.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            conn: connection::ensure_schema(path)?,
        })
    }

    /// Throwaway store with the full schema, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: connection::open_in_memory()?,
        })
    }

    /// Raw connection for callers that need a query the store does not
    /// wrap.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Images (people) or posters (musicians) offered by the picker.
    pub fn available_images(&self, kind: RecordKind) -> Result<Vec<String>> {
        settings::load_images(&self.conn, kind)
    }

    /// Replace the picker candidates for `kind`, keeping the given order.
    pub fn set_available_images(&mut self, kind: RecordKind, images: &[String]) -> Result<()> {
        settings::save_images(&self.conn, kind, images)
    }

    /// Whether the seed file for `kind` has been imported before.
    pub fn is_seeded(&self, kind: RecordKind) -> Result<bool> {
        settings::is_seeded(&self.conn, kind)
    }

    /// Record that `kind` has been seeded so later imports are skipped.
    pub fn mark_seeded(&mut self, kind: RecordKind) -> Result<()> {
        settings::mark_seeded(&self.conn, kind)
    }

    /// Account plus credentials for `username`, if registered.
    pub fn find_user(&self, username: &str) -> Result<Option<StoredUser>> {
        users::fetch_user_by_username(&self.conn, username)
    }

    pub fn email_registered(&self, email: &str) -> Result<bool> {
        users::email_registered(&self.conn, email)
    }

    /// Persist a new account with an already salted and hashed password.
    pub fn register_user(&mut self, user: &User, salt: &str, password_hash: &str) -> Result<User> {
        users::create_user(&self.conn, user, salt, password_hash)
    }

    /// Username of the signed-in account, if any.
    pub fn session(&self) -> Result<Option<String>> {
        settings::load_session(&self.conn)
    }

    pub fn start_session(&mut self, username: &str) -> Result<()> {
        settings::save_session(&self.conn, username)
    }

    /// Sign out. Returns whether anyone was signed in.
    pub fn end_session(&mut self) -> Result<bool> {
        settings::clear_session(&self.conn)
    }
}

/// Id of a persisted record; updates on a record without one are refused.
fn saved_id<R: Record>(record: &R) -> Result<i64> {
    record
        .id()
        .ok_or_else(|| anyhow!("{} has not been saved yet", R::KIND.noun()))
}

impl RecordStore<Person> for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<Person>> {
        people::fetch_people(&self.conn)
    }

    fn insert(&mut self, record: &Person) -> Result<Person> {
        people::create_person(&self.conn, record)
    }

    fn update(&mut self, record: &Person) -> Result<()> {
        people::update_person(&self.conn, saved_id(record)?, record)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        people::delete_person(&self.conn, id)
    }

    fn delete_all(&mut self) -> Result<usize> {
        people::delete_all_people(&self.conn)
    }

    fn load_sort_option(&self) -> Result<Option<SortOption>> {
        settings::load_sort_option(&self.conn, RecordKind::Person)
    }

    fn save_sort_option(&mut self, option: SortOption) -> Result<()> {
        settings::save_sort_option(&self.conn, RecordKind::Person, option)
    }
}

impl RecordStore<Musician> for SqliteStore {
    fn fetch_all(&self) -> Result<Vec<Musician>> {
        musicians::fetch_musicians(&self.conn)
    }

    fn insert(&mut self, record: &Musician) -> Result<Musician> {
        musicians::create_musician(&self.conn, record)
    }

    fn update(&mut self, record: &Musician) -> Result<()> {
        musicians::update_musician(&self.conn, saved_id(record)?, record)
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        musicians::delete_musician(&self.conn, id)
    }

    fn delete_all(&mut self) -> Result<usize> {
        musicians::delete_all_musicians(&self.conn)
    }

    fn load_sort_option(&self) -> Result<Option<SortOption>> {
        settings::load_sort_option(&self.conn, RecordKind::Musician)
    }

    fn save_sort_option(&mut self, option: SortOption) -> Result<()> {
        settings::save_sort_option(&self.conn, RecordKind::Musician, option)
    }
}
