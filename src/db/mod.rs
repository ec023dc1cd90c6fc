//! Persistence module split across logical submodules. The rest of the crate
//! only talks to storage through [`RecordStore`], so the roster can be driven
//! by the SQLite store or by any other implementation.

mod connection;
mod musicians;
mod people;
mod settings;
mod store;
mod users;

pub use connection::{ensure_schema, open_in_memory};
pub use musicians::{
    create_musician, delete_all_musicians, delete_musician, fetch_musicians, update_musician,
};
pub use people::{create_person, delete_all_people, delete_person, fetch_people, update_person};
pub use settings::{
    clear_session, get_setting, is_seeded, load_images, load_session, load_sort_option,
    mark_seeded, save_images, save_session, save_sort_option, set_setting,
};
pub use store::SqliteStore;
pub use users::{create_user, email_registered, fetch_user_by_username, StoredUser};

use anyhow::Result;

use crate::models::Record;
use crate::sort::SortOption;

/// Fetch/save/delete access to one collection.
pub trait RecordStore<R: Record> {
    fn fetch_all(&self) -> Result<Vec<R>>;

    /// Persist a new record and return it with its assigned id.
    fn insert(&mut self, record: &R) -> Result<R>;

    /// Overwrite the stored record that has the same id.
    fn update(&mut self, record: &R) -> Result<()>;

    fn delete(&mut self, id: i64) -> Result<()>;

    /// Remove every record, returning how many were removed.
    fn delete_all(&mut self) -> Result<usize>;

    fn load_sort_option(&self) -> Result<Option<SortOption>>;

    fn save_sort_option(&mut self, option: SortOption) -> Result<()>;
}
