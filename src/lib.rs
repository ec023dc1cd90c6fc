//! Core library surface for the roster keeper.
//!
//! The `roster` binary is a thin wrapper around [`cli::run`]; everything it
//! does goes through the modules below so the same pieces can be driven from
//! tests or other front ends.
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod editor;
pub mod fields;
pub mod models;
pub mod picker;
pub mod roster;
pub mod search;
pub mod seed;
pub mod sort;
pub mod validate;

/// Persistence layer entry points.
pub use db::{ensure_schema, RecordStore, SqliteStore};

/// The two record kinds and the trait that abstracts over them.
pub use models::{Musician, Person, Record, RecordKind, User};

pub use auth::{AuthError, Credentials, Registration};

/// Building blocks of an editing session.
pub use editor::{Commit, EditMode, Editor};
pub use picker::{Picker, SelectionSignal};
pub use validate::{validate, ValidationError};

pub use roster::{Roster, RosterError};
pub use sort::SortOption;
