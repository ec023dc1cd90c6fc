//! The list behind each collection screen: the records in their current sort
//! order, the active search, and the store they are persisted through.
//!
//! Mutations go to the store first and only touch the in-memory list once the
//! store has accepted them, so a failed write never leaves the two out of
//! sync. Every index handed out or accepted here is a position in the sorted
//! list, which is what a caller needs to scroll to an entry.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::db::RecordStore;
use crate::editor::Commit;
use crate::models::Record;
use crate::search::{self, SearchQuery};
use crate::sort::{sort_in_place, SortOption};

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("This {0} already exists in the database")]
    Duplicate(&'static str),
    #[error("{0} cannot be performed while searching")]
    SearchActive(&'static str),
    #[error("There is no {noun} at index {position}")]
    OutOfRange { noun: &'static str, position: usize },
    #[error("{0} has not been saved yet")]
    Unsaved(&'static str),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct Roster<R: Record, S: RecordStore<R>> {
    store: S,
    records: Vec<R>,
    sort: SortOption,
    query: SearchQuery,
}

impl<R: Record, S: RecordStore<R>> Roster<R, S> {
    /// Wrap `store` without loading anything yet.
    pub fn new(store: S) -> Self {
        Self {
            store,
            records: Vec::new(),
            sort: SortOption::default(),
            query: SearchQuery::default(),
        }
    }

    /// Fetch every record and apply the stored sort option.
    pub fn load(&mut self) -> Result<(), RosterError> {
        self.records = self.store.fetch_all()?;
        self.sort = self.store.load_sort_option()?.unwrap_or_default();
        self.resort();
        debug!(
            collection = R::KIND.key(),
            count = self.records.len(),
            sort = %self.sort,
            "roster loaded"
        );
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sort_option(&self) -> SortOption {
        self.sort
    }

    /// Every record in sort order, ignoring any active search.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// What a list view shows: the sorted records, narrowed by the active
    /// search if there is one.
    pub fn visible(&self) -> Vec<&R> {
        search::filter(&self.records, &self.query)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&R> {
        self.records.get(position)
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn is_searching(&self) -> bool {
        self.query.is_active()
    }

    pub fn search(&mut self, text: &str) {
        self.query = SearchQuery::parse(text);
    }

    pub fn clear_search(&mut self) {
        self.query = SearchQuery::default();
    }

    /// Re-sort and remember the option. Picking the active option again is a
    /// no-op.
    pub fn set_sort(&mut self, option: SortOption) -> Result<(), RosterError> {
        if option == self.sort {
            return Ok(());
        }
        self.store.save_sort_option(option)?;
        self.sort = option;
        self.resort();
        debug!(collection = R::KIND.key(), sort = %option, "roster re-sorted");
        Ok(())
    }

    /// Persist a new record. Returns its position in the sorted list.
    pub fn add(&mut self, record: R) -> Result<usize, RosterError> {
        if self.records.iter().any(|existing| existing.same_entry(&record)) {
            warn!(collection = R::KIND.key(), name = record.name(), "duplicate entry refused");
            return Err(RosterError::Duplicate(R::KIND.singular()));
        }
        let saved = self.store.insert(&record)?;
        let id = saved.id().ok_or(RosterError::Unsaved(R::KIND.noun()))?;
        info!(collection = R::KIND.key(), id, name = saved.name(), "entry added");
        self.records.push(saved);
        self.resort();
        self.position_of(id)
            .ok_or(RosterError::Unsaved(R::KIND.noun()))
    }

    /// Overwrite `original` with `updated`. Returns the new position of the
    /// entry in the sorted list.
    pub fn replace(&mut self, original: &R, mut updated: R) -> Result<usize, RosterError> {
        self.refuse_while_searching("Editing")?;
        let id = original.id().ok_or(RosterError::Unsaved(R::KIND.noun()))?;
        let position = self
            .position_of(id)
            .ok_or(RosterError::Unsaved(R::KIND.noun()))?;
        let clashes = self
            .records
            .iter()
            .any(|existing| existing.id() != Some(id) && existing.same_entry(&updated));
        if clashes {
            warn!(collection = R::KIND.key(), id, name = updated.name(), "duplicate edit refused");
            return Err(RosterError::Duplicate(R::KIND.singular()));
        }

        updated.set_id(Some(id));
        self.store.update(&updated)?;
        info!(collection = R::KIND.key(), id, name = updated.name(), "entry updated");
        self.records[position] = updated;
        self.resort();
        self.position_of(id)
            .ok_or(RosterError::Unsaved(R::KIND.noun()))
    }

    /// Delete the record at `position` and hand it back.
    pub fn remove(&mut self, position: usize) -> Result<R, RosterError> {
        self.refuse_while_searching("Deletion")?;
        let record = self.records.get(position).ok_or(RosterError::OutOfRange {
            noun: R::KIND.singular(),
            position,
        })?;
        let id = record.id().ok_or(RosterError::Unsaved(R::KIND.noun()))?;

        self.store.delete(id)?;
        let removed = self.records.remove(position);
        info!(collection = R::KIND.key(), id, name = removed.name(), "entry deleted");
        Ok(removed)
    }

    /// Delete every record. Returns how many were removed.
    pub fn remove_all(&mut self) -> Result<usize, RosterError> {
        self.refuse_while_searching("Deletion")?;
        let removed = self.store.delete_all()?;
        self.records.clear();
        info!(collection = R::KIND.key(), removed, "all entries deleted");
        Ok(removed)
    }

    /// Persist the outcome of an editing session.
    pub fn apply(&mut self, commit: Commit<R>) -> Result<usize, RosterError> {
        match commit {
            Commit::Create(record) => self.add(record),
            Commit::Replace { original, updated } => self.replace(&original, updated),
        }
    }

    fn refuse_while_searching(&self, action: &'static str) -> Result<(), RosterError> {
        if self.query.is_active() {
            warn!(collection = R::KIND.key(), action, "refused while searching");
            return Err(RosterError::SearchActive(action));
        }
        Ok(())
    }

    fn resort(&mut self) {
        sort_in_place(&mut self.records, self.sort);
    }

    fn position_of(&self, id: i64) -> Option<usize> {
        self.records.iter().position(|record| record.id() == Some(id))
    }
}
