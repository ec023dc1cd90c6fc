//! Name search over an in-memory list.

use crate::models::Record;

/// An active search term, or nothing. Whitespace-only input means "not
/// searching" so clearing the box and typing spaces behave the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery(Option<String>);

impl SearchQuery {
    pub fn parse(text: &str) -> Self {
        if text.trim().is_empty() {
            Self(None)
        } else {
            Self(Some(text.to_string()))
        }
    }

    pub fn is_active(&self) -> bool {
        self.0.is_some()
    }

    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Case-sensitive substring match on the record name. An inactive query
    /// matches everything.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match &self.0 {
            Some(text) => record.name().contains(text.as_str()),
            None => true,
        }
    }
}

/// Records matching `query`, in their original order.
pub fn filter<'a, R: Record>(records: &'a [R], query: &SearchQuery) -> Vec<&'a R> {
    records.iter().filter(|record| query.matches(*record)).collect()
}
