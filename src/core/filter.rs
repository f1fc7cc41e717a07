//! Read-only search projections over a record list
//!
//! A [`View`] never owns records. It remembers where each match sits in the
//! source list so deletes and edits made through it translate back to the
//! right identifiers.

use crate::core::identity::RecordId;
use crate::core::record::Record;

/// An ordered, filtered projection of a record slice
#[derive(Debug, Clone)]
pub struct View<'a, T> {
    entries: Vec<(usize, &'a T)>,
}

impl<'a, T: Record> View<'a, T> {
    /// View of every record, in order
    pub fn all(records: &'a [T]) -> Self {
        Self {
            entries: records.iter().enumerate().collect(),
        }
    }

    /// Number of visible records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visible records, in source order
    pub fn records(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.entries.iter().map(|(_, r)| *r)
    }

    /// Visible records paired with their position in this view
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a T)> + '_ {
        self.entries.iter().enumerate().map(|(pos, (_, r))| (pos, *r))
    }

    /// Record at a view position
    pub fn get(&self, pos: usize) -> Option<&'a T> {
        self.entries.get(pos).map(|(_, r)| *r)
    }

    /// Identifier of the record at a view position
    pub fn id_at(&self, pos: usize) -> Option<&'a RecordId> {
        self.get(pos).map(Record::id)
    }

    /// Identifiers for a batch of view positions (out-of-range positions skipped)
    pub fn ids_at(&self, positions: &[usize]) -> Vec<RecordId> {
        positions
            .iter()
            .filter_map(|&pos| self.id_at(pos).cloned())
            .collect()
    }

    /// Position in the unfiltered source list of a view position
    pub fn source_position(&self, pos: usize) -> Option<usize> {
        self.entries.get(pos).map(|(src, _)| *src)
    }

    /// Keep only the first `limit` visible records
    pub fn truncate(&mut self, limit: usize) {
        self.entries.truncate(limit);
    }

    /// Further narrow the view with a predicate
    pub fn retain(mut self, mut keep: impl FnMut(&T) -> bool) -> Self {
        self.entries.retain(|(_, r)| keep(r));
        self
    }
}

/// Case-insensitive substring search over [`Record::search_text`]
///
/// An empty query is the identity: every record, unchanged order.
pub fn filter<'a, T: Record>(records: &'a [T], query: &str) -> View<'a, T> {
    if query.is_empty() {
        return View::all(records);
    }

    let needle = query.to_lowercase();
    View {
        entries: records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.search_text().to_lowercase().contains(&needle))
            .collect(),
    }
}
