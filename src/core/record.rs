//! Record trait - common interface for all stash record types

use serde::{de::DeserializeOwned, Serialize};
use std::borrow::Cow;

use crate::core::identity::{RecordId, RecordKind};

/// Common trait for the five record collections
///
/// Equality and lookup are always by [`RecordId`], never by field values.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// The collection this record belongs to (selects id prefix and slot)
    const KIND: RecordKind;

    /// Get the record's unique ID
    fn id(&self) -> &RecordId;

    /// Replace the record's ID
    ///
    /// Used by the store so an edited copy always keeps the identity of the
    /// record it replaces.
    fn set_id(&mut self, id: RecordId);

    /// Short display title
    fn title(&self) -> &str;

    /// Text matched by list searches
    fn search_text(&self) -> Cow<'_, str>;

    /// Records present before anything is read from storage
    fn baseline() -> Vec<Self> {
        Vec::new()
    }

    /// Combine the baseline with whatever was read from the slot
    ///
    /// The default lets a decoded saved list replace the baseline entirely.
    fn reconcile(baseline: Vec<Self>, saved: Option<Vec<Self>>) -> Vec<Self> {
        saved.unwrap_or(baseline)
    }
}
