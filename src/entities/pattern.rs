//! Pattern entity type

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;

/// A chart or pattern booklet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Unique identifier
    pub id: RecordId,

    pub name: String,

    pub designer: String,

    /// Where the pattern is kept (binder, shelf, PDF folder)
    pub location: String,

    #[serde(default)]
    pub details: String,
}

impl Pattern {
    pub fn new(
        name: impl Into<String>,
        designer: impl Into<String>,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(RecordKind::Pattern),
            name: name.into(),
            designer: designer.into(),
            location: location.into(),
            details: details.into(),
        }
    }
}

impl Record for Pattern {
    const KIND: RecordKind = RecordKind::Pattern;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn search_text(&self) -> Cow<'_, str> {
        Cow::Owned(format!("{} {}", self.name, self.designer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::filter;
    use crate::core::slot::MemorySlots;
    use crate::core::store::CollectionStore;

    #[test]
    fn test_pattern_roundtrip_through_slot() {
        let mut store = CollectionStore::open(MemorySlots::new());
        let patterns = vec![
            Pattern::new("Autumn Sampler", "Jane Doe", "Binder 2", ""),
            Pattern::new("Moth", "Stitch Studio", "PDF folder", "Needs 3 colors"),
        ];
        for pattern in &patterns {
            store.add(pattern.clone());
        }
        let saved = store.records().to_vec();

        let reopened: CollectionStore<Pattern, _> = CollectionStore::open(store.into_storage());
        assert_eq!(reopened.records(), saved.as_slice());
        assert_eq!(reopened.records()[1].details, patterns[1].details);
    }

    #[test]
    fn test_pattern_search_covers_designer() {
        let patterns = vec![
            Pattern::new("Autumn Sampler", "Jane Doe", "Binder 2", ""),
            Pattern::new("Moth", "Stitch Studio", "Shelf", ""),
        ];
        let view = filter(&patterns, "studio");
        assert_eq!(view.len(), 1);
        assert_eq!(view.get(0).unwrap().name, "Moth");
    }
}
