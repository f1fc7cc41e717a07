//! Kit entity type

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;

/// A boxed project kit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kit {
    /// Unique identifier
    pub id: RecordId,

    /// Kit name
    pub name: String,

    /// Finished size (e.g. "8x10 inches")
    pub size: String,

    /// Estimated stitching time (e.g. "20 hours")
    pub estimated_time: String,

    /// Free-form notes
    #[serde(default)]
    pub details: String,
}

impl Kit {
    pub fn new(
        name: impl Into<String>,
        size: impl Into<String>,
        estimated_time: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(RecordKind::Kit),
            name: name.into(),
            size: size.into(),
            estimated_time: estimated_time.into(),
            details: details.into(),
        }
    }
}

impl Record for Kit {
    const KIND: RecordKind = RecordKind::Kit;

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
        Cow::Owned(format!("{} {}", self.name, self.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::MemorySlots;
    use crate::core::store::CollectionStore;

    #[test]
    fn test_kit_roundtrip_through_slot() {
        let mut store = CollectionStore::open(MemorySlots::new());
        let kits = vec![
            Kit::new("Winter Village", "11x14 inches", "60 hours", "Gift for Mom"),
            Kit::new("Bee Sampler", "5x7 inches", "10 hours", ""),
        ];
        for kit in &kits {
            store.add(kit.clone());
        }
        let saved = store.records().to_vec();

        let reopened: CollectionStore<Kit, _> = CollectionStore::open(store.into_storage());
        assert_eq!(reopened.records(), saved.as_slice());
        let names: Vec<&str> = reopened.records().iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, kits.iter().map(|k| k.name.as_str()).collect::<Vec<_>>());
    }

    #[test]
    fn test_kit_details_default_to_empty() {
        let id = RecordId::new(RecordKind::Kit);
        let json = format!(
            r#"{{"id":"{}","name":"Owl","size":"4x4","estimatedTime":"3 hours"}}"#,
            id
        );
        let kit: Kit = serde_json::from_str(&json).unwrap();
        assert_eq!(kit.details, "");
        assert_eq!(kit.estimated_time, "3 hours");
    }
}
