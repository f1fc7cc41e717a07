//! Fabric entity type

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;

/// A piece of stitching fabric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fabric {
    /// Unique identifier
    pub id: RecordId,

    /// Mesh count (stitches per inch, e.g. 14, 18, 28)
    pub count: u32,

    /// Length in inches
    pub length: f64,

    /// Width in inches
    pub width: f64,

    /// Color description
    pub color: String,
}

impl Fabric {
    pub fn new(count: u32, length: f64, width: f64, color: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(RecordKind::Fabric),
            count,
            length,
            width,
            color: color.into(),
        }
    }

    /// Area in square inches
    pub fn area(&self) -> f64 {
        self.length * self.width
    }
}

impl Record for Fabric {
    const KIND: RecordKind = RecordKind::Fabric;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn title(&self) -> &str {
        &self.color
    }

    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::MemorySlots;
    use crate::core::store::CollectionStore;

    #[test]
    fn test_fabric_roundtrip_through_slot() {
        let mut store = CollectionStore::open(MemorySlots::new());
        let aida = Fabric::new(14, 18.0, 22.5, "Antique White");
        let linen = Fabric::new(28, 36.0, 27.0, "Natural");
        store.add(aida);
        store.add(linen);
        let saved = store.records().to_vec();

        let reopened: CollectionStore<Fabric, _> = CollectionStore::open(store.into_storage());
        assert_eq!(reopened.records(), saved.as_slice());
        assert_eq!(reopened.records()[0].color, "Antique White");
    }

    #[test]
    fn test_fabric_area() {
        let fabric = Fabric::new(16, 10.0, 12.5, "Blue");
        assert!((fabric.area() - 125.0).abs() < f64::EPSILON);
    }
}
