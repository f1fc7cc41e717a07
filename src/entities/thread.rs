//! Thread entity type
//!
//! The thread collection is seeded from the DMC catalog. Seeded records get
//! fresh identifiers on every load, so saved quantities and spoken-for flags
//! are matched back onto the seed by their composite color string.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::core::catalog::{self, CatalogEntry, CATALOG_BRAND};
use crate::core::identity::{RecordId, RecordKind};
use crate::core::merge::merge_by_key;
use crate::core::record::Record;
use crate::core::slot::SlotStorage;
use crate::core::store::CollectionStore;

/// A skein count of one floss color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    /// Unique identifier
    pub id: RecordId,

    /// Manufacturer (e.g. "DMC")
    pub brand: String,

    /// "{number} - {name}" for catalog threads, free text otherwise
    pub color: String,

    /// Skeins on hand
    pub quantity: u32,

    /// Reserved for a planned project
    #[serde(default)]
    pub spoken_for: bool,
}

impl Thread {
    pub fn new(
        brand: impl Into<String>,
        color: impl Into<String>,
        quantity: u32,
        spoken_for: bool,
    ) -> Self {
        Self {
            id: RecordId::new(RecordKind::Thread),
            brand: brand.into(),
            color: color.into(),
            quantity,
            spoken_for,
        }
    }

    /// A zero-stock record for a catalog entry
    pub fn from_catalog(entry: &CatalogEntry) -> Self {
        Self::new(CATALOG_BRAND, entry.composite(), 0, false)
    }

    /// The catalog name part of a composite color, if it has one
    pub fn color_name(&self) -> &str {
        self.color
            .split_once(" - ")
            .map_or(self.color.as_str(), |(_, name)| name)
    }
}

impl Record for Thread {
    const KIND: RecordKind = RecordKind::Thread;

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

    fn baseline() -> Vec<Self> {
        catalog::entries().iter().map(Thread::from_catalog).collect()
    }

    /// Copy saved quantity and spoken-for onto the matching seed record
    ///
    /// Saved threads whose color is not in the catalog are dropped.
    fn reconcile(baseline: Vec<Self>, saved: Option<Vec<Self>>) -> Vec<Self> {
        let Some(saved) = saved else {
            return baseline;
        };

        let (merged, stats) = merge_by_key(
            baseline,
            saved,
            |t| t.color.clone(),
            |seed, saved| {
                seed.quantity = saved.quantity;
                seed.spoken_for = saved.spoken_for;
            },
        );

        tracing::debug!(matched = stats.matched, "merged saved threads onto catalog");
        if stats.dropped > 0 {
            tracing::warn!(
                dropped = stats.dropped,
                "saved threads not in the catalog were discarded"
            );
        }
        merged
    }
}

impl<S: SlotStorage> CollectionStore<Thread, S> {
    /// Find a thread by its exact color string
    pub fn find_by_color(&self, color: &str) -> Option<&Thread> {
        self.records().iter().find(|t| t.color == color)
    }

    /// Step the quantity up or down, never below zero
    pub fn adjust_quantity(&mut self, id: &RecordId, delta: i64) -> bool {
        self.modify(id, |t| {
            let next = (i64::from(t.quantity) + delta).clamp(0, i64::from(u32::MAX));
            t.quantity = next as u32;
        })
    }

    pub fn set_quantity(&mut self, id: &RecordId, quantity: u32) -> bool {
        self.modify(id, |t| t.quantity = quantity)
    }

    pub fn set_spoken_for(&mut self, id: &RecordId, spoken_for: bool) -> bool {
        self.modify(id, |t| t.spoken_for = spoken_for)
    }

    pub fn toggle_spoken_for(&mut self, id: &RecordId) -> bool {
        self.modify(id, |t| t.spoken_for = !t.spoken_for)
    }

    /// Total skeins across every color
    pub fn total_skeins(&self) -> u64 {
        self.records().iter().map(|t| u64::from(t.quantity)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::MemorySlots;

    fn open(slots: MemorySlots) -> CollectionStore<Thread, MemorySlots> {
        CollectionStore::open(slots)
    }

    #[test]
    fn test_thread_serializes_camel_case() {
        let thread = Thread::new("DMC", "310 - Black", 3, true);
        let json = serde_json::to_string(&thread).unwrap();
        assert!(json.contains("\"spokenFor\":true"));
        assert!(json.contains("\"quantity\":3"));
    }

    #[test]
    fn test_fresh_load_is_seed_only() {
        let store = open(MemorySlots::new());
        let n = catalog::entries().len();

        assert_eq!(store.len(), n);
        for (thread, entry) in store.records().iter().zip(catalog::entries()) {
            assert_eq!(thread.brand, "DMC");
            assert_eq!(thread.color, entry.composite());
            assert_eq!(thread.quantity, 0);
            assert!(!thread.spoken_for);
        }
    }

    #[test]
    fn test_saved_edit_survives_reload() {
        let n = catalog::entries().len();
        let k = 5;
        let key = catalog::entries()[k].composite();

        let mut store = open(MemorySlots::new());
        let id = store.find_by_color(&key).unwrap().id.clone();
        assert!(store.set_quantity(&id, 7));

        let reloaded = open(store.into_storage());
        assert_eq!(reloaded.len(), n);

        for (i, (thread, entry)) in reloaded.records().iter().zip(catalog::entries()).enumerate() {
            assert_eq!(thread.color, entry.composite());
            assert_eq!(thread.brand, "DMC");
            assert!(!thread.spoken_for);
            if i == k {
                assert_eq!(thread.quantity, 7);
            } else {
                assert_eq!(thread.quantity, 0);
            }
        }
    }

    #[test]
    fn test_reload_matches_by_color_not_id() {
        let mut store = open(MemorySlots::new());
        let id = store.find_by_color("310 - Black").unwrap().id.clone();
        store.set_spoken_for(&id, true);

        let reloaded = open(store.into_storage());
        let black = reloaded.find_by_color("310 - Black").unwrap();
        assert!(black.spoken_for);
        assert_ne!(black.id, id);
    }

    #[test]
    fn test_non_catalog_thread_is_dropped_on_reload() {
        let mut store = open(MemorySlots::new());
        let n = store.len();
        store.add(Thread::new("Anchor", "403 - Black", 4, false));
        assert_eq!(store.len(), n + 1);

        let reloaded = open(store.into_storage());
        assert_eq!(reloaded.len(), n);
        assert!(reloaded.find_by_color("403 - Black").is_none());
    }

    #[test]
    fn test_catalog_row_edit_beats_added_duplicate_color() {
        let mut store = open(MemorySlots::new());
        let n = store.len();
        store.add(Thread::new("DMC", "310 - Black", 3, false));
        let seed = store.find_by_color("310 - Black").unwrap().id.clone();
        assert!(store.set_quantity(&seed, 9));

        let reloaded = open(store.into_storage());
        assert_eq!(reloaded.len(), n);
        assert_eq!(reloaded.find_by_color("310 - Black").unwrap().quantity, 9);
    }

    #[test]
    fn test_corrupt_slot_yields_seed_only() {
        let slots = MemorySlots::new().with_slot("threadData", b"[{\"oops\":".to_vec());
        let store = open(slots);
        assert_eq!(store.len(), catalog::entries().len());
        assert_eq!(store.total_skeins(), 0);
    }

    #[test]
    fn test_adjust_quantity_saturates_at_zero() {
        let mut store = open(MemorySlots::new());
        let id = store.records()[0].id.clone();

        assert!(store.adjust_quantity(&id, 3));
        assert_eq!(store.get(&id).unwrap().quantity, 3);
        assert!(store.adjust_quantity(&id, -10));
        assert_eq!(store.get(&id).unwrap().quantity, 0);
    }

    #[test]
    fn test_toggle_spoken_for() {
        let mut store = open(MemorySlots::new());
        let id = store.records()[1].id.clone();

        assert!(store.toggle_spoken_for(&id));
        assert!(store.get(&id).unwrap().spoken_for);
        assert!(store.toggle_spoken_for(&id));
        assert!(!store.get(&id).unwrap().spoken_for);
    }

    #[test]
    fn test_filter_on_store() {
        let store = open(MemorySlots::new());
        let view = store.filter("black");
        assert!(view.records().any(|t| t.color == "310 - Black"));
        assert!(view.records().all(|t| t.color.to_lowercase().contains("black")));
    }

    #[test]
    fn test_color_name() {
        assert_eq!(Thread::new("DMC", "321 - Red", 0, false).color_name(), "Red");
        assert_eq!(Thread::new("Anchor", "mystery", 0, false).color_name(), "mystery");
    }
}
