//! Collection store - the live, persisted list for one record collection
//!
//! A store is built once from its slot (UNLOADED -> LOADED) and then owns the
//! in-memory list. Every mutation saves the whole list back to the slot before
//! returning. A failed save is logged and leaves the store dirty; callers
//! surface it through [`CollectionStore::flush`] at their lifecycle points.

use std::collections::BTreeSet;

use crate::core::filter::{filter, View};
use crate::core::identity::RecordId;
use crate::core::record::Record;
use crate::core::slot::{Persistence, SlotStorage, StoreError};

/// The in-memory list of one record collection, backed by its slot
#[derive(Debug)]
pub struct CollectionStore<T, S> {
    records: Vec<T>,
    persistence: Persistence<S>,
    dirty: bool,
}

impl<T: Record, S: SlotStorage> CollectionStore<T, S> {
    /// Load the collection from its slot, reconciling with the baseline
    ///
    /// Never fails: a missing or undecodable slot falls back to the baseline.
    pub fn open(storage: S) -> Self {
        let persistence = Persistence::new(storage);
        let saved = persistence.load::<T>(T::KIND.slot());
        let records = T::reconcile(T::baseline(), saved);

        tracing::debug!(
            slot = T::KIND.slot(),
            count = records.len(),
            "opened collection"
        );

        Self {
            records,
            persistence,
            dirty: false,
        }
    }

    /// The live list, in display order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by identifier
    pub fn get(&self, id: &RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Position of a record by identifier
    pub fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Search projection over the live list
    pub fn filter(&self, query: &str) -> View<'_, T> {
        filter(&self.records, query)
    }

    /// Append a new record under a freshly generated identifier and persist
    ///
    /// The record is assumed well-formed; validation belongs to the caller.
    /// Whatever identifier it carried is replaced.
    pub fn add(&mut self, mut record: T) -> RecordId {
        let id = RecordId::new(T::KIND);
        record.set_id(id.clone());
        self.records.push(record);
        self.persist();
        id
    }

    /// Replace the record with the given identifier, keeping its position
    ///
    /// The replacement keeps `id` even if it carries another identifier.
    /// Returns `false` and leaves the list untouched when `id` is unknown.
    pub fn update(&mut self, id: &RecordId, mut record: T) -> bool {
        let Some(pos) = self.position(id) else {
            tracing::debug!(%id, "update of unknown record ignored");
            return false;
        };
        record.set_id(id.clone());
        self.records[pos] = record;
        self.persist();
        true
    }

    /// Edit a record in place (quick in-row changes like toggles and steppers)
    ///
    /// Returns `false` when `id` is unknown.
    pub fn modify<F>(&mut self, id: &RecordId, edit: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        let Some(pos) = self.position(id) else {
            tracing::debug!(%id, "modify of unknown record ignored");
            return false;
        };
        let record = &mut self.records[pos];
        edit(record);
        // Identity is fixed at creation.
        record.set_id(id.clone());
        self.persist();
        true
    }

    /// Remove the records at the given positions in one batch
    ///
    /// Out-of-range positions are ignored and duplicates count once.
    /// Returns how many records were removed.
    pub fn remove_at(&mut self, positions: &[usize]) -> usize {
        let doomed: BTreeSet<usize> = positions
            .iter()
            .copied()
            .filter(|&p| p < self.records.len())
            .collect();
        if doomed.is_empty() {
            return 0;
        }

        let mut index = 0;
        self.records.retain(|_| {
            let keep = !doomed.contains(&index);
            index += 1;
            keep
        });
        self.persist();
        doomed.len()
    }

    /// Remove records by identifier; unknown identifiers are ignored
    pub fn remove_ids(&mut self, ids: &[RecordId]) -> usize {
        let positions: Vec<usize> = ids.iter().filter_map(|id| self.position(id)).collect();
        self.remove_at(&positions)
    }

    /// Remove every record matching a predicate
    pub fn remove_where<F>(&mut self, mut doomed: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let positions: Vec<usize> = self
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| doomed(r))
            .map(|(pos, _)| pos)
            .collect();
        self.remove_at(&positions)
    }

    /// Save the current list, reporting any failure
    ///
    /// Saves are idempotent; calling this when nothing changed is harmless.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.persistence.save(T::KIND.slot(), &self.records)?;
        self.dirty = false;
        Ok(())
    }

    /// Whether the last automatic save failed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Access the underlying slot storage
    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    pub fn storage_mut(&mut self) -> &mut S {
        self.persistence.storage_mut()
    }

    /// Give up the store, returning its slot storage
    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }

    fn persist(&mut self) {
        match self.persistence.save(T::KIND.slot(), &self.records) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                tracing::warn!(slot = T::KIND.slot(), "save failed, keeping changes in memory: {e}");
                self.dirty = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::MemorySlots;
    use crate::entities::kit::Kit;
    use crate::entities::shopping::ShoppingItem;

    fn item(name: &str) -> ShoppingItem {
        ShoppingItem::new(name)
    }

    fn names(store: &CollectionStore<ShoppingItem, MemorySlots>) -> Vec<String> {
        store.records().iter().map(|i| i.name.clone()).collect()
    }

    fn store_with(items: &[&str]) -> CollectionStore<ShoppingItem, MemorySlots> {
        let mut store = CollectionStore::open(MemorySlots::new());
        for name in items {
            store.add(item(name));
        }
        store
    }

    #[test]
    fn test_open_empty_slot_is_empty() {
        let store: CollectionStore<Kit, _> = CollectionStore::open(MemorySlots::new());
        assert!(store.is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_open_corrupt_slot_is_empty() {
        let slots = MemorySlots::new().with_slot("kitData", b"\x00\xffgarbage".to_vec());
        let store: CollectionStore<Kit, _> = CollectionStore::open(slots);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_appends_and_persists() {
        let store = store_with(&["floss", "needles"]);
        assert_eq!(names(&store), vec!["floss", "needles"]);
        assert_eq!(store.storage().writes(), 2);

        let reopened: CollectionStore<ShoppingItem, _> =
            CollectionStore::open(store.into_storage());
        assert_eq!(
            reopened.records().iter().map(|i| i.name.as_str()).collect::<Vec<_>>(),
            vec!["floss", "needles"]
        );
    }

    #[test]
    fn test_add_assigns_a_fresh_id_each_time() {
        let mut store = CollectionStore::open(MemorySlots::new());
        let original = item("thread");
        let first = store.add(original.clone());
        let second = store.add(original.clone());

        assert_ne!(first, second);
        assert_ne!(first, original.id);
        assert_eq!(store.records()[0].id, first);
        assert_eq!(store.records()[1].id, second);

        assert!(store.modify(&second, |i| i.is_checked = true));
        assert!(!store.records()[0].is_checked);
        assert_eq!(store.remove_ids(&[first]), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_prior_content() {
        let mut store = store_with(&["A", "B"]);
        let before: Vec<RecordId> = store.records().iter().map(|r| r.id.clone()).collect();

        store.add(item("C"));
        assert_eq!(names(&store), vec!["A", "B", "C"]);

        assert_eq!(store.remove_at(&[2]), 1);
        assert_eq!(names(&store), vec!["A", "B"]);
        let after: Vec<RecordId> = store.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_batch_remove_positions() {
        let mut store = store_with(&["A", "B", "C", "D"]);
        assert_eq!(store.remove_at(&[1, 3]), 2);
        assert_eq!(names(&store), vec!["A", "C"]);
    }

    #[test]
    fn test_remove_ignores_out_of_range_and_duplicates() {
        let mut store = store_with(&["A", "B"]);
        let writes = store.storage().writes();

        assert_eq!(store.remove_at(&[9]), 0);
        assert_eq!(store.storage().writes(), writes);

        assert_eq!(store.remove_at(&[0, 0, 5]), 1);
        assert_eq!(names(&store), vec!["B"]);
    }

    #[test]
    fn test_remove_ids_uses_identity_not_names() {
        let mut store = store_with(&["thread", "thread", "hoop"]);
        let second = store.records()[1].id.clone();

        assert_eq!(store.remove_ids(&[second.clone()]), 1);
        assert_eq!(names(&store), vec!["thread", "hoop"]);
        assert!(store.get(&second).is_none());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = store_with(&["A", "B", "C"]);
        let id = store.records()[1].id.clone();

        let mut edited = store.get(&id).unwrap().clone();
        edited.name = "B2".to_string();
        assert!(store.update(&id, edited));

        assert_eq!(names(&store), vec!["A", "B2", "C"]);
        assert_eq!(store.records()[1].id, id);
    }

    #[test]
    fn test_update_keeps_identity_of_replaced_record() {
        let mut store = store_with(&["A"]);
        let id = store.records()[0].id.clone();

        assert!(store.update(&id, item("fresh")));
        assert_eq!(store.records()[0].id, id);
        assert_eq!(store.records()[0].name, "fresh");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = store_with(&["A", "B"]);
        let before = store.storage().get("shoppingListData").unwrap().to_vec();
        let writes = store.storage().writes();

        let stranger = item("ghost");
        let ghost_id = stranger.id.clone();
        assert!(!store.update(&ghost_id, stranger));

        assert_eq!(names(&store), vec!["A", "B"]);
        assert_eq!(store.storage().writes(), writes);
        assert_eq!(store.storage().get("shoppingListData").unwrap(), before.as_slice());
    }

    #[test]
    fn test_modify_toggles_field() {
        let mut store = store_with(&["A"]);
        let id = store.records()[0].id.clone();

        assert!(store.modify(&id, |i| i.is_checked = !i.is_checked));
        assert!(store.records()[0].is_checked);

        let unknown = item("x").id;
        assert!(!store.modify(&unknown, |i| i.is_checked = false));
        assert!(store.records()[0].is_checked);
    }

    #[test]
    fn test_remove_where() {
        let mut store = store_with(&["A", "B", "C"]);
        let id = store.records()[1].id.clone();
        store.modify(&id, |i| i.is_checked = true);

        assert_eq!(store.remove_where(|i| i.is_checked), 1);
        assert_eq!(names(&store), vec!["A", "C"]);
    }

    #[test]
    fn test_write_failure_marks_dirty_and_flush_reports() {
        let mut store = store_with(&["A"]);
        store.storage_mut().set_reject_writes(true);

        store.add(item("B"));
        assert!(store.is_dirty());
        assert_eq!(names(&store), vec!["A", "B"]);
        assert!(store.flush().is_err());

        store.storage_mut().set_reject_writes(false);
        store.flush().unwrap();
        assert!(!store.is_dirty());

        let reopened: CollectionStore<ShoppingItem, _> =
            CollectionStore::open(store.into_storage());
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_flush_is_idempotent() {
        let mut store = store_with(&["A", "B"]);
        store.flush().unwrap();
        let first = store.storage().get("shoppingListData").unwrap().to_vec();
        store.flush().unwrap();
        assert_eq!(store.storage().get("shoppingListData").unwrap(), first.as_slice());
    }

    #[test]
    fn test_delete_through_filtered_view() {
        let mut store = store_with(&["red floss", "hoop", "Red fabric", "needles"]);

        let ids = store.filter("red").ids_at(&[1]);
        assert_eq!(store.remove_ids(&ids), 1);

        assert_eq!(names(&store), vec!["red floss", "hoop", "needles"]);
    }
}
