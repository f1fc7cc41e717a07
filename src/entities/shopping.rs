//! Shopping list entity type

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use crate::core::identity::{RecordId, RecordKind};
use crate::core::record::Record;
use crate::core::slot::SlotStorage;
use crate::core::store::CollectionStore;

/// One line on the shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    /// Unique identifier
    pub id: RecordId,

    pub name: String,

    /// Already bought / crossed off
    #[serde(default)]
    pub is_checked: bool,
}

impl ShoppingItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(RecordKind::Shopping),
            name: name.into(),
            is_checked: false,
        }
    }
}

impl Record for ShoppingItem {
    const KIND: RecordKind = RecordKind::Shopping;

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
        Cow::Borrowed(&self.name)
    }
}

impl<S: SlotStorage> CollectionStore<ShoppingItem, S> {
    pub fn toggle_checked(&mut self, id: &RecordId) -> bool {
        self.modify(id, |item| item.is_checked = !item.is_checked)
    }

    pub fn set_checked(&mut self, id: &RecordId, checked: bool) -> bool {
        self.modify(id, |item| item.is_checked = checked)
    }

    /// Positions of crossed-off items
    pub fn checked_positions(&self) -> Vec<usize> {
        self.records()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_checked)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Drop every crossed-off item
    pub fn clear_checked(&mut self) -> usize {
        let positions = self.checked_positions();
        self.remove_at(&positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::slot::MemorySlots;

    #[test]
    fn test_shopping_serializes_is_checked() {
        let item = ShoppingItem::new("needles");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"isChecked\":false"));
    }

    #[test]
    fn test_shopping_roundtrip_through_slot() {
        let mut store = CollectionStore::open(MemorySlots::new());
        let first = store.add(ShoppingItem::new("thread"));
        store.add(ShoppingItem::new("thread"));
        store.toggle_checked(&first);

        let reopened: CollectionStore<ShoppingItem, _> =
            CollectionStore::open(store.into_storage());
        assert_eq!(reopened.len(), 2);
        assert!(reopened.records()[0].is_checked);
        assert!(!reopened.records()[1].is_checked);
        assert_ne!(reopened.records()[0].id, reopened.records()[1].id);
    }

    #[test]
    fn test_clear_checked() {
        let mut store = CollectionStore::open(MemorySlots::new());
        let a = store.add(ShoppingItem::new("a"));
        store.add(ShoppingItem::new("b"));
        let c = store.add(ShoppingItem::new("c"));
        store.set_checked(&a, true);
        store.set_checked(&c, true);

        assert_eq!(store.checked_positions(), vec![0, 2]);
        assert_eq!(store.clear_checked(), 2);
        assert_eq!(store.records()[0].name, "b");
    }
}
