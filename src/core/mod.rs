//! Core module - identity, persistence and the collection store

pub mod catalog;
pub mod config;
pub mod filter;
pub mod identity;
pub mod merge;
pub mod record;
pub mod reference;
pub mod slot;
pub mod stash;
pub mod store;

pub use config::Config;
pub use filter::{filter, View};
pub use identity::{IdParseError, RecordId, RecordKind};
pub use record::Record;
pub use reference::{Reference, ReferenceError};
pub use slot::{FileSlots, MemorySlots, Persistence, SlotStorage, StoreError};
pub use stash::{Stash, StashError, StashOrigin};
pub use store::CollectionStore;
