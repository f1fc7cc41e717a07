//! Record types for the five stash collections

pub mod fabric;
pub mod kit;
pub mod pattern;
pub mod shopping;
pub mod thread;

pub use fabric::Fabric;
pub use kit::Kit;
pub use pattern::Pattern;
pub use shopping::ShoppingItem;
pub use thread::Thread;
