//! S.A.B.L.E: a needlework stash keeper
//!
//! Tracks five independent record collections (thread, fabric, kits,
//! patterns and a shopping list), each kept as an ordered list in memory and
//! persisted to its own slot on disk. The thread collection is seeded from
//! the DMC catalog and merges saved edits back onto the seed on every load.

pub mod cli;
pub mod core;
pub mod entities;
