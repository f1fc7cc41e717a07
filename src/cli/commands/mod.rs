//! CLI command implementations

pub mod catalog;
pub mod completions;
pub mod config;
pub mod fabric;
pub mod init;
pub mod kit;
pub mod pattern;
pub mod shop;
pub mod status;
pub mod thread;
