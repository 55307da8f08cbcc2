//! Top-level subcommand implementations.
pub mod apply;
pub mod completions;
pub mod version;
