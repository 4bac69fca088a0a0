//! Batch editing of local group policy registry settings.

/// Layered TOML configuration.
pub mod config;
/// Command grammar, value codec, batch application, and policy stores.
pub mod policy;
