//! Configuration loading for remito
//!
//! This crate reads the site's `defaults.ini` and `custom.ini` files, merges
//! them section by section, and hands the merged `[db]` entry to an external
//! connection factory.

pub mod db;
pub mod ini;
pub mod merge;

// Re-export main types
pub use db::{open_connection, ConnectionFactory, DB_SECTION};
pub use ini::{parse_ini, serialize_ini};
pub use merge::{merge, ConfigLoader, ConfigSource};

use remito_core::error::RemitoError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, RemitoError>;
