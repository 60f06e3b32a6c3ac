//! Core data types for remito configuration.
//!
//! This module provides the configuration model shared by the loader, the
//! merger and the resolver:
//! - `ConfigValue`, a scalar or a named section of key/value pairs
//! - `ConfigMapping`, the top-level map from name to value

pub mod mapping;
pub mod value;

// Re-export all public types
pub use mapping::ConfigMapping;
pub use value::{ConfigValue, Section};
