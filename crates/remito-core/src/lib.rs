//! # remito-core
//!
//! Core types and logic shared across all remito crates.
//!
//! This crate provides:
//! - `ConfigValue` and `ConfigMapping`, the section-aware configuration model
//! - `ReportTemplateTable` and the `remito.<codsoc>.<type>` fallback resolver
//! - `RemitoError` for unified error handling
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Configuration data types
//! - `report`: Report template table and hierarchical resolution
//! - `error`: Error types and result aliases

pub mod error;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{BoxError, RemitoError, RemitoResult};
pub use report::{resolve_template, ReportTemplateTable, FALLBACK_TEMPLATE, REPORT_SECTION};
pub use types::{ConfigMapping, ConfigValue, Section};
