//! HTTP client for the remito report configuration API
//!
//! This crate fetches the report template table and single template
//! resolutions from a remito server, caching the table in an injectable
//! [`ReportCache`] and degrading to the `ZREMITOAI` fallback when the
//! server cannot be reached.

pub mod api;
pub mod cache;
pub mod client;

// Re-export main types
pub use api::{ReportResponse, ReportTemplateResponse};
pub use cache::ReportCache;
pub use client::{ClientConfig, ReportClient};

use remito_core::error::RemitoError;

/// Result type for client operations
pub type ClientResult<T> = Result<T, RemitoError>;
