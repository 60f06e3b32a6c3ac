//! Report configuration API response types

use remito_core::report::ReportTemplateTable;
use serde::{Deserialize, Serialize};

/// Path of the full template table endpoint
pub const REPORT_PATH: &str = "/api/config/report";

/// Path of the single template resolution endpoint
pub const REPORT_TEMPLATE_PATH: &str = "/api/config/report-template";

/// Response of `GET /api/config/report`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportResponse {
    /// Flat `remito.*` template table
    pub report: ReportTemplateTable,
}

/// Response of `GET /api/config/report-template`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportTemplateResponse {
    /// Resolved template name, absent when the server resolved nothing
    pub template: Option<String>,
}
