//! `remito report` and `remito template` command implementations.
//!
//! Both talk to a remito server. Failures never abort the command: the
//! client degrades to the fallback template and logs a warning.

use std::sync::Arc;
use std::time::Duration;

use remito_client::{ClientConfig, ReportCache, ReportClient};
use remito_core::error::{RemitoError, RemitoResult};

use super::CommandContext;
use crate::ServerArgs;

/// Execute the `remito report` command
pub async fn report(server: ServerArgs, ctx: &CommandContext) -> RemitoResult<()> {
    let client = build_client(&server)?;
    let table = client.get_report().await;

    if !client.cache().is_populated() {
        ctx.output.warn("Server unavailable, showing fallback table");
    }

    let json = serde_json::to_string_pretty(&table).map_err(|e| RemitoError::ConfigValidation {
        field: "report".to_string(),
        reason: format!("cannot render as JSON: {}", e),
    })?;
    ctx.output.data(&json);
    Ok(())
}

/// Execute the `remito template` command
pub async fn template(
    server: ServerArgs,
    codsoc: Option<String>,
    kind: Option<String>,
    ctx: &CommandContext,
) -> RemitoResult<()> {
    let client = build_client(&server)?;
    let template = client
        .resolve_template_remote(codsoc.as_deref(), kind.as_deref())
        .await;
    ctx.output.data(&template);
    Ok(())
}

/// Build a client with a fresh cache from the command line options
pub fn build_client(server: &ServerArgs) -> RemitoResult<ReportClient> {
    let mut config = ClientConfig::new(&server.url)?.with_timeout(Duration::from_secs(server.timeout));
    if let Some(token) = &server.token {
        config = config.with_token(token.clone());
    }
    ReportClient::with_config(config, Arc::new(ReportCache::new()))
}
