//! `remito show` command implementation.
//!
//! Prints the merged configuration, or one entry of it, as JSON or INI.

use remito_config::serialize_ini;
use remito_core::error::{RemitoError, RemitoResult};
use remito_core::types::ConfigMapping;

use super::CommandContext;
use crate::ShowFormat;

/// Execute the `remito show` command
pub async fn execute(section: Option<String>, format: ShowFormat, ctx: &CommandContext) -> RemitoResult<()> {
    let config = ctx.load_config().await;
    let rendered = render(&config, section.as_deref(), format)?;
    ctx.output.data(rendered.trim_end());
    Ok(())
}

/// Render the configuration, or only `section` of it
pub fn render(config: &ConfigMapping, section: Option<&str>, format: ShowFormat) -> RemitoResult<String> {
    let selected: ConfigMapping = match section {
        Some(name) => {
            let value = config.get(name).ok_or_else(|| RemitoError::ConfigValidation {
                field: name.to_string(),
                reason: "no such entry in the merged configuration".to_string(),
            })?;
            std::iter::once((name, value.clone())).collect()
        }
        None => config.clone(),
    };

    match format {
        ShowFormat::Ini => Ok(serialize_ini(&selected)),
        ShowFormat::Json => {
            let json = match section {
                Some(name) => serde_json::to_string_pretty(&selected.get(name)),
                None => serde_json::to_string_pretty(&selected),
            };
            json.map_err(|e| RemitoError::ConfigValidation {
                field: section.unwrap_or("config").to_string(),
                reason: format!("cannot render as JSON: {}", e),
            })
        }
    }
}
