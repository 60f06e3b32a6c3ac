//! `remito resolve` command implementation.

use remito_core::error::{RemitoError, RemitoResult};
use remito_core::report::{resolve_template, ReportTemplateTable, REPORT_SECTION, TEMPLATE_PREFIX};

use super::CommandContext;

/// Execute the `remito resolve` command against the local configuration
pub async fn execute(
    codsoc: Option<String>,
    kind: Option<String>,
    explain: bool,
    ctx: &CommandContext,
) -> RemitoResult<()> {
    let config = ctx.load_config().await;
    let table = ReportTemplateTable::from_config(&config);

    if explain {
        for line in explain_lines(&table, codsoc.as_deref(), kind.as_deref()) {
            ctx.output.info(&line);
        }
    }

    let template = render(&table, codsoc.as_deref(), kind.as_deref())?;
    ctx.output.data(&template);
    Ok(())
}

/// Resolve a template, failing when the hierarchy yields nothing usable
pub fn render(table: &ReportTemplateTable, codsoc: Option<&str>, kind: Option<&str>) -> RemitoResult<String> {
    match resolve_template(table, codsoc, kind) {
        Some(template) if !template.is_empty() => Ok(template.to_string()),
        _ => Err(RemitoError::ConfigValidation {
            field: format!("{}.{}", REPORT_SECTION, TEMPLATE_PREFIX),
            reason: "no report template configured for this company and type".to_string(),
        }),
    }
}

/// One line per candidate key, most specific first
pub fn explain_lines(table: &ReportTemplateTable, codsoc: Option<&str>, kind: Option<&str>) -> Vec<String> {
    ReportTemplateTable::candidate_keys(codsoc, kind)
        .into_iter()
        .map(|key| match table.get(&key) {
            Some(template) if !template.is_empty() => format!("{} = {}", key, template),
            Some(_) => format!("{} (empty)", key),
            None => format!("{} (missing)", key),
        })
        .collect()
}
