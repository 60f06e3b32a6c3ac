//! Unit tests for CLI commands.

use super::*;
use crate::{ServerArgs, ShowFormat};
use camino::Utf8Path;
use remito_core::report::ReportTemplateTable;
use remito_core::types::ConfigValue;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a config directory with the given defaults and customizations
fn create_config_dir(defaults: Option<&str>, custom: Option<&str>) -> (TempDir, Utf8PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    if let Some(content) = defaults {
        std::fs::write(dir.join("defaults.ini"), content).unwrap();
    }
    if let Some(content) = custom {
        std::fs::write(dir.join("custom.ini"), content).unwrap();
    }
    (temp_dir, dir)
}

fn create_test_context(config_dir: &Utf8Path) -> CommandContext {
    CommandContext {
        config_dir: config_dir.to_path_buf(),
        output: crate::output::OutputHandler::new(),
    }
}

fn create_test_config() -> ConfigMapping {
    [
        ("env", ConfigValue::scalar("prod")),
        ("db", ConfigValue::section([("host", "localhost")])),
        (
            "report",
            ConfigValue::section([("remito", "T1"), ("remito.ACME", "T2"), ("remito.ACME.FACTURA", "")]),
        ),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_load_config_merges_files() {
    let (_temp_dir, dir) = create_config_dir(
        Some("[report]\nremito=ZREMITOAI\n"),
        Some("[report]\nremito.ACME=ZACME\n"),
    );
    let ctx = create_test_context(&dir);

    let config = ctx.load_config().await;
    let table = ReportTemplateTable::from_config(&config);
    assert_eq!(table.resolve(Some("ACME"), Some("FACTURA")), Some("ZACME"));
    assert_eq!(table.resolve(Some("OTHER"), None), Some("ZREMITOAI"));
}

#[tokio::test]
async fn test_load_config_without_files() {
    let (_temp_dir, dir) = create_config_dir(None, None);
    let ctx = create_test_context(&dir);

    assert!(ctx.load_config().await.is_empty());
}

#[test]
fn test_show_render_json() {
    let config = create_test_config();

    let rendered = show::render(&config, None, ShowFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(json["env"], "prod");
    assert_eq!(json["db"]["host"], "localhost");
}

#[test]
fn test_show_render_single_section() {
    let config = create_test_config();

    let rendered = show::render(&config, Some("db"), ShowFormat::Json).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(json, serde_json::json!({ "host": "localhost" }));

    let rendered = show::render(&config, Some("db"), ShowFormat::Ini).unwrap();
    assert_eq!(rendered, "[db]\nhost=localhost\n");
}

#[test]
fn test_show_render_missing_section() {
    let config = create_test_config();

    let result = show::render(&config, Some("mail"), ShowFormat::Json);
    assert!(matches!(result, Err(RemitoError::ConfigValidation { .. })));
}

#[test]
fn test_resolve_render() {
    let table = ReportTemplateTable::from_config(&create_test_config());

    assert_eq!(resolve::render(&table, Some("ACME"), Some("FACTURA")).unwrap(), "T2");
    assert_eq!(resolve::render(&table, None, None).unwrap(), "T1");
}

#[test]
fn test_resolve_render_without_templates() {
    let table = ReportTemplateTable::new();

    let result = resolve::render(&table, Some("ACME"), None);
    assert!(matches!(result, Err(RemitoError::ConfigValidation { .. })));
}

#[test]
fn test_explain_lines() {
    let table = ReportTemplateTable::from_config(&create_test_config());

    let lines = resolve::explain_lines(&table, Some("ACME"), Some("FACTURA"));
    assert_eq!(
        lines,
        vec![
            "remito.ACME.FACTURA (empty)".to_string(),
            "remito.ACME = T2".to_string(),
            "remito = T1".to_string(),
        ]
    );

    let lines = resolve::explain_lines(&table, Some("OTHER"), None);
    assert_eq!(lines[0], "remito.OTHER (missing)");
}

#[tokio::test]
async fn test_remote_report_command() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config/report"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "report": { "remito": "T1" } })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (_temp_dir, dir) = create_config_dir(None, None);
    let ctx = create_test_context(&dir);
    let server = ServerArgs {
        url: mock_server.uri(),
        token: None,
        timeout: 5,
    };

    assert!(remote::report(server, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_remote_template_command_degrades() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config/report-template"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let (_temp_dir, dir) = create_config_dir(None, None);
    let ctx = create_test_context(&dir);
    let server = ServerArgs {
        url: mock_server.uri(),
        token: None,
        timeout: 5,
    };

    let result = remote::template(server, Some("ACME".to_string()), None, &ctx).await;
    assert!(result.is_ok());
}

#[test]
fn test_build_client_rejects_bad_url() {
    let server = ServerArgs {
        url: "::not a url::".to_string(),
        token: None,
        timeout: 5,
    };

    assert!(matches!(
        remote::build_client(&server),
        Err(RemitoError::ConfigValidation { .. })
    ));
}

#[test]
fn test_default_config_dir_prefers_discovered() {
    let (_temp_dir, root) = create_config_dir(None, None);
    std::fs::create_dir_all(root.join("config")).unwrap();
    std::fs::write(root.join("config").join("custom.ini"), "env=prod\n").unwrap();

    assert_eq!(default_config_dir(&root), root.join("config"));
}
