//! HTTP client for the report configuration endpoints

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use remito_core::error::RemitoError;
use remito_core::report::{ReportTemplateTable, FALLBACK_TEMPLATE};

use crate::api::{ReportResponse, ReportTemplateResponse, REPORT_PATH, REPORT_TEMPLATE_PATH};
use crate::cache::ReportCache;
use crate::ClientResult;

/// Connection settings for a remito server
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server root, e.g. `https://erp.example.com`
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// User agent header
    pub user_agent: String,
}

impl ClientConfig {
    /// Settings for `base_url` with default timeout and no authentication
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url).map_err(|e| RemitoError::ConfigValidation {
            field: "base_url".to_string(),
            reason: format!("Invalid server URL '{}': {}", base_url, e),
        })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(30),
            token: None,
            user_agent: format!("remito/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the report template API
///
/// The template table is cached in the injected [`ReportCache`]; single
/// template resolutions always go to the server.
#[derive(Debug, Clone)]
pub struct ReportClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Server root
    base_url: Url,
    /// Shared table cache
    cache: Arc<ReportCache>,
}

impl ReportClient {
    /// Create a client for `base_url` with its own empty cache
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_config(ClientConfig::new(base_url)?, Arc::new(ReportCache::new()))
    }

    /// Create a client from explicit settings and a shared cache
    pub fn with_config(config: ClientConfig, cache: Arc<ReportCache>) -> ClientResult<Self> {
        let mut builder = ClientBuilder::new()
            // Connection pooling configuration
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent.as_str());

        if let Some(token) = &config.token {
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token)
                    .parse()
                    .map_err(|e| RemitoError::network(format!("Invalid auth token: {}", e), e))?,
            );
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|e| RemitoError::network(format!("Failed to create HTTP client: {}", e), e))?;

        Ok(Self {
            client,
            base_url: config.base_url,
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<ReportCache> {
        &self.cache
    }

    /// Get the report template table, cached after the first success
    ///
    /// On failure the cache is left empty and the fallback table
    /// `{ remito: ZREMITOAI }` is returned, so a later call retries.
    pub async fn get_report(&self) -> ReportTemplateTable {
        if let Some(table) = self.cache.get() {
            debug!(entries = table.len(), "report table served from cache");
            return table;
        }

        match self.fetch_report().await {
            Ok(table) => {
                debug!(entries = table.len(), "report table fetched");
                self.cache.store(table.clone());
                table
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch report table, using fallback");
                ReportTemplateTable::fallback()
            }
        }
    }

    /// Ask the server to resolve a template for `codsoc` and `kind`
    ///
    /// Does not use the cache. Any failure yields `ZREMITOAI`.
    pub async fn resolve_template_remote(&self, codsoc: Option<&str>, kind: Option<&str>) -> String {
        match self.fetch_template(codsoc, kind).await {
            Ok(template) => template,
            Err(e) => {
                warn!(error = %e, ?codsoc, ?kind, "failed to resolve report template, using fallback");
                FALLBACK_TEMPLATE.to_string()
            }
        }
    }

    async fn fetch_report(&self) -> ClientResult<ReportTemplateTable> {
        let response: ReportResponse = self.get_json(self.endpoint(REPORT_PATH)).await?;
        Ok(response.report)
    }

    async fn fetch_template(&self, codsoc: Option<&str>, kind: Option<&str>) -> ClientResult<String> {
        let url = self.template_url(codsoc, kind);
        let response: ReportTemplateResponse = self.get_json(url.clone()).await?;

        response.template.ok_or_else(|| RemitoError::Network {
            message: format!("No template in response from {}", url),
            source: None,
        })
    }

    /// Build an endpoint URL under the base path
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    /// Template resolution URL; empty or absent parameters are left out
    fn template_url(&self, codsoc: Option<&str>, kind: Option<&str>) -> Url {
        let mut url = self.endpoint(REPORT_TEMPLATE_PATH);
        let params: Vec<(&str, &str)> = [("codsoc", codsoc), ("type", kind)]
            .into_iter()
            .filter_map(|(name, value)| value.filter(|v| !v.is_empty()).map(|v| (name, v)))
            .collect();

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| RemitoError::network(format!("Failed to fetch {}: {}", url, e), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemitoError::Network {
                message: format!("Server returned status {} for {}", status, url),
                source: None,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemitoError::network(format!("Failed to parse response from {}: {}", url, e), e))
    }
}
