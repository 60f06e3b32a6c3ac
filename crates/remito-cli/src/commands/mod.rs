//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a [`CommandContext`]. Handlers
//! build their output with a pure `render` function so it can be tested
//! without capturing stdout.

use camino::Utf8PathBuf;
use remito_config::ConfigLoader;
use remito_core::error::{RemitoError, RemitoResult};
use remito_core::types::ConfigMapping;
use tracing::{debug, info};

pub mod remote;
pub mod resolve;
pub mod show;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub config_dir: Utf8PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// Without an explicit directory, the nearest `config/` above the
    /// current directory is used, then the user's `remito` config directory.
    pub fn new(config_dir: Option<Utf8PathBuf>) -> RemitoResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| RemitoError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| RemitoError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Current directory is not valid UTF-8: {}", e),
        })?;

        let config_dir = config_dir.unwrap_or_else(|| default_config_dir(&cwd));
        debug!("using config directory {} (cwd: {})", config_dir, cwd);

        Ok(Self {
            config_dir,
            output: OutputHandler::new(),
        })
    }

    /// Load and merge the configuration files
    pub async fn load_config(&self) -> ConfigMapping {
        let (config, sources) = ConfigLoader::new(self.config_dir.clone())
            .load_with_sources()
            .await;

        if sources.is_empty() {
            self.output.warn(&format!(
                "No defaults.ini or custom.ini found in {}",
                self.config_dir
            ));
        }
        for source in &sources {
            info!("read {}", source.path());
        }

        config
    }
}

/// Pick the config directory when none was given
fn default_config_dir(cwd: &camino::Utf8Path) -> Utf8PathBuf {
    let discovered = ConfigLoader::resolve_config_dir(cwd);
    if discovered.exists() {
        return discovered;
    }

    dirs::config_dir()
        .and_then(|dir| Utf8PathBuf::try_from(dir.join("remito")).ok())
        .filter(|dir| dir.exists())
        .unwrap_or(discovered)
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> RemitoResult<()> {
    match command {
        Commands::Show { section, format } => {
            info!("Showing configuration (section: {:?})", section);
            show::execute(section, format, ctx).await
        }
        Commands::Resolve { codsoc, kind, explain } => {
            info!("Resolving template locally (codsoc: {:?}, type: {:?})", codsoc, kind);
            resolve::execute(codsoc, kind, explain, ctx).await
        }
        Commands::Report { server } => {
            info!("Fetching report table from {}", server.url);
            remote::report(server, ctx).await
        }
        Commands::Template { server, codsoc, kind } => {
            info!("Resolving template on {} (codsoc: {:?}, type: {:?})", server.url, codsoc, kind);
            remote::template(server, codsoc, kind, ctx).await
        }
        Commands::Version => show_version(ctx),
    }
}

fn show_version(ctx: &CommandContext) -> RemitoResult<()> {
    ctx.output.data(&format!("remito v{}", env!("CARGO_PKG_VERSION")));
    ctx.output.info(&format!("Built: {}", env!("REMITO_BUILD_DATE")));
    ctx.output.info(&format!("Target: {}", env!("REMITO_TARGET")));
    ctx.output.info(&format!("Rust: {}", env!("REMITO_RUSTC_VERSION")));
    Ok(())
}
