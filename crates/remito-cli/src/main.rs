//! # remito-cli
//!
//! Command line front end for remito.
//!
//! Loads the site's merged configuration, resolves report templates locally
//! or against a remito server, and prints the results. Sets up logging and
//! error reporting before dispatching to the command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use remito_core::error::{RemitoError, RemitoResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Inspect merged site configuration and resolve report templates
#[derive(Parser)]
#[command(name = "remito", version, about = "Site configuration and report template resolution")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding defaults.ini and custom.ini
    #[arg(long, global = true, env = "REMITO_CONFIG_DIR", value_name = "DIR")]
    pub config_dir: Option<Utf8PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Output format for `remito show`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    Json,
    Ini,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the merged configuration
    Show {
        /// Only print this section
        #[arg(long)]
        section: Option<String>,
        #[arg(long, value_enum, default_value_t = ShowFormat::Json)]
        format: ShowFormat,
    },
    /// Resolve a report template from the local configuration
    Resolve {
        /// Company/site identifier
        #[arg(long)]
        codsoc: Option<String>,
        /// Document type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
        /// Show every key tried
        #[arg(long)]
        explain: bool,
    },
    /// Fetch the report template table from a server
    Report {
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Resolve a report template on a server
    Template {
        #[command(flatten)]
        server: ServerArgs,
        /// Company/site identifier
        #[arg(long)]
        codsoc: Option<String>,
        /// Document type
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<String>,
    },
    /// Show version information
    Version,
}

/// Connection options shared by the remote commands
#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    /// Server root URL
    #[arg(long, env = "REMITO_SERVER_URL")]
    pub url: String,
    /// Bearer token
    #[arg(long, env = "REMITO_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.log_json);
    setup_panic_handler();

    info!("Starting remito v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_cli(cli) {
        error!(error = %e, "command failed");
        eprintln!("{}", ErrorFormatter::new().format_error(&e));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> RemitoResult<()> {
    // Single-threaded runtime; no command spawns concurrent work
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| RemitoError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(cli.config_dir)?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

fn setup_logging(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "remito={level},remito_core={level},remito_config={level},remito_client={level}"
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("remito encountered an unexpected error: {}", panic_info);
        eprintln!("remito crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/remito-tools/remito/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
