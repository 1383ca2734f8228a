//! `fd serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use fd_config::{CliSettings, Config};
use fd_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover foundation.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "FD_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "FD_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "FD_PORT")]
    port: Option<u16>,

    /// Enable verbose output (request and compile timing logs).
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable the compile cache (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable the compile cache.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cache_enabled = self.resolve_cache_enabled();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            cache_enabled,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.heading(&format!("Foundation Docs v{version}"));
        output.info(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Source directory: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Docs URL: {}", config.docs_resolved.base_url));
        if config.docs_resolved.cache_enabled {
            output.info("Compile cache: enabled");
        } else {
            output.info("Compile cache: disabled");
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config).await?;

        Ok(())
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}
