//! HTTP server for Foundation Docs.
//!
//! Serves the documentation site with axum:
//! - `/` landing page
//! - `{base_url}` and `{base_url}/{*path}` documentation pages (HTML)
//! - `/api/navigation` and `/api/pages/{*path}` JSON endpoints
//!
//! Every response carries security headers and is gzip-compressed when the
//! client accepts it.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::PathBuf;
//! use fd_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_owned(),
//!         port: 7979,
//!         source_dir: PathBuf::from("content/docs"),
//!         version: "0.1.0".to_owned(),
//!         ..ServerConfig::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (fd-server)
//!                        │
//!                        ├─► HTML routes ──► Site (resolve + compile)
//!                        │                     └─► PageAssembler (layout)
//!                        │
//!                        └─► API routes ──► Site ──► JSON
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use fd_config::SiteConfig;
use fd_site::SiteOptions;
use fd_storage::Storage;
use fd_storage_fs::FsStorage;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub source_dir: PathBuf,
    /// Keep compiled pages in memory.
    pub cache_enabled: bool,
    /// URL prefix of the documentation pages.
    pub base_url: String,
    /// Site identity for the page layout.
    pub site: SiteConfig,
    /// Application version (for `ETag` computation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("content/docs"),
            cache_enabled: true,
            base_url: "/docs".to_owned(),
            site: SiteConfig::default(),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the templates fail to load or the listener cannot
/// be bound.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.source_dir.clone()));
    let options = SiteOptions {
        base_url: config.base_url.clone(),
        cache_enabled: config.cache_enabled,
    };
    let state = Arc::new(AppState::new(
        storage,
        options,
        config.site,
        config.version,
    )?);

    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let address = listener.local_addr()?;
    tracing::info!(address = %address, base_url = %config.base_url, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded configuration file.
///
/// # Arguments
///
/// * `config` - Loaded configuration
/// * `version` - Application version
#[must_use]
pub fn server_config_from_config(config: &fd_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        cache_enabled: config.docs_resolved.cache_enabled,
        base_url: config.docs_resolved.base_url.clone(),
        site: config.site.clone(),
        version,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(ServerError: Send, Sync, std::error::Error);

    #[test]
    fn test_server_config_from_config() {
        let config = fd_config::Config::default();
        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.host, config.server.host);
        assert_eq!(server.port, config.server.port);
        assert_eq!(server.source_dir, config.docs_resolved.source_dir);
        assert_eq!(server.base_url, "/docs");
        assert_eq!(server.version, "1.2.3");
        assert!(server.cache_enabled);
    }
}
