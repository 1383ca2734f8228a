//! CLI error types.

use std::path::PathBuf;

use fd_config::ConfigError;
use fd_server::ServerError;
use fd_site::TemplateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Server(#[from] ServerError),

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{failed} of {total} pages failed to compile")]
    PagesFailed { failed: usize, total: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_failed_display() {
        let err = CliError::PagesFailed {
            failed: 2,
            total: 10,
        };
        assert_eq!(err.to_string(), "2 of 10 pages failed to compile");
    }
}
