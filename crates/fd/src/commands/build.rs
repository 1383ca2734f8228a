//! `fd build` command implementation.
//!
//! Exports the site as static HTML:
//!
//! ```text
//! out/
//! ├── index.html              landing page
//! ├── 404.html
//! └── docs/
//!     ├── index.html          docs root page
//!     └── git/basics/index.html
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use fd_config::{CliSettings, Config};
use fd_site::{PageAssembler, Site};

use super::{PageFailure, content_paths, display_path, open_site, report_failures};
use crate::error::CliError;
use crate::output::Output;

/// Default output directory.
const DEFAULT_OUT_DIR: &str = "out";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover foundation.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "FD_SOURCE_DIR")]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site.
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,
}

/// Outcome of a static export.
#[derive(Debug, Default)]
pub(crate) struct BuildReport {
    /// Pages written.
    pub(crate) written: usize,
    /// Pages that failed to compile.
    pub(crate) failures: Vec<PageFailure>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", self.out_dir.display()));

        let site = open_site(&config);
        let base_url = &config.docs_resolved.base_url;
        let assembler = PageAssembler::new(config.site.clone(), base_url, site.navigation())?;

        let report = export_site(&site, &assembler, base_url, &self.out_dir)?;
        let total = report.written + report.failures.len();

        if report.failures.is_empty() {
            output.success(&format!(
                "Built {total} pages to {}",
                self.out_dir.display()
            ));
            return Ok(());
        }

        report_failures(&output, &report.failures);
        Err(CliError::PagesFailed {
            failed: report.failures.len(),
            total,
        })
    }
}

/// Write every page of `site` below `out_dir`.
///
/// A page that fails to compile is recorded and skipped; the remaining
/// pages are still written.
pub(crate) fn export_site(
    site: &Site,
    assembler: &PageAssembler,
    base_url: &str,
    out_dir: &Path,
) -> Result<BuildReport, CliError> {
    let base = base_url.trim_matches('/');
    let docs_dir = out_dir.join(base);
    let mut report = BuildReport::default();

    // A root-mounted site has its docs root page at the top level instead
    if !base.is_empty() {
        write_file(&out_dir.join("index.html"), &assembler.home()?)?;
    }
    write_file(&out_dir.join("404.html"), &assembler.not_found("")?)?;

    for path in content_paths(site) {
        match site.render_path(&path) {
            Ok(page) => {
                let html = assembler.assemble(&page)?;
                write_file(&docs_dir.join(&path).join("index.html"), &html)?;
                tracing::debug!(path = %display_path(&path), "Wrote page");
                report.written += 1;
            }
            Err(e) => {
                tracing::warn!(path = %display_path(&path), error = %e, "Skipping page");
                report.failures.push(PageFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    let write = || {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    };
    write().map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
