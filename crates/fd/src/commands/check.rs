//! `fd check` command implementation.

use std::path::PathBuf;

use clap::Args;
use fd_config::{CliSettings, Config};
use fd_site::Site;

use super::{PageFailure, content_paths, display_path, open_site, report_failures};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover foundation.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long, env = "FD_SOURCE_DIR")]
    source_dir: Option<PathBuf>,
}

/// Outcome of compiling every page.
#[derive(Debug, Default)]
pub(crate) struct CheckReport {
    pub(crate) pages: usize,
    pub(crate) failures: Vec<PageFailure>,
    /// `(path, warning)` pairs.
    pub(crate) warnings: Vec<(String, String)>,
}

impl CheckArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let site = open_site(&config);
        let report = check_site(&site);

        for (path, warning) in &report.warnings {
            output.warning(&format!("  {}: {warning}", display_path(path)));
        }

        if report.failures.is_empty() {
            output.success(&format!("All {} pages compiled", report.pages));
            return Ok(());
        }

        report_failures(&output, &report.failures);
        Err(CliError::PagesFailed {
            failed: report.failures.len(),
            total: report.pages,
        })
    }
}

/// Compile every page of `site`, collecting failures and warnings.
pub(crate) fn check_site(site: &Site) -> CheckReport {
    let mut report = CheckReport::default();

    for path in content_paths(site) {
        report.pages += 1;
        match site.render_path(&path) {
            Ok(page) => {
                report
                    .warnings
                    .extend(page.warnings.into_iter().map(|w| (path.clone(), w)));
            }
            Err(e) => report.failures.push(PageFailure {
                path,
                error: e.to_string(),
            }),
        }
    }

    report
}
