//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;
pub(crate) mod serve;

use std::sync::Arc;

use fd_config::Config;
use fd_site::{Site, SiteOptions};
use fd_storage::Storage;
use fd_storage_fs::FsStorage;

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;
pub(crate) use serve::ServeArgs;

use crate::output::Output;

/// A page whose source could not be compiled.
#[derive(Debug)]
pub(crate) struct PageFailure {
    pub(crate) path: String,
    pub(crate) error: String,
}

/// Scan the configured source directory into a site.
///
/// Batch commands compile every page exactly once, so the cache is off.
fn open_site(config: &Config) -> Site {
    let storage: Arc<dyn Storage> =
        Arc::new(FsStorage::new(config.docs_resolved.source_dir.clone()));
    let options = SiteOptions {
        cache_enabled: false,
        ..SiteOptions::from(&config.docs_resolved)
    };
    Site::load(storage, options)
}

/// Paths of every page with content, sorted.
fn content_paths(site: &Site) -> Vec<String> {
    let mut paths: Vec<String> = site
        .tree()
        .pages()
        .filter(|page| page.has_content)
        .map(|page| page.path.clone())
        .collect();
    paths.sort();
    paths
}

/// Display form of a docs-relative path.
fn display_path(path: &str) -> String {
    format!("/{path}")
}

fn report_failures(output: &Output, failures: &[PageFailure]) {
    for failure in failures {
        output.error(&format!("  {}: {}", display_path(&failure.path), failure.error));
    }
}
