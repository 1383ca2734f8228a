//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use fd_config::SiteConfig;
use fd_site::{PageAssembler, Site, SiteOptions, TemplateError};
use fd_storage::Storage;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Resolves and compiles pages.
    pub(crate) site: Site,
    /// Wraps compiled pages in the site layout.
    pub(crate) assembler: PageAssembler,
    /// URL prefix the docs are mounted under.
    pub(crate) base_url: String,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}

impl AppState {
    /// Scan `storage` and prepare the site and its templates.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if an embedded template fails to parse.
    pub(crate) fn new(
        storage: Arc<dyn Storage>,
        options: SiteOptions,
        site_config: SiteConfig,
        version: String,
    ) -> Result<Self, TemplateError> {
        let base_url = options.base_url.clone();
        let site = Site::load(storage, options);
        let assembler = PageAssembler::new(site_config, &base_url, site.navigation())?;
        Ok(Self {
            site,
            assembler,
            base_url,
            version,
        })
    }
}
