//! Site: request path to compiled page.
//!
//! [`Site`] ties the navigation tree, the storage backend and the compiler
//! together. Rendering a page is:
//!
//! 1. Resolve the URL segments against the [`NavigationTree`]
//! 2. Load the source and split its front matter
//! 3. Compile the body (or reuse a cached compile for the same mtime)
//!
//! A failure in any step affects only the page being rendered.
//!
//! # Thread Safety
//!
//! `Site` is `Send + Sync`. The tree is immutable and shared through an
//! `Arc`; the compile cache uses an internal `RwLock`.

use std::sync::Arc;
use std::time::Instant;

use fd_config::DocsConfig;
use fd_renderer::{Compiler, DEFAULT_LINK_PREFIX, TocEntry};
use fd_storage::Storage;
use serde::Serialize;

use crate::cache::{CompileCache, CompiledPage};
use crate::document::ContentDocument;
use crate::PageError;
use crate::navigation::{BreadcrumbItem, NavItem, NavigationTree, split_path};

/// Options for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteOptions {
    /// URL prefix the docs are mounted under; relative links are rewritten
    /// beneath it.
    pub base_url: String,
    /// Keep compiled pages in memory until their source changes.
    pub cache_enabled: bool,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LINK_PREFIX.to_owned(),
            cache_enabled: true,
        }
    }
}

impl From<&DocsConfig> for SiteOptions {
    fn from(config: &DocsConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            cache_enabled: config.cache_enabled,
        }
    }
}

/// A compiled page ready for assembly.
#[derive(Clone, Debug, Serialize)]
pub struct RenderedPage {
    /// Docs-relative URL path.
    pub path: String,
    /// Title (front matter > first H1 > navigation title).
    pub title: String,
    /// Description (front matter > navigation description).
    pub description: Option<String>,
    /// Compiled body.
    pub html: String,
    /// Headings from level 2 down.
    pub toc: Vec<TocEntry>,
    /// Non-fatal compiler warnings.
    pub warnings: Vec<String>,
    /// Ancestor trail, starting at the docs root.
    pub breadcrumbs: Vec<BreadcrumbItem>,
    /// Source modification time (Unix timestamp).
    pub source_mtime: f64,
    /// Whether the compile was served from the cache.
    pub from_cache: bool,
}

/// Documentation site.
pub struct Site {
    storage: Arc<dyn Storage>,
    tree: Arc<NavigationTree>,
    compiler: Compiler,
    cache: Option<CompileCache>,
}

impl Site {
    /// Create a site over an already built navigation tree.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, tree: Arc<NavigationTree>, options: SiteOptions) -> Self {
        Self {
            storage,
            tree,
            compiler: Compiler::new().with_link_prefix(options.base_url),
            cache: options.cache_enabled.then(CompileCache::new),
        }
    }

    /// Scan storage once, build the navigation tree and create the site.
    ///
    /// A failed scan is logged and yields an empty site.
    #[must_use]
    pub fn load(storage: Arc<dyn Storage>, options: SiteOptions) -> Self {
        let start = Instant::now();
        let documents = storage.scan().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to scan storage");
            Vec::new()
        });
        let tree = NavigationTree::build(&documents);
        tracing::info!(
            pages = tree.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Built navigation tree"
        );
        Self::new(storage, Arc::new(tree), options)
    }

    /// The navigation tree.
    #[must_use]
    pub fn tree(&self) -> &Arc<NavigationTree> {
        &self.tree
    }

    /// Sidebar navigation items.
    #[must_use]
    pub fn navigation(&self) -> Vec<NavItem> {
        self.tree.navigation()
    }

    /// Render the page addressed by a request path such as `"git/branching"`.
    ///
    /// # Errors
    ///
    /// See [`Site::render`].
    pub fn render_path(&self, path: &str) -> Result<RenderedPage, PageError> {
        self.render(&split_path(path))
    }

    /// Render the page addressed by URL segments.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] if no page with content matches,
    /// [`PageError::Compilation`] or [`PageError::FrontMatter`] if the source
    /// is malformed, and [`PageError::Storage`] if it cannot be read.
    pub fn render<S: AsRef<str>>(&self, segments: &[S]) -> Result<RenderedPage, PageError> {
        let page = self.tree.resolve(segments).ok_or_else(|| {
            let requested: Vec<&str> = segments
                .iter()
                .map(AsRef::as_ref)
                .filter(|s| !s.is_empty())
                .collect();
            PageError::NotFound(requested.join("/"))
        })?;

        let (compiled, source_mtime, from_cache) = self.compiled_page(&page.path)?;

        let title = compiled
            .title
            .clone()
            .or_else(|| compiled.content.title.clone())
            .unwrap_or_else(|| page.title.clone());
        let description = compiled
            .description
            .clone()
            .or_else(|| page.description.clone());

        Ok(RenderedPage {
            path: page.path.clone(),
            title,
            description,
            html: compiled.content.html.clone(),
            toc: compiled.content.toc.clone(),
            warnings: compiled.content.warnings.clone(),
            breadcrumbs: self.tree.breadcrumbs(&page.path),
            source_mtime,
            from_cache,
        })
    }

    /// Compile a loaded document.
    ///
    /// Relative links resolve against the page's directory in the tree.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Compilation`] if the body is malformed.
    pub fn compile(&self, document: &ContentDocument) -> Result<CompiledPage, PageError> {
        let path = document.path();
        let content = self
            .compiler
            .compile(document.body(), self.tree.link_base(path))
            .map_err(|source| PageError::Compilation {
                path: path.to_owned(),
                source,
            })?;

        for warning in &content.warnings {
            tracing::warn!(path = %path, "{warning}");
        }

        let metadata = document.metadata();
        Ok(CompiledPage {
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            content,
        })
    }

    /// Drop the cached compile for `path`.
    pub fn invalidate(&self, path: &str) {
        if let Some(cache) = &self.cache {
            cache.invalidate(path);
            tracing::debug!(path = %path, "Invalidated compiled page");
        }
    }

    /// Compiled page for `path`, from the cache when the source is unchanged.
    fn compiled_page(&self, path: &str) -> Result<(Arc<CompiledPage>, f64, bool), PageError> {
        if let Some(cache) = &self.cache {
            let mtime = self
                .storage
                .mtime(path)
                .map_err(|e| PageError::from_storage(path, e))?;
            if let Some(hit) = cache.get(path, mtime) {
                tracing::debug!(path = %path, "Compile cache hit");
                return Ok((hit, mtime, true));
            }
        }

        let start = Instant::now();
        let document = ContentDocument::load(self.storage.as_ref(), path)?;
        let compiled = self.compile(&document).inspect_err(|e| {
            tracing::warn!(path = %path, error = %e, "Failed to compile page");
        })?;
        tracing::debug!(
            path = %path,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Compiled page"
        );

        let compiled = Arc::new(compiled);
        if let Some(cache) = &self.cache {
            cache.insert(path, document.mtime(), Arc::clone(&compiled));
        }
        Ok((compiled, document.mtime(), false))
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("tree", &self.tree)
            .field("compiler", &self.compiler)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
