//! Navigation, page compilation and HTML assembly for Foundation Docs.
//!
//! This crate provides:
//! - [`NavigationTree`]: the documentation hierarchy, built once from a
//!   storage scan and resolving URL segments to pages
//! - [`Site`]: resolve, load, compile (with an optional [`CompileCache`])
//! - [`PageAssembler`]: full HTML documents around compiled pages, the
//!   not-found page and the landing page
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! use fd_config::SiteConfig;
//! use fd_site::{PageAssembler, Site, SiteOptions};
//! use fd_storage_fs::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("content/docs")));
//! let site = Site::load(storage, SiteOptions::default());
//! let assembler = PageAssembler::new(SiteConfig::default(), "/docs", site.navigation())?;
//!
//! let page = site.render(&["git", "branching"])?;
//! let html = assembler.assemble(&page)?;
//! # Ok(())
//! # }
//! ```

mod assembler;
mod cache;
mod document;
mod error;
mod home;
mod navigation;
mod site;

pub use assembler::{PageAssembler, docs_href};
pub use cache::{CompileCache, CompiledPage};
pub use document::ContentDocument;
pub use error::{PageError, TemplateError};
pub use navigation::{BreadcrumbItem, NavItem, NavigationTree, Page, split_path};
pub use site::{RenderedPage, Site, SiteOptions};

// Re-export TocEntry from fd-renderer for convenience
pub use fd_renderer::TocEntry;
