//! HTML page assembly.
//!
//! Wraps compiled pages in the shared layout: header with logo, nav title
//! and GitHub link, sidebar navigation, breadcrumbs, and an "On this page"
//! table of contents. Templates are embedded at compile time and rendered
//! with auto-escaping; only the compiled body is inserted verbatim.

use std::fmt::{Display, Write};

use fd_config::SiteConfig;
use fd_renderer::escape_html;
use minijinja::{AutoEscape, Environment, Output, State, Value, context, escape_formatter};
use serde::Serialize;

use crate::error::TemplateError;
use crate::home::{floating_dots, icon_columns};
use crate::navigation::NavItem;
use crate::site::RenderedPage;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("docs.html", include_str!("../templates/docs.html")),
    ("page.html", include_str!("../templates/page.html")),
    ("not_found.html", include_str!("../templates/not_found.html")),
    ("compile_error.html", include_str!("../templates/compile_error.html")),
    ("home.html", include_str!("../templates/home.html")),
];

/// URL of a docs-relative path under `base_url`.
///
/// ```
/// use fd_site::docs_href;
///
/// assert_eq!(docs_href("/docs", ""), "/docs");
/// assert_eq!(docs_href("/docs/", "git/branching"), "/docs/git/branching");
/// assert_eq!(docs_href("", ""), "/");
/// ```
#[must_use]
pub fn docs_href(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    match (base.is_empty(), path.is_empty()) {
        (true, true) => "/".to_owned(),
        (_, true) => base.to_owned(),
        _ => format!("{base}/{path}"),
    }
}

/// Auto-escape strings like the compiler does, leaving `/` readable in URLs.
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if matches!(state.auto_escape(), AutoEscape::Html)
        && !value.is_safe()
        && let Some(s) = value.as_str()
    {
        out.write_str(&escape_html(s))?;
        return Ok(());
    }
    escape_formatter(out, state, value)
}

/// Renders full HTML documents around compiled content.
pub struct PageAssembler {
    env: Environment<'static>,
    site: SiteConfig,
    navigation: Vec<NavItem>,
}

impl PageAssembler {
    /// Create an assembler for a site mounted at `base_url`.
    ///
    /// `navigation` is rendered in the sidebar of every docs page.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if an embedded template fails to parse.
    pub fn new(
        site: SiteConfig,
        base_url: &str,
        navigation: Vec<NavItem>,
    ) -> Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_formatter(html_formatter);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|source| TemplateError { name, source })?;
        }

        let base_url = base_url.to_owned();
        env.add_function("docs_href", move |path: String| docs_href(&base_url, &path));

        Ok(Self {
            env,
            site,
            navigation,
        })
    }

    /// Site identity used by the layout.
    #[must_use]
    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Full document for a compiled page.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails.
    pub fn assemble(&self, page: &RenderedPage) -> Result<String, TemplateError> {
        self.render(
            "page.html",
            context! {
                site => &self.site,
                navigation => &self.navigation,
                current_path => &page.path,
                page => page,
            },
        )
    }

    /// Not-found page for `requested_path`, in the shared layout.
    ///
    /// An empty `requested_path` renders a generic message, as used for a
    /// static `404.html`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails.
    pub fn not_found(&self, requested_path: &str) -> Result<String, TemplateError> {
        self.render(
            "not_found.html",
            context! {
                site => &self.site,
                navigation => &self.navigation,
                current_path => (),
                requested_path => requested_path,
            },
        )
    }

    /// Error page for a page whose source failed to compile.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails.
    pub fn compile_error(&self, path: &str, error: &impl Display) -> Result<String, TemplateError> {
        self.render(
            "compile_error.html",
            context! {
                site => &self.site,
                navigation => &self.navigation,
                current_path => path,
                page_path => path,
                error => error.to_string(),
            },
        )
    }

    /// Landing page.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if rendering fails.
    pub fn home(&self) -> Result<String, TemplateError> {
        self.render(
            "home.html",
            context! {
                site => &self.site,
                icon_columns => icon_columns(),
                floating_dots => floating_dots(),
            },
        )
    }

    fn render<S: Serialize>(&self, name: &'static str, ctx: S) -> Result<String, TemplateError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|source| TemplateError { name, source })
    }
}

impl std::fmt::Debug for PageAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageAssembler")
            .field("site", &self.site)
            .field("navigation", &self.navigation.len())
            .finish_non_exhaustive()
    }
}
