//! Content compiler for Foundation Docs.
//!
//! Turns the markdown body of a document into an HTML fragment plus a flat
//! table of contents. Compilation is a pure function of its inputs and
//! either succeeds completely or fails with a [`CompileError`].
//!
//! # Example
//!
//! ```
//! use fd_renderer::compile;
//!
//! let compiled = compile("# Branching\n\n## Create a branch\n\nRun `git switch -c`.", "git")
//!     .unwrap();
//! assert_eq!(compiled.title.as_deref(), Some("Branching"));
//! assert_eq!(compiled.toc[0].id, "create-a-branch");
//! ```
//!
//! Components come from a fixed [`Registry`]; anything else is an error:
//!
//! ```
//! use fd_renderer::{CompileError, compile};
//!
//! let err = compile(":::youtube\n:::", "").unwrap_err();
//! assert!(matches!(err, CompileError::UnknownComponent { .. }));
//! ```

mod directive;
mod error;
mod fence;
mod html;
mod renderer;
mod state;

pub use directive::{ComponentKind, DirectiveArgs, Registry};
pub use error::CompileError;
pub use state::{TocEntry, escape_html, slugify};

use directive::DirectiveProcessor;
use html::LinkResolver;
use renderer::MarkdownRenderer;

/// Default URL prefix the documentation is mounted under.
pub const DEFAULT_LINK_PREFIX: &str = "/docs";

/// Output of a successful compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledContent {
    /// Rendered HTML body (without the title heading).
    pub html: String,
    /// Text of the first H1, if the body has one.
    pub title: Option<String>,
    /// Headings from level 2 down, in document order.
    pub toc: Vec<TocEntry>,
    /// Non-fatal issues, such as unknown component attributes.
    pub warnings: Vec<String>,
}

/// Markdown compiler configured with the site's link prefix.
#[derive(Clone, Debug)]
pub struct Compiler {
    link_prefix: String,
    registry: &'static Registry,
}

impl Compiler {
    /// Create a compiler that links under [`DEFAULT_LINK_PREFIX`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            link_prefix: DEFAULT_LINK_PREFIX.to_owned(),
            registry: Registry::builtin(),
        }
    }

    /// Set the URL prefix relative markdown links are rewritten under.
    #[must_use]
    pub fn with_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = prefix.into();
        self
    }

    /// The component registry markup is validated against.
    #[must_use]
    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// Compile a markdown body.
    ///
    /// `source_path` is the docs-relative URL path of the directory that
    /// relative links in the body are resolved against (`""` for the root).
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] for unterminated code blocks and for unknown,
    /// misplaced, unbalanced, or misconfigured components.
    pub fn compile(&self, body: &str, source_path: &str) -> Result<CompiledContent, CompileError> {
        let links = LinkResolver::new(&self.link_prefix, source_path);

        let mut processor = DirectiveProcessor::new(self.registry, &links);
        let expanded = processor.process(body)?;

        let result = MarkdownRenderer::new()
            .with_title_extraction()
            .with_links(&links)
            .render_markdown(&expanded);

        let mut html = result.html;
        let warnings = processor.finish(&mut html);

        Ok(CompiledContent {
            html,
            title: result.title,
            toc: result.toc,
            warnings,
        })
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile `body` with the default [`Compiler`].
///
/// # Errors
///
/// See [`Compiler::compile`].
pub fn compile(body: &str, source_path: &str) -> Result<CompiledContent, CompileError> {
    Compiler::new().compile(body, source_path)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(Compiler: Send, Sync);
    static_assertions::assert_impl_all!(CompiledContent: Send, Sync);

    #[test]
    fn test_compile_is_deterministic() {
        let body = "# Git\n\n## Branch\n\n:::tabs\n:::tab[macOS]\nbrew\n:::\n:::tab[Linux]\napt\n:::\n:::\n\n## Branch";
        let first = compile(body, "git").unwrap();
        let second = compile(body, "git").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compile_title_and_toc() {
        let compiled = compile("# Node.js\n\n## Install\n\n### With nvm\n\n## Usage", "").unwrap();
        assert_eq!(compiled.title.as_deref(), Some("Node.js"));
        let toc: Vec<_> = compiled
            .toc
            .iter()
            .map(|e| (e.level, e.id.as_str()))
            .collect();
        assert_eq!(toc, [(2, "install"), (3, "with-nvm"), (2, "usage")]);
        assert!(!compiled.html.contains("<h1"));
    }

    #[test]
    fn test_compile_without_headings() {
        let compiled = compile("Just text.", "").unwrap();
        assert_eq!(compiled.title, None);
        assert!(compiled.toc.is_empty());
        assert_eq!(compiled.html, "<p>Just text.</p>");
    }

    #[test]
    fn test_compile_callout_wraps_markdown() {
        let compiled = compile(
            ":::callout[Heads up]{type=\"warn\"}\nDon't `git push --force`.\n:::",
            "",
        )
        .unwrap();
        assert!(
            compiled
                .html
                .contains(r#"<div class="callout callout-warn" role="note">"#)
        );
        assert!(compiled.html.contains("Heads up</div>"));
        assert!(
            compiled
                .html
                .contains("<p>Don&#x27;t <code>git push --force</code>.</p>")
        );
    }

    #[test]
    fn test_compile_cards_resolve_links() {
        let body = ":::cards\n::card{title=\"Branching\" href=\"./branching.md\" description=\"Work in parallel\"}\n:::";
        let compiled = compile(body, "git").unwrap();
        assert!(compiled.html.contains(r#"href="/docs/git/branching""#));
        assert!(
            compiled
                .html
                .contains(r#"<span class="card-description">Work in parallel</span>"#)
        );
    }

    #[test]
    fn test_compile_tabs_builds_tab_list() {
        let body = ":::tabs\n:::tab[npm]\n```bash\nnpm i\n```\n:::\n:::tab[pnpm]\n```bash\npnpm add\n```\n:::\n:::";
        let compiled = compile(body, "").unwrap();

        assert!(compiled.html.contains(r#"<div class="tab-list" role="tablist">"#));
        assert!(compiled.html.contains(
            r#"<button type="button" role="tab" id="tabs-0-tab-0" aria-controls="tabs-0-panel-0" aria-selected="true">npm</button>"#
        ));
        assert!(compiled.html.contains(r#"aria-selected="false">pnpm</button>"#));
        assert!(compiled.html.contains(r#"id="tabs-0-panel-1" aria-labelledby="tabs-0-tab-1" hidden>"#));
        assert!(!compiled.html.contains("fd-tablist"));
    }

    #[test]
    fn test_compile_steps() {
        let compiled = compile(":::steps\n### Install\n\n### Configure\n:::", "").unwrap();
        assert!(compiled.html.contains(r#"<div class="steps">"#));
        assert_eq!(compiled.toc.len(), 2);
    }

    #[test]
    fn test_compile_fails_without_partial_output() {
        let err = compile("# Title\n\n```js\nconst x = 1;\n", "").unwrap_err();
        assert_eq!(err, CompileError::UnterminatedCodeBlock { line: 3 });
    }

    #[test]
    fn test_compile_fails_for_unknown_component() {
        let err = compile("Text\n\n::video{src=a.mp4}", "").unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownComponent {
                name: "video".to_owned(),
                line: 3,
            }
        );
    }

    #[test]
    fn test_compile_component_syntax_in_code_is_literal() {
        let compiled = compile("```md\n:::callout\n```", "").unwrap();
        assert!(compiled.html.contains(":::callout"));
        assert!(!compiled.html.contains("callout-info"));
    }

    #[test]
    fn test_compile_colon_prefixed_prose() {
        let compiled = compile("# CSS\n\n::before and ::after insert generated content.\n", "").unwrap();
        assert_eq!(compiled.title.as_deref(), Some("CSS"));
        assert!(
            compiled
                .html
                .contains("<p>::before and ::after insert generated content.</p>")
        );
    }

    #[test]
    fn test_compile_indented_code_is_literal() {
        let compiled = compile("Directive syntax:\n\n    :::callout\n    text\n    :::\n\n    :::\n", "").unwrap();
        assert!(compiled.html.contains("<pre><code>:::callout\ntext\n:::\n\n:::\n</code></pre>"));

        let compiled = compile("To open a fence type:\n\n    ```\n\nand close it the same way.\n", "").unwrap();
        assert!(compiled.html.contains("<pre><code>```\n</code></pre>"));
        assert!(compiled.html.contains("<p>and close it the same way.</p>"));
    }

    #[test]
    fn test_compile_fails_for_unterminated_fence_in_blockquote() {
        let err = compile("> ```js\n> let x = 1;\n", "").unwrap_err();
        assert_eq!(err, CompileError::UnterminatedCodeBlock { line: 1 });
    }

    #[test]
    fn test_compile_callout_nested_in_list() {
        let compiled = compile("- Step one\n\n  :::callout{type=tip}\n  Careful.\n  :::\n- Step two\n", "").unwrap();
        assert_eq!(compiled.html.matches("<ul>").count(), 1);
        let callout = compiled.html.find("callout-tip").unwrap();
        let first_item_end = compiled.html.find("</li>").unwrap();
        assert!(callout < first_item_end);
        assert!(compiled.html.contains("Step two"));
    }

    #[test]
    fn test_custom_link_prefix() {
        let compiled = Compiler::new()
            .with_link_prefix("/handbook/")
            .compile("[Intro](../index.md)", "git")
            .unwrap();
        assert_eq!(compiled.html, r#"<p><a href="/handbook">Intro</a></p>"#);
    }

    #[test]
    fn test_warnings_reported() {
        let compiled = compile(":::steps{numbered}\n:::", "").unwrap();
        assert_eq!(
            compiled.warnings,
            ["line 1: unknown attribute 'numbered' on 'steps' ignored"]
        );
    }
}
