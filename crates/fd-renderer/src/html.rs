//! HTML fragments shared by the renderer and the component registry.

use std::borrow::Cow;
use std::fmt::Write;

use pulldown_cmark::BlockQuoteKind;

use crate::state::escape_html;

// SVG icons (GitHub Octicons-style, 16x16)
pub(crate) const SVG_INFO: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 8a8 8 0 1 1 16 0A8 8 0 0 1 0 8Zm8-6.5a6.5 6.5 0 1 0 0 13 6.5 6.5 0 0 0 0-13ZM6.5 7.75A.75.75 0 0 1 7.25 7h1a.75.75 0 0 1 .75.75v2.75h.25a.75.75 0 0 1 0 1.5h-2a.75.75 0 0 1 0-1.5h.25v-2h-.25a.75.75 0 0 1-.75-.75ZM8 6a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;
pub(crate) const SVG_LIGHTBULB: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M8 1.5c-2.363 0-4 1.69-4 3.75 0 .984.424 1.625.984 2.304l.214.253c.223.264.47.556.673.848.284.411.537.896.621 1.49a.75.75 0 0 1-1.484.211c-.04-.282-.163-.547-.37-.847a8.456 8.456 0 0 0-.542-.68c-.084-.1-.173-.205-.268-.32C3.201 7.75 2.5 6.766 2.5 5.25 2.5 2.31 4.863 0 8 0s5.5 2.31 5.5 5.25c0 1.516-.701 2.5-1.328 3.259-.095.115-.184.22-.268.319-.207.245-.383.453-.541.681-.208.3-.33.565-.37.847a.751.751 0 0 1-1.485-.212c.084-.593.337-1.078.621-1.489.203-.292.45-.584.673-.848.075-.088.147-.173.213-.253.561-.679.985-1.32.985-2.304 0-2.06-1.637-3.75-4-3.75ZM5.75 12h4.5a.75.75 0 0 1 0 1.5h-4.5a.75.75 0 0 1 0-1.5ZM6 15.25a.75.75 0 0 1 .75-.75h2.5a.75.75 0 0 1 0 1.5h-2.5a.75.75 0 0 1-.75-.75Z"></path></svg>"#;
const SVG_REPORT: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M0 1.75C0 .784.784 0 1.75 0h12.5C15.216 0 16 .784 16 1.75v9.5A1.75 1.75 0 0 1 14.25 13H8.06l-2.573 2.573A1.458 1.458 0 0 1 3 14.543V13H1.75A1.75 1.75 0 0 1 0 11.25Zm1.75-.25a.25.25 0 0 0-.25.25v9.5c0 .138.112.25.25.25h2a.75.75 0 0 1 .75.75v2.19l2.72-2.72a.749.749 0 0 1 .53-.22h6.5a.25.25 0 0 0 .25-.25v-9.5a.25.25 0 0 0-.25-.25Zm7 2.25v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 9a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
pub(crate) const SVG_ALERT: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M6.457 1.047c.659-1.234 2.427-1.234 3.086 0l6.082 11.378A1.75 1.75 0 0 1 14.082 15H1.918a1.75 1.75 0 0 1-1.543-2.575Zm1.763.707a.25.25 0 0 0-.44 0L1.698 13.132a.25.25 0 0 0 .22.368h12.164a.25.25 0 0 0 .22-.368Zm.53 3.996v2.5a.75.75 0 0 1-1.5 0v-2.5a.75.75 0 0 1 1.5 0ZM9 11a1 1 0 1 1-2 0 1 1 0 0 1 2 0Z"></path></svg>"#;
pub(crate) const SVG_STOP: &str = r#"<svg class="alert-icon" viewBox="0 0 16 16" width="16" height="16" aria-hidden="true"><path d="M4.47.22A.749.749 0 0 1 5 0h6c.199 0 .389.079.53.22l4.25 4.25c.141.14.22.331.22.53v6a.749.749 0 0 1-.22.53l-4.25 4.25A.749.749 0 0 1 11 16H5a.749.749 0 0 1-.53-.22L.22 11.53A.749.749 0 0 1 0 11V5c0-.199.079-.389.22-.53Zm.84 1.28L1.5 5.31v5.38l3.81 3.81h5.38l3.81-3.81V5.31L10.69 1.5ZM8 4a.75.75 0 0 1 .75.75v3.5a.75.75 0 0 1-1.5 0v-3.5A.75.75 0 0 1 8 4Zm0 8a1 1 0 1 1 0-2 1 1 0 0 1 0 2Z"></path></svg>"#;

/// GitHub-style alert kinds (`> [!NOTE]` and friends).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

pub(crate) fn alert_start(kind: AlertKind, out: &mut String) {
    let (class, icon, title) = match kind {
        AlertKind::Note => ("note", SVG_INFO, "Note"),
        AlertKind::Tip => ("tip", SVG_LIGHTBULB, "Tip"),
        AlertKind::Important => ("important", SVG_REPORT, "Important"),
        AlertKind::Warning => ("warning", SVG_ALERT, "Warning"),
        AlertKind::Caution => ("caution", SVG_STOP, "Caution"),
    };
    write!(
        out,
        r#"<div class="alert alert-{class}"><div class="alert-title">{icon}{title}</div><div class="alert-content">"#
    )
    .unwrap();
}

pub(crate) fn alert_end(out: &mut String) {
    out.push_str("</div></div>");
}

/// Write a code block, wrapped in a captioned `<figure>` when titled.
pub(crate) fn code_block(lang: Option<&str>, title: Option<&str>, content: &str, out: &mut String) {
    if let Some(title) = title {
        write!(
            out,
            r#"<figure class="code-block"><figcaption>{}</figcaption>"#,
            escape_html(title)
        )
        .unwrap();
    }
    if let Some(lang) = lang {
        write!(
            out,
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        )
        .unwrap();
    } else {
        write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
    }
    if title.is_some() {
        out.push_str("</figure>");
    }
}

pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}

/// Rewrites relative markdown links to site URLs.
///
/// `base` is the URL path (relative to the docs root) of the directory that
/// relative links are resolved against; `prefix` is where the docs are
/// mounted, e.g. `/docs`.
#[derive(Clone, Debug)]
pub(crate) struct LinkResolver {
    prefix: String,
    base: String,
}

impl LinkResolver {
    pub(crate) fn new(prefix: &str, base: &str) -> Self {
        Self {
            prefix: prefix.trim_end_matches('/').to_owned(),
            base: base.trim_matches('/').to_owned(),
        }
    }

    /// Resolve a link target.
    ///
    /// - `./sibling.md` → `/docs/base/sibling`
    /// - `../other/index.md` → `/docs/other`
    /// - `/git/branching.md#merge` → `/docs/git/branching#merge`
    ///
    /// External links, fragment-only links, and non-markdown links are
    /// returned unchanged.
    pub(crate) fn resolve<'a>(&self, url: &'a str) -> Cow<'a, str> {
        if url.starts_with("http://")
            || url.starts_with("https://")
            || url.starts_with("//")
            || url.starts_with("mailto:")
            || url.starts_with("tel:")
            || url.starts_with('#')
        {
            return Cow::Borrowed(url);
        }

        let (path_part, fragment) = match url.find('#') {
            Some(pos) => (&url[..pos], &url[pos..]),
            None => (url, ""),
        };

        let Some(stem) = strip_markdown_extension(path_part) else {
            return Cow::Borrowed(url);
        };

        let resolved = if let Some(absolute) = stem.strip_prefix('/') {
            resolve_relative_path(absolute, "")
        } else {
            resolve_relative_path(stem, &self.base)
        };

        let clean = if resolved == "index" {
            ""
        } else {
            resolved.strip_suffix("/index").unwrap_or(&resolved)
        };

        let href = match (self.prefix.is_empty(), clean.is_empty()) {
            (true, true) => "/".to_owned(),
            (false, true) => self.prefix.clone(),
            (_, false) => format!("{}/{clean}", self.prefix),
        };
        Cow::Owned(format!("{href}{fragment}"))
    }
}

#[allow(clippy::case_sensitive_file_extension_comparisons)]
fn strip_markdown_extension(path: &str) -> Option<&str> {
    path.strip_suffix(".md")
        .or_else(|| path.strip_suffix(".mdx"))
}

/// Resolve a relative path against a base directory.
///
/// `..` never climbs above the docs root.
fn resolve_relative_path(relative: &str, base: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for component in relative.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(url: &str, base: &str) -> String {
        LinkResolver::new("/docs", base).resolve(url).into_owned()
    }

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("rust"), None, "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_escapes_content() {
        let mut out = String::new();
        code_block(None, None, "<div>", &mut out);
        assert_eq!(out, "<pre><code>&lt;div&gt;</code></pre>");
    }

    #[test]
    fn test_code_block_with_title() {
        let mut out = String::new();
        code_block(Some("bash"), Some("install.sh"), "npm i", &mut out);
        assert!(out.starts_with(r#"<figure class="code-block"><figcaption>install.sh</figcaption>"#));
        assert!(out.ends_with("</figure>"));
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        image("image.png", "Alt text", "Image title", &mut out);
        assert_eq!(
            out,
            r#"<img src="image.png" title="Image title" alt="Alt text">"#
        );
    }

    #[test]
    fn test_alert_markup() {
        let mut out = String::new();
        alert_start(AlertKind::Warning, &mut out);
        out.push_str("<p>content</p>");
        alert_end(&mut out);
        assert!(out.contains(r#"class="alert alert-warning""#));
        assert!(out.contains(r#"<svg class="alert-icon""#));
        assert!(out.ends_with("<p>content</p></div></div>"));
    }

    #[test]
    fn test_resolve_link_sibling() {
        assert_eq!(resolve("./merging.md", "git"), "/docs/git/merging");
    }

    #[test]
    fn test_resolve_link_parent_index() {
        assert_eq!(resolve("../nodejs/index.md", "git"), "/docs/nodejs");
    }

    #[test]
    fn test_resolve_link_root_index() {
        assert_eq!(resolve("../index.md", "git"), "/docs");
    }

    #[test]
    fn test_resolve_link_absolute_with_fragment() {
        assert_eq!(
            resolve("/git/branching.md#merge", "nodejs"),
            "/docs/git/branching#merge"
        );
    }

    #[test]
    fn test_resolve_link_mdx() {
        assert_eq!(resolve("setup.mdx", ""), "/docs/setup");
    }

    #[test]
    fn test_resolve_link_traversal_clamped() {
        assert_eq!(resolve("../../../etc/passwd.md", "a/b"), "/docs/etc/passwd");
    }

    #[test]
    fn test_resolve_link_unchanged() {
        assert_eq!(resolve("https://example.com/a.md", "git"), "https://example.com/a.md");
        assert_eq!(resolve("mailto:me@example.com", "git"), "mailto:me@example.com");
        assert_eq!(resolve("#section", "git"), "#section");
        assert_eq!(resolve("./diagram.png", "git"), "./diagram.png");
    }

    #[test]
    fn test_resolve_link_without_prefix() {
        let resolver = LinkResolver::new("", "guide");
        assert_eq!(resolver.resolve("index.md"), "/guide");
        assert_eq!(resolver.resolve("../index.md"), "/");
    }
}
