//! Code fence handling.
//!
//! Component syntax inside code blocks is left untouched, and a fence that
//! is never closed is a compilation failure.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};

use crate::directive::DirectiveArgs;
use crate::renderer::MarkdownRenderer;

/// Split a fence info string into language and attributes.
///
/// Format: `language [key="value" ...]`. Attributes that fail to parse are
/// ignored rather than failing the code block.
pub(crate) fn parse_fence_info(info: &str) -> (Option<String>, DirectiveArgs) {
    let info = info.trim();
    let (language, rest) = match info.split_once(char::is_whitespace) {
        Some((first, rest)) if !first.contains('=') => (first, rest),
        None if !info.contains('=') => (info, ""),
        _ => ("", info),
    };

    let args = DirectiveArgs::parse("", rest).unwrap_or_default();
    let language = (!language.is_empty()).then(|| language.to_owned());
    (language, args)
}

/// Code blocks found in a markdown source, as 1-indexed line spans.
///
/// Spans come from pulldown-cmark's block parse, including indented code
/// and fences nested in blockquotes or list items.
#[derive(Debug, Default)]
pub(crate) struct CodeBlocks {
    spans: Vec<(usize, usize)>,
    unterminated: Option<usize>,
}

impl CodeBlocks {
    pub(crate) fn scan(input: &str) -> Self {
        let line_starts: Vec<usize> = std::iter::once(0)
            .chain(input.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        let line_of = |offset: usize| line_starts.partition_point(|&start| start <= offset);

        let mut blocks = Self::default();
        let parser = Parser::new_ext(input, MarkdownRenderer::parser_options());
        for (event, range) in parser.into_offset_iter() {
            let Event::Start(Tag::CodeBlock(kind)) = event else {
                continue;
            };
            if range.is_empty() {
                continue;
            }

            let first = line_of(range.start);
            blocks.spans.push((first, line_of(range.end - 1)));

            if matches!(kind, CodeBlockKind::Fenced(_))
                && blocks.unterminated.is_none()
                && !is_closed(&input[range])
            {
                blocks.unterminated = Some(first);
            }
        }
        blocks
    }

    /// Whether line `line_num` (1-indexed) belongs to a code block.
    pub(crate) fn contains(&self, line_num: usize) -> bool {
        self.spans
            .iter()
            .any(|&(first, last)| (first..=last).contains(&line_num))
    }

    /// Opening line of the first fence never closed in its container.
    pub(crate) fn unterminated(&self) -> Option<usize> {
        self.unterminated
    }
}

/// A fenced block is closed when its last line is a matching fence.
///
/// pulldown-cmark also ends a fence at the end of its blockquote or list
/// item; that case has no closing line and is reported as unterminated.
fn is_closed(block: &str) -> bool {
    let block = block.trim_end_matches(['\n', '\r']);
    let mut lines = block.lines();
    let Some(opening) = lines.next() else {
        return false;
    };
    let Some(last) = lines.next_back() else {
        return false;
    };

    let Some((fence_char, fence_len)) = opening
        .find(['`', '~'])
        .and_then(|idx| detect_fence(&opening[idx..]))
    else {
        return false;
    };
    let last = last.trim_start_matches([' ', '\t', '>']);
    is_closing_fence(last, fence_char, fence_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_info_language_only() {
        let (lang, args) = parse_fence_info("rust");
        assert_eq!(lang.as_deref(), Some("rust"));
        assert!(args.attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_quoted_title() {
        let (lang, args) = parse_fence_info(r#"js title="server setup.js""#);
        assert_eq!(lang.as_deref(), Some("js"));
        assert_eq!(args.get("title"), Some("server setup.js"));
    }

    #[test]
    fn test_parse_fence_info_attrs_without_language() {
        let (lang, args) = parse_fence_info(r#"title="notes.txt""#);
        assert_eq!(lang, None);
        assert_eq!(args.get("title"), Some("notes.txt"));
    }

    #[test]
    fn test_parse_fence_info_bad_attrs_ignored() {
        let (lang, args) = parse_fence_info(r#"bash title="oops"#);
        assert_eq!(lang.as_deref(), Some("bash"));
        assert!(args.attrs.is_empty());
    }

    #[test]
    fn test_scan_fenced_block_lines() {
        let blocks = CodeBlocks::scan("Intro\n\n```md\n:::callout\n```\n\nAfter\n");
        assert_eq!(blocks.spans, [(3, 5)]);
        assert!(!blocks.contains(1));
        assert!(blocks.contains(4));
        assert_eq!(blocks.unterminated(), None);
    }

    #[test]
    fn test_scan_indented_block_lines() {
        let blocks = CodeBlocks::scan("Syntax:\n\n    :::callout\n    :::\n\nDone\n");
        assert!(blocks.contains(3));
        assert!(blocks.contains(4));
        assert!(!blocks.contains(6));
        assert_eq!(blocks.unterminated(), None);
    }

    #[test]
    fn test_indented_backticks_are_code_not_a_fence() {
        let blocks = CodeBlocks::scan("Type:\n\n    ```\n\nto open a fence.\n");
        assert!(blocks.contains(3));
        assert_eq!(blocks.unterminated(), None);
    }

    #[test]
    fn test_unterminated_at_end_of_input() {
        let blocks = CodeBlocks::scan("# Title\n\n```js\nconst x = 1;\n");
        assert_eq!(blocks.unterminated(), Some(3));
    }

    #[test]
    fn test_opening_fence_alone_is_unterminated() {
        assert_eq!(CodeBlocks::scan("```").unterminated(), Some(1));
    }

    #[test]
    fn test_closing_fence_must_be_long_enough() {
        let blocks = CodeBlocks::scan("````md\n```\n");
        assert_eq!(blocks.unterminated(), Some(1));
        let blocks = CodeBlocks::scan("````md\n```\n`````\n");
        assert_eq!(blocks.unterminated(), None);
    }

    #[test]
    fn test_closing_fence_must_match_char() {
        assert_eq!(CodeBlocks::scan("~~~\n```\n").unterminated(), Some(1));
        assert_eq!(CodeBlocks::scan("~~~\n```\n~~~\n").unterminated(), None);
    }

    #[test]
    fn test_fence_in_blockquote() {
        assert_eq!(CodeBlocks::scan("> ```js\n> let x = 1;\n").unterminated(), Some(1));
        assert_eq!(
            CodeBlocks::scan("> ```js\n> let x = 1;\n> ```\n").unterminated(),
            None
        );
    }

    #[test]
    fn test_fence_in_list_item() {
        let blocks = CodeBlocks::scan("- step\n- ```sh\n  make\n");
        assert_eq!(blocks.unterminated(), Some(2));
        let blocks = CodeBlocks::scan("- ```sh\n  make\n  ```\n- next\n");
        assert_eq!(blocks.unterminated(), None);
        assert!(!blocks.contains(4));
    }

    #[test]
    fn test_inline_triple_backticks_are_not_a_fence() {
        let blocks = CodeBlocks::scan("```code``` in a line\n");
        assert!(!blocks.contains(1));
        assert_eq!(blocks.unterminated(), None);
    }

    #[test]
    fn test_indented_fence() {
        let blocks = CodeBlocks::scan("   ```js\n   let x;\n   ```\n");
        assert!(blocks.contains(2));
        assert_eq!(blocks.unterminated(), None);
    }
}
