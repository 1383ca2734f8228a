//! Directive line parsing.
//!
//! Recognizes whole-line directives:
//!
//! - `::name[label]{attrs}`: leaf component
//! - `:::name[label]{attrs}`: opens a container component
//! - `:::`: closes the innermost open container

/// A directive recognized on a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DirectiveLine<'a> {
    Leaf {
        name: &'a str,
        label: &'a str,
        attrs: &'a str,
    },
    Open {
        name: &'a str,
        label: &'a str,
        attrs: &'a str,
    },
    Close,
    /// Starts like a directive but the tail after the name is malformed.
    Malformed { name: &'a str, message: String },
}

/// Parse a line for directive syntax.
///
/// Returns `None` for ordinary markdown lines.
pub(crate) fn parse_line(line: &str) -> Option<DirectiveLine<'_>> {
    let trimmed = line.trim();
    let colon_count = trimmed.chars().take_while(|&c| c == ':').count();
    if colon_count < 2 {
        return None;
    }

    let after_colons = &trimmed[colon_count..];
    if colon_count >= 3 && after_colons.trim().is_empty() {
        return Some(DirectiveLine::Close);
    }

    let name_end = after_colons
        .find(|c: char| !is_name_char(c))
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let rest = &after_colons[name_end..];
    let (label, rest) = match take_delimited(rest, '[', ']') {
        Ok(parts) => parts,
        Err(message) => return Some(DirectiveLine::Malformed { name, message }),
    };
    let (attrs, rest) = match take_delimited(rest, '{', '}') {
        Ok(parts) => parts,
        Err(message) => return Some(DirectiveLine::Malformed { name, message }),
    };

    // A directive fills its line; `::before and ::after` is prose
    if !rest.trim().is_empty() {
        return None;
    }

    Some(if colon_count == 2 {
        DirectiveLine::Leaf { name, label, attrs }
    } else {
        DirectiveLine::Open { name, label, attrs }
    })
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Take `open ... close` from the start of `s`, honoring nesting.
///
/// Returns `("", s)` when `s` does not start with `open`.
fn take_delimited(s: &str, open: char, close: char) -> Result<(&str, &str), String> {
    if !s.starts_with(open) {
        return Ok(("", s));
    }

    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Ok((&s[1..i], &s[i + 1..]));
            }
        }
    }

    Err(format!("missing closing '{close}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_are_not_directives() {
        assert_eq!(parse_line("Meeting at 10:30"), None);
        assert_eq!(parse_line(": definition"), None);
        assert_eq!(parse_line(":: spaced"), None);
        assert_eq!(parse_line("::1abc"), None);
    }

    #[test]
    fn test_leaf() {
        assert_eq!(
            parse_line(r#"::card{title="Git" href="./git.md"}"#),
            Some(DirectiveLine::Leaf {
                name: "card",
                label: "",
                attrs: r#"title="Git" href="./git.md""#,
            })
        );
    }

    #[test]
    fn test_open_with_label_and_attrs() {
        assert_eq!(
            parse_line(r#"  :::callout[Heads up]{type="warn"}  "#),
            Some(DirectiveLine::Open {
                name: "callout",
                label: "Heads up",
                attrs: r#"type="warn""#,
            })
        );
    }

    #[test]
    fn test_close() {
        assert_eq!(parse_line(":::"), Some(DirectiveLine::Close));
        assert_eq!(parse_line("::::  "), Some(DirectiveLine::Close));
    }

    #[test]
    fn test_nested_brackets_in_label() {
        assert_eq!(
            parse_line(":::tab[Array [T]]"),
            Some(DirectiveLine::Open {
                name: "tab",
                label: "Array [T]",
                attrs: "",
            })
        );
    }

    #[test]
    fn test_unclosed_braces_are_malformed() {
        let parsed = parse_line(r#":::callout{type="warn""#);
        assert!(matches!(
            parsed,
            Some(DirectiveLine::Malformed { name: "callout", .. })
        ));
    }

    #[test]
    fn test_trailing_text_is_prose() {
        assert_eq!(parse_line(":::steps and more"), None);
        assert_eq!(parse_line("::before and ::after insert generated content."), None);
        assert_eq!(parse_line(r#"::card{title="A"} see below"#), None);
    }
}
