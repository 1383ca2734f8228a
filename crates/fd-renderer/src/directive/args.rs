//! Directive argument parsing.
//!
//! Parses the `[label]{key="value" ...}` tail of a directive line.

use std::collections::BTreeMap;

/// Parsed arguments from directive syntax.
///
/// ```text
/// :::callout[Heads up]{type="warn"}
///           ^^^^^^^^^ ^^^^^^^^^^^^^
///           label     attrs
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Text from brackets (empty if not provided).
    pub label: String,
    /// Key-value attributes, ordered by key.
    pub attrs: BTreeMap<String, String>,
}

impl DirectiveArgs {
    /// Parse a label and the attribute string found between braces.
    ///
    /// Accepts `key="value"`, `key='value'` and `key=value`. A bare `key`
    /// is stored with an empty value.
    ///
    /// # Errors
    ///
    /// Returns a message describing the problem when a quoted value is
    /// never closed or a key is empty.
    pub fn parse(label: &str, attrs_str: &str) -> Result<Self, String> {
        let mut args = Self {
            label: label.trim().to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();
        while !remaining.is_empty() {
            let (key, value, rest) = parse_key_value(remaining)?;
            args.attrs.insert(key.to_owned(), value.to_owned());
            remaining = rest.trim_start();
        }

        Ok(args)
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Attribute value, falling back to the bracket label.
    #[must_use]
    pub fn get_or_label(&self, key: &str) -> Option<&str> {
        self.get(key)
            .or_else(|| (!self.label.is_empty()).then_some(self.label.as_str()))
    }
}

fn parse_key_value(s: &str) -> Result<(&str, &str, &str), String> {
    let key_end = s
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(s.len());
    let key = &s[..key_end];
    if key.is_empty() {
        return Err("attribute name is empty".to_owned());
    }

    let Some(after_eq) = s[key_end..].strip_prefix('=') else {
        return Ok((key, "", &s[key_end..]));
    };

    for quote in ['"', '\''] {
        if let Some(stripped) = after_eq.strip_prefix(quote) {
            let end = stripped
                .find(quote)
                .ok_or_else(|| format!("unterminated quoted value for '{key}'"))?;
            return Ok((key, &stripped[..end], &stripped[end + 1..]));
        }
    }

    let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
    Ok((key, &after_eq[..end], &after_eq[end..]))
}
