//! Deferred string replacement applied after rendering.

/// Collects placeholder replacements registered while preprocessing.
///
/// Components that only know their final markup once a container closes
/// (the tab list of `:::tabs`) emit a placeholder comment and register its
/// replacement here; [`apply`](Self::apply) rewrites the rendered HTML.
#[derive(Debug, Default)]
pub(crate) struct Replacements {
    items: Vec<(String, String)>,
}

impl Replacements {
    /// Replace all occurrences of `from` with `to`, in registration order.
    pub(crate) fn add(&mut self, from: impl Into<String>, to: impl Into<String>) {
        self.items.push((from.into(), to.into()));
    }

    pub(crate) fn apply(self, html: &mut String) {
        for (from, to) in self.items {
            if html.contains(&from) {
                *html = html.replace(&from, &to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_replacements() {
        let mut html = "unchanged".to_owned();
        Replacements::default().apply(&mut html);
        assert_eq!(html, "unchanged");
    }

    #[test]
    fn test_placeholders_replaced_in_order() {
        let mut html = "<!--a--><p>x</p><!--b-->".to_owned();
        let mut replacements = Replacements::default();
        replacements.add("<!--a-->", "<nav>A</nav>");
        replacements.add("<!--b-->", "<nav>B</nav>");
        replacements.apply(&mut html);
        assert_eq!(html, "<nav>A</nav><p>x</p><nav>B</nav>");
    }

    #[test]
    fn test_missing_placeholder_is_ignored() {
        let mut html = "hello".to_owned();
        let mut replacements = Replacements::default();
        replacements.add("<!--gone-->", "x");
        replacements.apply(&mut html);
        assert_eq!(html, "hello");
    }
}
