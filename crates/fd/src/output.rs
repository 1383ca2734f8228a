//! Styled terminal output on stderr.

use console::{Style, Term};

/// Writes status lines for the CLI commands.
pub(crate) struct Output {
    term: Term,
    heading: Style,
    ok: Style,
    warn: Style,
    err: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            heading: Style::new().bold(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            err: Style::new().red(),
        }
    }

    fn line(&self, style: Option<&Style>, msg: &str) {
        let text = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        // Write errors on a closed stderr are ignored
        let _ = self.term.write_line(&text);
    }

    /// Bold title line.
    pub(crate) fn heading(&self, msg: &str) {
        self.line(Some(&self.heading), msg);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    /// Green.
    pub(crate) fn success(&self, msg: &str) {
        self.line(Some(&self.ok), msg);
    }

    /// Yellow.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(Some(&self.warn), msg);
    }

    /// Red.
    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.err), msg);
    }
}
