//! Compilation errors.

/// Malformed markup that fails a whole compilation.
///
/// Line numbers are 1-indexed and relative to the compiled body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A fenced code block is opened and never closed.
    #[error("line {line}: code block is never closed")]
    UnterminatedCodeBlock { line: usize },

    /// A directive names a component outside the registry.
    #[error("line {line}: unknown component '{name}'")]
    UnknownComponent { name: String, line: usize },

    /// A registered component is used with invalid attributes or placement.
    #[error("line {line}: invalid '{component}': {message}")]
    InvalidAttribute {
        component: String,
        message: String,
        line: usize,
    },

    /// A container component is still open at end of input.
    #[error("line {line}: component '{name}' is never closed")]
    UnclosedComponent { name: String, line: usize },

    /// A closing `:::` with no open container.
    #[error("line {line}: ':::' closes nothing")]
    UnexpectedClose { line: usize },
}

impl CompileError {
    /// Line the error was detected on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedCodeBlock { line }
            | Self::UnknownComponent { line, .. }
            | Self::InvalidAttribute { line, .. }
            | Self::UnclosedComponent { line, .. }
            | Self::UnexpectedClose { line } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static_assertions::assert_impl_all!(CompileError: Send, Sync, std::error::Error);

    #[test]
    fn test_display() {
        let err = CompileError::InvalidAttribute {
            component: "callout".to_owned(),
            message: "unknown type 'danger'".to_owned(),
            line: 4,
        };
        assert_eq!(err.to_string(), "line 4: invalid 'callout': unknown type 'danger'");
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_unterminated_display() {
        let err = CompileError::UnterminatedCodeBlock { line: 12 };
        assert_eq!(err.to_string(), "line 12: code block is never closed");
    }
}
