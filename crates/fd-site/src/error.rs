//! Error types for page rendering.

use fd_renderer::CompileError;
use fd_storage::{MetadataError, StorageError};

/// Error returned when a page cannot be produced.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// No page with content exists at the requested path.
    #[error("Page not found: {0}")]
    NotFound(String),
    /// The page body is malformed.
    #[error("Failed to compile '{path}': {source}")]
    Compilation {
        /// Docs-relative path of the page.
        path: String,
        #[source]
        source: CompileError,
    },
    /// The page's front matter is malformed.
    #[error("Invalid front matter in '{path}': {source}")]
    FrontMatter {
        /// Docs-relative path of the page.
        path: String,
        #[source]
        source: MetadataError,
    },
    /// Reading the source failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PageError {
    /// Map a storage error for `path`, turning a missing source into
    /// [`PageError::NotFound`].
    pub(crate) fn from_storage(path: &str, error: StorageError) -> Self {
        if error.is_not_found() {
            Self::NotFound(path.to_owned())
        } else {
            Self::Storage(error)
        }
    }

    /// True if the page exists but its source could not be compiled.
    #[must_use]
    pub fn is_compilation_failure(&self) -> bool {
        matches!(self, Self::Compilation { .. } | Self::FrontMatter { .. })
    }

    /// True if nothing renderable exists at the requested path.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Error rendering one of the embedded templates.
#[derive(Debug, thiserror::Error)]
#[error("Failed to render template '{name}': {source}")]
pub struct TemplateError {
    /// Template name.
    pub name: &'static str,
    #[source]
    pub source: minijinja::Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compilation_failure_classification() {
        let compile = PageError::Compilation {
            path: "git".to_owned(),
            source: CompileError::UnterminatedCodeBlock { line: 4 },
        };
        let front_matter = PageError::FrontMatter {
            path: "git".to_owned(),
            source: MetadataError::Unterminated,
        };
        assert!(compile.is_compilation_failure());
        assert!(front_matter.is_compilation_failure());
        assert!(!PageError::NotFound("git".to_owned()).is_compilation_failure());
    }

    #[test]
    fn test_from_storage_not_found() {
        let err = PageError::from_storage("git", StorageError::not_found("git"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_display_names_path() {
        let err = PageError::Compilation {
            path: "git/branching".to_owned(),
            source: CompileError::UnexpectedClose { line: 7 },
        };
        assert!(err.to_string().starts_with("Failed to compile 'git/branching': line 7"));
    }
}
