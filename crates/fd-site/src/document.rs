//! Source document as read from storage.

use fd_storage::{Metadata, Storage, split_front_matter};

use crate::PageError;

/// Raw source of one page, split into front matter and markdown body.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentDocument {
    path: String,
    metadata: Metadata,
    body: String,
    mtime: f64,
}

impl ContentDocument {
    /// Read the document at `path` from storage.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] if storage has no source for `path`,
    /// [`PageError::FrontMatter`] if the front matter is malformed, and
    /// [`PageError::Storage`] for other read failures.
    pub fn load(storage: &dyn Storage, path: &str) -> Result<Self, PageError> {
        let mtime = storage
            .mtime(path)
            .map_err(|e| PageError::from_storage(path, e))?;
        let text = storage
            .read(path)
            .map_err(|e| PageError::from_storage(path, e))?;
        Self::parse(path, &text, mtime)
    }

    /// Build a document from source text.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::FrontMatter`] if the front matter is malformed.
    pub fn parse(path: &str, text: &str, mtime: f64) -> Result<Self, PageError> {
        let (metadata, body) = split_front_matter(text).map_err(|source| PageError::FrontMatter {
            path: path.to_owned(),
            source,
        })?;
        Ok(Self {
            path: path.to_owned(),
            metadata,
            body: body.to_owned(),
            mtime,
        })
    }

    /// Docs-relative URL path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Front matter fields.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Markdown after the front matter.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Source modification time (Unix timestamp).
    #[must_use]
    pub fn mtime(&self) -> f64 {
        self.mtime
    }
}

#[cfg(test)]
mod tests {
    use fd_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_load_splits_front_matter() {
        let storage = MockStorage::new()
            .with_file(
                "git",
                "Git",
                "---\ntitle: Git Basics\ndescription: Version control\n---\n# Git\n",
            )
            .with_mtime("git", 42.0);

        let doc = ContentDocument::load(&storage, "git").unwrap();

        assert_eq!(doc.path(), "git");
        assert_eq!(doc.metadata().title.as_deref(), Some("Git Basics"));
        assert_eq!(doc.metadata().description.as_deref(), Some("Version control"));
        assert_eq!(doc.body(), "# Git\n");
        assert_eq!(doc.mtime(), 42.0);
    }

    #[test]
    fn test_load_without_front_matter() {
        let storage = MockStorage::new().with_file("nodejs", "Node.js", "# Node.js\n");
        let doc = ContentDocument::load(&storage, "nodejs").unwrap();
        assert!(doc.metadata().is_empty());
        assert_eq!(doc.body(), "# Node.js\n");
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let err = ContentDocument::load(&MockStorage::new(), "nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_bad_front_matter() {
        let err = ContentDocument::parse("git", "---\ntitle: Git\n# never closed", 0.0).unwrap_err();
        assert!(matches!(err, PageError::FrontMatter { ref path, .. } if path == "git"));
        assert!(err.is_compilation_failure());
    }
}
