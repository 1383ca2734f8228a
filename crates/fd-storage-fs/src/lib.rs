//! Filesystem content source for Foundation Docs.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](fd_storage::Storage) trait. It handles:
//!
//! - Recursive directory scanning for `.md`/`.mdx` files
//! - Title resolution from front matter, H1 headings or file names
//! - Directory sidecar files (`meta.yaml`) for folder titles and ordering
//! - Mtime caching so rescans only re-read changed files
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use fd_storage::Storage;
//! use fd_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("content/docs"));
//! for doc in storage.scan()? {
//!     println!("{}: {}", doc.path, doc.title);
//! }
//! ```

mod scanner;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use fd_storage::{Document, Metadata, Storage, StorageError, split_front_matter};
use regex::Regex;

use scanner::{CONTENT_EXTENSIONS, DocumentRef, Scanner};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default metadata sidecar filename.
const DEFAULT_META_FILENAME: &str = "meta.yaml";

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// `getting-started` becomes `Getting Started`, `my_page` becomes `My Page`.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

/// Title derived from the last URL segment, "Home" for the root.
fn title_from_url(url_path: &str) -> String {
    match url_path.rsplit_once('/').map_or(url_path, |(_, last)| last) {
        "" => "Home".to_owned(),
        slug => titlecase_from_slug(slug),
    }
}

/// Fields read from a content file during scan.
#[derive(Clone, Debug, Default)]
struct FileInfo {
    /// Front matter metadata (empty when absent or invalid).
    metadata: Metadata,
    /// First H1 heading of the body.
    heading: Option<String>,
}

/// Cached scan result for one content file.
#[derive(Clone, Debug)]
struct CachedFile {
    mtime: SystemTime,
    info: FileInfo,
}

/// Filesystem storage implementation.
///
/// Scans a source directory recursively for markdown files. Front matter and
/// the first H1 are cached per file by mtime so rescans skip unchanged files.
pub struct FsStorage {
    /// Root directory for documents.
    source_dir: PathBuf,
    /// Scanner for document discovery.
    scanner: Scanner,
    /// Regex for extracting the first H1 heading.
    h1_regex: Regex,
    /// Mtime cache for incremental scans.
    mtime_cache: Mutex<HashMap<PathBuf, CachedFile>>,
}

impl FsStorage {
    /// Create a new filesystem storage using `meta.yaml` sidecars.
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to compile.
    /// This should never happen as the regex is a compile-time constant.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self::with_meta_filename(source_dir, DEFAULT_META_FILENAME)
    }

    /// Create a new filesystem storage with a custom sidecar filename.
    ///
    /// # Panics
    ///
    /// Panics if the internal regex for H1 heading extraction fails to compile.
    #[must_use]
    pub fn with_meta_filename(source_dir: PathBuf, meta_filename: &str) -> Self {
        let scanner = Scanner::new(&source_dir, meta_filename);
        Self {
            source_dir,
            scanner,
            h1_regex: Regex::new(r"(?m)^#[ \t]+(.+)$").unwrap(),
            mtime_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Root directory this storage reads from.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Reject paths that could escape the source directory.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        let escapes = path.starts_with('/')
            || path.contains('\\')
            || path.split('/').any(|segment| segment == "..");
        if escapes {
            return Err(StorageError::invalid_path(path).with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve URL path to content file path.
    ///
    /// Checks `{path}/index.md`, `{path}/index.mdx`, `{path}.md`, `{path}.mdx`
    /// in that order. Root maps to `index.md`/`index.mdx`.
    fn resolve_content(&self, url_path: &str) -> Option<PathBuf> {
        let dir = self.source_dir.join(url_path);
        let index = CONTENT_EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("index.{ext}")));

        let standalone = CONTENT_EXTENSIONS
            .iter()
            .filter(|_| !url_path.is_empty())
            .map(|ext| self.source_dir.join(format!("{url_path}.{ext}")));

        index.chain(standalone).find(|p| p.is_file())
    }

    /// Build a `Document` from a `DocumentRef`.
    fn build_document(&self, doc_ref: &DocumentRef) -> Document {
        let sidecar = doc_ref
            .meta_path
            .as_deref()
            .and_then(|p| self.load_sidecar(p))
            .unwrap_or_default();
        let file = doc_ref
            .content_path
            .as_deref()
            .map(|p| self.file_info(p))
            .unwrap_or_default();

        let title = sidecar
            .title
            .or(file.metadata.title)
            .or(file.heading)
            .unwrap_or_else(|| title_from_url(&doc_ref.url_path));

        Document {
            path: doc_ref.url_path.clone(),
            title,
            description: sidecar.description.or(file.metadata.description),
            order: sidecar.order.or(file.metadata.order),
            has_content: doc_ref.content_path.is_some(),
        }
    }

    /// Read front matter and H1 for a content file, using the mtime cache.
    fn file_info(&self, file_path: &Path) -> FileInfo {
        let mtime = fs::metadata(file_path).ok().and_then(|m| m.modified().ok());

        // Check cache (lock released at end of block)
        if let Some(mtime) = mtime {
            let cache = self.mtime_cache.lock().unwrap();
            if let Some(cached) = cache.get(file_path).filter(|c| c.mtime == mtime) {
                return cached.info.clone();
            }
        }

        let info = match fs::read_to_string(file_path) {
            Ok(content) => self.extract_file_info(file_path, &content),
            Err(e) => {
                tracing::warn!(path = %file_path.display(), error = %e, "Failed to read document");
                FileInfo::default()
            }
        };

        if let Some(mtime) = mtime {
            self.mtime_cache.lock().unwrap().insert(
                file_path.to_path_buf(),
                CachedFile {
                    mtime,
                    info: info.clone(),
                },
            );
        }

        info
    }

    /// Parse front matter and the first H1 from file content.
    ///
    /// Invalid front matter is logged and ignored here. Compiling the page
    /// reports it as an error.
    fn extract_file_info(&self, file_path: &Path, content: &str) -> FileInfo {
        let (metadata, body) = split_front_matter(content).unwrap_or_else(|e| {
            tracing::warn!(path = %file_path.display(), error = %e, "Invalid front matter");
            (Metadata::default(), content)
        });
        let heading = self
            .h1_regex
            .captures(body)
            .map(|caps| caps[1].trim().to_owned());
        FileInfo { metadata, heading }
    }

    /// Load a directory sidecar file.
    ///
    /// Returns `None` if the file is unreadable or invalid.
    fn load_sidecar(&self, meta_path: &Path) -> Option<Metadata> {
        let content = fs::read_to_string(meta_path)
            .inspect_err(|e| {
                tracing::warn!(path = %meta_path.display(), error = %e, "Failed to read metadata file, skipping");
            })
            .ok()?;
        Metadata::from_yaml(&content)
            .inspect_err(|e| {
                tracing::warn!(path = %meta_path.display(), error = %e, "Failed to parse metadata, skipping");
            })
            .ok()
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<Document>, StorageError> {
        let documents: Vec<Document> = self
            .scanner
            .scan()
            .iter()
            .map(|r| self.build_document(r))
            .collect();
        tracing::debug!(count = documents.len(), source = %self.source_dir.display(), "Scanned content");
        Ok(documents)
    }

    fn read(&self, path: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let full_path = self
            .resolve_content(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))
    }

    fn exists(&self, path: &str) -> bool {
        Self::validate_path(path).is_ok() && self.resolve_content(path).is_some()
    }

    fn mtime(&self, path: &str) -> Result<f64, StorageError> {
        Self::validate_path(path)?;
        let full_path = self
            .resolve_content(path)
            .ok_or_else(|| StorageError::not_found(path).with_backend(BACKEND))?;
        let modified = fs::metadata(&full_path)
            .and_then(|m| m.modified())
            .map_err(|e| StorageError::io(e, Some(path)).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use fd_storage::StorageErrorKind;
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(FsStorage: Send, Sync);

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn find<'a>(docs: &'a [Document], path: &str) -> &'a Document {
        docs.iter()
            .find(|d| d.path == path)
            .unwrap_or_else(|| panic!("no document at {path:?}"))
    }

    #[test]
    fn test_titlecase_from_slug() {
        assert_eq!(titlecase_from_slug("getting-started"), "Getting Started");
        assert_eq!(titlecase_from_slug("my_page"), "My Page");
        assert_eq!(titlecase_from_slug("git"), "Git");
        assert_eq!(titlecase_from_slug("a--b"), "A B");
    }

    #[test]
    fn test_title_from_url() {
        assert_eq!(title_from_url(""), "Home");
        assert_eq!(title_from_url("git/pull-requests"), "Pull Requests");
    }

    #[test]
    fn test_scan_empty_dir() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent"));

        assert!(storage.scan().unwrap().is_empty());
    }

    #[test]
    fn test_scan_title_from_front_matter() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("getting-started.md"),
            "---\ntitle: Getting Started\ndescription: First steps\norder: 1\n---\n\n# Ignored H1\n",
        )
        .unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        assert_eq!(
            docs,
            vec![Document {
                path: "getting-started".to_owned(),
                title: "Getting Started".to_owned(),
                description: Some("First steps".to_owned()),
                order: Some(1),
                has_content: true,
            }]
        );
    }

    #[test]
    fn test_scan_title_from_h1() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# My Custom Title\n\nContent.").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.scan().unwrap()[0].title, "My Custom Title");
    }

    #[test]
    fn test_scan_title_from_h1_keeps_symbols() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("csharp.md"), "# C# Basics\n").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.scan().unwrap()[0].title, "C# Basics");
    }

    #[test]
    fn test_scan_title_falls_back_to_filename() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("setup-guide.md"), "No heading here.").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.scan().unwrap()[0].title, "Setup Guide");
    }

    #[test]
    fn test_scan_invalid_front_matter_falls_back_to_h1() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("broken.md"), "---\ntitle: [x\n---\n# Broken Page\n")
            .unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        // The whole file is treated as body, so the H1 after the block is found
        assert_eq!(storage.scan().unwrap()[0].title, "Broken Page");
    }

    #[test]
    fn test_scan_folder_node_titles() {
        let temp_dir = create_test_dir();
        let git = temp_dir.path().join("git-basics");
        let backend = temp_dir.path().join("backend");
        fs::create_dir(&git).unwrap();
        fs::create_dir(&backend).unwrap();
        fs::write(git.join("commits.md"), "# Commits").unwrap();
        fs::write(backend.join("meta.yaml"), "title: Backend Architecture\norder: 3").unwrap();
        fs::write(backend.join("rest.md"), "# REST").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        let git_doc = find(&docs, "git-basics");
        assert_eq!(git_doc.title, "Git Basics");
        assert!(!git_doc.has_content);

        let backend_doc = find(&docs, "backend");
        assert_eq!(backend_doc.title, "Backend Architecture");
        assert_eq!(backend_doc.order, Some(3));
        assert!(!backend_doc.has_content);
    }

    #[test]
    fn test_scan_sidecar_overrides_index_title() {
        let temp_dir = create_test_dir();
        let node = temp_dir.path().join("node");
        fs::create_dir(&node).unwrap();
        fs::write(node.join("index.md"), "# Node.js Overview").unwrap();
        fs::write(node.join("meta.yaml"), "title: Node.js").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let doc = &storage.scan().unwrap()[0];

        assert_eq!(doc.title, "Node.js");
        assert!(doc.has_content);
    }

    #[test]
    fn test_scan_invalid_sidecar_is_ignored() {
        let temp_dir = create_test_dir();
        let node = temp_dir.path().join("node");
        fs::create_dir(&node).unwrap();
        fs::write(node.join("meta.yaml"), "title: [broken").unwrap();
        fs::write(node.join("intro.md"), "# Intro").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        assert_eq!(find(&docs, "node").title, "Node");
    }

    #[test]
    fn test_scan_paths_are_unique() {
        let temp_dir = create_test_dir();
        let node = temp_dir.path().join("node");
        fs::create_dir(&node).unwrap();
        fs::write(node.join("index.md"), "# From Index").unwrap();
        fs::write(temp_dir.path().join("node.md"), "# From File").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let docs = storage.scan().unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].title, "From Index");
        assert_eq!(storage.read("node").unwrap(), "# From Index");
    }

    #[test]
    fn test_scan_uses_mtime_cache() {
        let temp_dir = create_test_dir();
        let file = temp_dir.path().join("guide.md");
        fs::write(&file, "# Guide").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        storage.scan().unwrap();

        assert!(storage.mtime_cache.lock().unwrap().contains_key(&file));
    }

    #[test]
    fn test_read_root_and_nested() {
        let temp_dir = create_test_dir();
        let git = temp_dir.path().join("git");
        fs::create_dir(&git).unwrap();
        fs::write(temp_dir.path().join("index.md"), "# Docs").unwrap();
        fs::write(git.join("index.mdx"), "# Git").unwrap();
        fs::write(git.join("rebase.md"), "# Rebase").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.read("").unwrap(), "# Docs");
        assert_eq!(storage.read("git").unwrap(), "# Git");
        assert_eq!(storage.read("git/rebase").unwrap(), "# Rebase");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_test_dir();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.read("nonexistent").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_read_folder_without_content_is_not_found() {
        let temp_dir = create_test_dir();
        let git = temp_dir.path().join("git");
        fs::create_dir(&git).unwrap();
        fs::write(git.join("rebase.md"), "# Rebase").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.read("git").unwrap_err().is_not_found());
        assert!(!storage.exists("git"));
    }

    #[test]
    fn test_path_traversal_rejected() {
        let temp_dir = create_test_dir();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        for path in ["../secret", "a/../../b", "/etc/passwd", "a\\b"] {
            let err = storage.read(path).unwrap_err();
            assert_eq!(err.kind, StorageErrorKind::InvalidPath, "path {path:?}");
            assert!(!storage.exists(path));
        }
    }

    #[test]
    fn test_dotted_names_are_not_traversal() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("v1..2.md"), "# Range").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(storage.read("v1..2").unwrap(), "# Range");
    }

    #[test]
    fn test_mtime() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert!(storage.mtime("guide").unwrap() > 0.0);
        assert!(storage.mtime("missing").unwrap_err().is_not_found());
    }
}
