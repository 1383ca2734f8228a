//! Document discovery by filesystem walking.
//!
//! Discovery (finding files) is separate from building (reading titles and
//! front matter). The Scanner only identifies files that could form documents
//! and returns lightweight references for `FsStorage` to process.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Markdown file extensions recognized as documents.
pub(crate) const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Reference to a document's source files.
///
/// Contains only file locations. No content is read at this stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocumentRef {
    /// URL path (e.g., "", "git", "git/branching").
    pub url_path: String,
    /// Content file (`.md`/`.mdx`), if present.
    pub content_path: Option<PathBuf>,
    /// Directory sidecar (e.g., `meta.yaml`), if present.
    pub meta_path: Option<PathBuf>,
}

/// Discovers document references by walking the content directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    meta_filename: String,
}

impl Scanner {
    pub(crate) fn new(source_dir: &Path, meta_filename: &str) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            meta_filename: meta_filename.to_owned(),
        }
    }

    /// Scan the filesystem and return document references ordered by URL path.
    ///
    /// URL paths are unique. When `foo.md` and `foo/index.md` both exist the
    /// directory index wins.
    pub(crate) fn scan(&self) -> Vec<DocumentRef> {
        let mut refs = BTreeMap::new();
        if self.source_dir.is_dir() {
            self.scan_directory(&self.source_dir, "", &mut refs);
        } else {
            tracing::warn!(path = %self.source_dir.display(), "Content directory does not exist");
        }
        refs.into_values().collect()
    }

    /// Scan one directory. Returns true if it or any descendant holds documents.
    ///
    /// Subdirectories are visited before standalone files so a directory index
    /// is registered before a sibling file with the same URL path.
    fn scan_directory(
        &self,
        dir_path: &Path,
        url_prefix: &str,
        refs: &mut BTreeMap<String, DocumentRef>,
    ) -> bool {
        let Ok(entries) = fs::read_dir(dir_path) else {
            return false;
        };

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .filter(|e| !e.file_name().to_string_lossy().starts_with('.'))
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.file_name().to_string_lossy().into_owned(), e.path(), is_dir)
            })
            .collect();
        entries.sort();

        let mut found = false;
        let mut index_path: Option<PathBuf> = None;
        let mut meta_path: Option<PathBuf> = None;
        let mut files = Vec::new();

        for (name, path, is_dir) in entries {
            if is_dir {
                found |= self.scan_directory(&path, &join_url(url_prefix, &name), refs);
            } else if name == self.meta_filename {
                meta_path = Some(path);
            } else if let Some(stem) = content_stem(&name) {
                if stem == "index" {
                    // index.md wins over index.mdx (sorted first)
                    index_path.get_or_insert(path);
                } else {
                    files.push((stem.to_owned(), path));
                }
            }
        }

        found |= index_path.is_some() || !files.is_empty();

        // The root directory only becomes a document through its own index
        if found && (!url_prefix.is_empty() || index_path.is_some()) {
            insert_ref(
                refs,
                DocumentRef {
                    url_path: url_prefix.to_owned(),
                    content_path: index_path,
                    meta_path,
                },
            );
        }

        for (stem, path) in files {
            insert_ref(
                refs,
                DocumentRef {
                    url_path: join_url(url_prefix, &stem),
                    content_path: Some(path),
                    meta_path: None,
                },
            );
        }

        found
    }
}

/// Register a reference, merging with an existing entry for the same path.
///
/// A folder node without an index adopts the content of a same-named file.
/// Two content files for one path keep the first and log the second.
fn insert_ref(refs: &mut BTreeMap<String, DocumentRef>, new: DocumentRef) {
    match refs.entry(new.url_path.clone()) {
        Entry::Vacant(entry) => {
            entry.insert(new);
        }
        Entry::Occupied(mut entry) => {
            let existing = entry.get_mut();
            if existing.meta_path.is_none() {
                existing.meta_path = new.meta_path;
            }
            match (&existing.content_path, new.content_path) {
                (None, content) => existing.content_path = content,
                (Some(kept), Some(dropped)) => {
                    tracing::warn!(
                        path = %new.url_path,
                        kept = %kept.display(),
                        ignored = %dropped.display(),
                        "Duplicate document path, ignoring file"
                    );
                }
                (Some(_), None) => {}
            }
        }
    }
}

/// Return the file stem if the name has a content extension.
fn content_stem(name: &str) -> Option<&str> {
    let (stem, ext) = name.rsplit_once('.')?;
    (!stem.is_empty() && CONTENT_EXTENSIONS.contains(&ext)).then_some(stem)
}

/// Join a URL prefix and a segment.
///
/// - `""`, `"guide"` -> `"guide"`
/// - `"git"`, `"branching"` -> `"git/branching"`
pub(crate) fn join_url(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}/{segment}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn scan(dir: &Path) -> Vec<DocumentRef> {
        Scanner::new(dir, "meta.yaml").scan()
    }

    fn paths(refs: &[DocumentRef]) -> Vec<&str> {
        refs.iter().map(|r| r.url_path.as_str()).collect()
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "guide"), "guide");
        assert_eq!(join_url("git", "branching"), "git/branching");
    }

    #[test]
    fn test_content_stem() {
        assert_eq!(content_stem("guide.md"), Some("guide"));
        assert_eq!(content_stem("intro.mdx"), Some("intro"));
        assert_eq!(content_stem("notes.txt"), None);
        assert_eq!(content_stem(".md"), None);
        assert_eq!(content_stem("README"), None);
    }

    #[test]
    fn test_scan_flat() {
        let dir = create_test_dir();
        fs::write(dir.path().join("index.md"), "# Home").unwrap();
        fs::write(dir.path().join("getting-started.md"), "# Start").unwrap();

        let refs = scan(dir.path());

        assert_eq!(paths(&refs), vec!["", "getting-started"]);
        assert!(refs.iter().all(|r| r.content_path.is_some()));
    }

    #[test]
    fn test_scan_root_without_index_has_no_root_ref() {
        let dir = create_test_dir();
        fs::write(dir.path().join("guide.md"), "# Guide").unwrap();

        assert_eq!(paths(&scan(dir.path())), vec!["guide"]);
    }

    #[test]
    fn test_scan_folder_without_index_is_folder_node() {
        let dir = create_test_dir();
        fs::create_dir(dir.path().join("git")).unwrap();
        fs::write(dir.path().join("git/branching.md"), "# Branching").unwrap();

        let refs = scan(dir.path());

        assert_eq!(paths(&refs), vec!["git", "git/branching"]);
        assert!(refs[0].content_path.is_none());
    }

    #[test]
    fn test_scan_skips_empty_directories() {
        let dir = create_test_dir();
        fs::create_dir_all(dir.path().join("assets/img")).unwrap();
        fs::write(dir.path().join("assets/img/logo.png"), [0u8]).unwrap();

        assert!(scan(dir.path()).is_empty());
    }

    #[test]
    fn test_scan_skips_hidden_entries() {
        let dir = create_test_dir();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git/notes.md"), "# Hidden").unwrap();
        fs::write(dir.path().join(".draft.md"), "# Draft").unwrap();
        fs::write(dir.path().join("visible.md"), "# Visible").unwrap();

        assert_eq!(paths(&scan(dir.path())), vec!["visible"]);
    }

    #[test]
    fn test_scan_directory_index_wins_over_file() {
        let dir = create_test_dir();
        fs::create_dir(dir.path().join("node")).unwrap();
        fs::write(dir.path().join("node/index.md"), "# Node Index").unwrap();
        fs::write(dir.path().join("node.md"), "# Node File").unwrap();

        let refs = scan(dir.path());

        assert_eq!(paths(&refs), vec!["node"]);
        assert_eq!(
            refs[0].content_path.as_deref(),
            Some(dir.path().join("node/index.md").as_path())
        );
    }

    #[test]
    fn test_scan_file_fills_folder_without_index() {
        let dir = create_test_dir();
        fs::create_dir(dir.path().join("react")).unwrap();
        fs::write(dir.path().join("react/hooks.md"), "# Hooks").unwrap();
        fs::write(dir.path().join("react.md"), "# React").unwrap();

        let refs = scan(dir.path());

        assert_eq!(paths(&refs), vec!["react", "react/hooks"]);
        assert_eq!(
            refs[0].content_path.as_deref(),
            Some(dir.path().join("react.md").as_path())
        );
    }

    #[test]
    fn test_scan_records_meta_sidecar() {
        let dir = create_test_dir();
        fs::create_dir(dir.path().join("backend")).unwrap();
        fs::write(dir.path().join("backend/meta.yaml"), "title: Backend").unwrap();
        fs::write(dir.path().join("backend/rest.md"), "# REST").unwrap();

        let refs = scan(dir.path());

        assert_eq!(
            refs[0].meta_path.as_deref(),
            Some(dir.path().join("backend/meta.yaml").as_path())
        );
    }

    #[test]
    fn test_scan_missing_dir() {
        assert!(scan(Path::new("/nonexistent/content")).is_empty());
    }
}
