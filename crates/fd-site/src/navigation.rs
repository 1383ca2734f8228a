//! Navigation tree for the documentation hierarchy.
//!
//! Built once from the documents a [`Storage`](fd_storage::Storage) scan
//! returns and shared read-only afterwards.
//!
//! # Architecture
//!
//! Pages are stored in a flat `Vec<Page>` with parent/children relationships
//! tracked by indices. This provides:
//! - O(1) URL path lookups via `path_index` `HashMap`
//! - O(d) breadcrumb building where d is the page depth

use std::collections::HashMap;

use fd_storage::Document;
use serde::Serialize;

/// Navigation item with children for the sidebar and `/api/navigation`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// URL path relative to the docs root (`""` for the root page).
    pub path: String,
    /// False for folder nodes, which are shown without a link.
    #[serde(rename = "hasContent")]
    pub has_content: bool,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// One node of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Page title (front matter > H1 > filename).
    pub title: String,
    /// URL path without leading slash (e.g., "git", "git/branching", "" for root).
    pub path: String,
    /// Description from front matter or sidecar.
    pub description: Option<String>,
    /// Sort key among siblings.
    pub order: Option<i64>,
    /// True if a markdown file backs this node.
    pub has_content: bool,
}

impl From<&Document> for Page {
    fn from(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            path: doc.path.clone(),
            description: doc.description.clone(),
            order: doc.order,
            has_content: doc.has_content,
        }
    }
}

/// Breadcrumb navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// Display title.
    pub title: String,
    /// URL path relative to the docs root.
    pub path: String,
}

/// Split a request path into segments, dropping empty ones.
///
/// ```
/// assert_eq!(fd_site::split_path("/git//branching/"), ["git", "branching"]);
/// assert!(fd_site::split_path("").is_empty());
/// ```
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Immutable documentation hierarchy with exactly one node per path.
pub struct NavigationTree {
    pages: Vec<Page>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    path_index: HashMap<String, usize>,
    subtree_has_content: Vec<bool>,
}

/// Compute which pages have markdown content in their subtree.
///
/// Post-order DFS, O(N).
fn compute_subtree_has_content(
    pages: &[Page],
    children: &[Vec<usize>],
    roots: &[usize],
) -> Vec<bool> {
    fn dfs(idx: usize, pages: &[Page], children: &[Vec<usize>], result: &mut [bool]) {
        for &child in &children[idx] {
            dfs(child, pages, children, result);
        }
        result[idx] = pages[idx].has_content || children[idx].iter().any(|&c| result[c]);
    }

    let mut subtree_has_content = vec![false; pages.len()];
    for &root in roots {
        dfs(root, pages, children, &mut subtree_has_content);
    }
    subtree_has_content
}

fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.matches('/').count() + 1
    }
}

impl NavigationTree {
    /// Build the tree from scanned documents.
    ///
    /// Parents are inserted before children so every node can find its
    /// nearest existing ancestor. Siblings are ordered by `order` (unset
    /// last), then path. A document whose path is already taken is dropped
    /// with a warning.
    #[must_use]
    pub fn build(documents: &[Document]) -> Self {
        let mut sorted: Vec<&Document> = documents.iter().collect();
        sorted.sort_by(|a, b| {
            depth(&a.path)
                .cmp(&depth(&b.path))
                .then_with(|| a.has_content.cmp(&b.has_content).reverse())
                .then_with(|| a.path.cmp(&b.path))
        });

        let mut builder = NavigationTreeBuilder::new();
        for doc in sorted {
            if builder.contains(&doc.path) {
                tracing::warn!(path = %doc.path, "Duplicate document path, skipping");
                continue;
            }
            let parent = builder.find_parent(&doc.path);
            builder.add_page(Page::from(doc), parent);
        }

        builder.build()
    }

    /// An empty tree.
    #[must_use]
    pub fn empty() -> Self {
        NavigationTreeBuilder::new().build()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True if the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Node by exact URL path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Page> {
        self.path_index.get(path).map(|&i| &self.pages[i])
    }

    /// All nodes, parents before children.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Resolve URL segments to a page with content.
    ///
    /// Empty segments are ignored and matching is exact and case-sensitive.
    /// Folder nodes have nothing to render and resolve to `None`.
    #[must_use]
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Page> {
        let path = segments
            .iter()
            .map(AsRef::as_ref)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        self.get(&path).filter(|page| page.has_content)
    }

    /// Directory that relative links on the page at `path` resolve against.
    ///
    /// Pages with children are section landing pages (`git/index.md`), so
    /// links resolve inside their own directory. Leaf pages resolve against
    /// their parent directory.
    #[must_use]
    pub fn link_base<'a>(&self, path: &'a str) -> &'a str {
        let has_children = self
            .path_index
            .get(path)
            .is_some_and(|&i| !self.children[i].is_empty());
        if has_children || path.is_empty() {
            path
        } else {
            path.rsplit_once('/').map_or("", |(parent, _)| parent)
        }
    }

    /// Build breadcrumbs for a given path.
    ///
    /// Starts with "Home" (the docs root) followed by ancestor pages. The
    /// current page is not included. Unknown paths get just `[Home]`.
    #[must_use]
    pub fn breadcrumbs(&self, path: &str) -> Vec<BreadcrumbItem> {
        if path.is_empty() {
            return Vec::new();
        }

        let mut breadcrumbs = vec![BreadcrumbItem {
            title: "Home".to_owned(),
            path: String::new(),
        }];

        let Some(&idx) = self.path_index.get(path) else {
            return breadcrumbs;
        };

        let mut ancestors = Vec::new();
        let mut current = self.parents[idx];
        while let Some(i) = current {
            ancestors.push(&self.pages[i]);
            current = self.parents[i];
        }

        // Root page is already represented by Home
        breadcrumbs.extend(
            ancestors
                .iter()
                .rev()
                .filter(|page| !page.path.is_empty())
                .map(|page| BreadcrumbItem {
                    title: page.title.clone(),
                    path: page.path.clone(),
                }),
        );

        breadcrumbs
    }

    /// Sidebar navigation.
    ///
    /// The root page (when it exists) comes first, followed by its children.
    /// Without a root page, top-level nodes are listed. Folders whose subtree
    /// has no content are omitted.
    #[must_use]
    pub fn navigation(&self) -> Vec<NavItem> {
        match self.path_index.get("") {
            Some(&root) => {
                let mut items = Vec::with_capacity(self.children[root].len() + 1);
                if self.pages[root].has_content {
                    items.push(self.leaf_item(root));
                }
                items.extend(self.nav_items(&self.children[root]));
                items
            }
            None => self.nav_items(&self.roots),
        }
    }

    fn nav_items(&self, indices: &[usize]) -> Vec<NavItem> {
        indices
            .iter()
            .filter(|&&i| self.subtree_has_content[i])
            .map(|&i| NavItem {
                children: self.nav_items(&self.children[i]),
                ..self.leaf_item(i)
            })
            .collect()
    }

    fn leaf_item(&self, idx: usize) -> NavItem {
        let page = &self.pages[idx];
        NavItem {
            title: page.title.clone(),
            path: page.path.clone(),
            has_content: page.has_content,
            children: Vec::new(),
        }
    }
}

impl std::fmt::Debug for NavigationTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationTree")
            .field("pages", &self.pages.len())
            .finish_non_exhaustive()
    }
}

/// Builder for constructing [`NavigationTree`] instances.
struct NavigationTreeBuilder {
    pages: Vec<Page>,
    children: Vec<Vec<usize>>,
    parents: Vec<Option<usize>>,
    roots: Vec<usize>,
    path_index: HashMap<String, usize>,
}

impl NavigationTreeBuilder {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            children: Vec::new(),
            parents: Vec::new(),
            roots: Vec::new(),
            path_index: HashMap::new(),
        }
    }

    fn contains(&self, path: &str) -> bool {
        self.path_index.contains_key(path)
    }

    /// Walk up the path hierarchy to the nearest existing ancestor.
    fn find_parent(&self, path: &str) -> Option<usize> {
        let mut current = path;
        while !current.is_empty() {
            let parent = current.rsplit_once('/').map_or("", |(parent, _)| parent);
            if let Some(&idx) = self.path_index.get(parent) {
                return Some(idx);
            }
            current = parent;
        }
        None
    }

    /// Add a page, returning its index.
    fn add_page(&mut self, page: Page, parent_idx: Option<usize>) -> usize {
        let idx = self.pages.len();
        self.path_index.insert(page.path.clone(), idx);
        self.pages.push(page);
        self.children.push(Vec::new());
        self.parents.push(parent_idx);

        if let Some(parent) = parent_idx {
            self.children[parent].push(idx);
        } else {
            self.roots.push(idx);
        }

        idx
    }

    fn build(mut self) -> NavigationTree {
        let pages = &self.pages;
        let sort_key = |&i: &usize| (pages[i].order.is_none(), pages[i].order, pages[i].path.clone());
        for children in &mut self.children {
            children.sort_by_key(sort_key);
        }
        self.roots.sort_by_key(sort_key);

        let subtree_has_content =
            compute_subtree_has_content(&self.pages, &self.children, &self.roots);

        NavigationTree {
            pages: self.pages,
            children: self.children,
            parents: self.parents,
            roots: self.roots,
            path_index: self.path_index,
            subtree_has_content,
        }
    }
}
