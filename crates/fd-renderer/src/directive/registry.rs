//! Component trait and the fixed registry of known components.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::DirectiveArgs;
use super::components::{Callout, Card, Cards, Steps, Tab, Tabs};
use super::replacements::Replacements;
use crate::html::LinkResolver;

/// Whether a component wraps content or stands alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    /// `:::name` ... `:::`
    Container,
    /// `::name`
    Leaf,
}

/// Per-compilation state shared by component handlers.
pub(crate) struct ComponentContext<'a> {
    pub(crate) links: &'a LinkResolver,
    pub(crate) tab_groups: Vec<TabGroup>,
    pub(crate) next_tabs_id: usize,
    pub(crate) replacements: Replacements,
}

impl<'a> ComponentContext<'a> {
    pub(crate) fn new(links: &'a LinkResolver) -> Self {
        Self {
            links,
            tab_groups: Vec::new(),
            next_tabs_id: 0,
            replacements: Replacements::default(),
        }
    }
}

/// An open `:::tabs` group and the titles of its tabs so far.
pub(crate) struct TabGroup {
    pub(crate) id: usize,
    pub(crate) titles: Vec<String>,
}

/// Handler for one named component.
///
/// Handlers are stateless; anything that must survive between `open` and
/// `close` lives in the [`ComponentContext`]. Errors are messages that the
/// processor reports as invalid attributes of this component.
pub(crate) trait Component: Send + Sync {
    fn name(&self) -> &'static str;

    fn kind(&self) -> ComponentKind;

    /// Attribute keys this component understands; others produce a warning.
    fn attributes(&self) -> &'static [&'static str] {
        &[]
    }

    /// Container this component must be placed directly inside.
    fn parent(&self) -> Option<&'static str> {
        None
    }

    fn open(&self, args: &DirectiveArgs, ctx: &mut ComponentContext<'_>)
    -> Result<String, String>;

    fn close(&self, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        Ok(String::new())
    }
}

const BUILTIN_COMPONENTS: &[&dyn Component] = &[&Callout, &Steps, &Cards, &Card, &Tabs, &Tab];

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| Registry::new(BUILTIN_COMPONENTS));

/// Fixed mapping from component names to their handlers.
///
/// Built once; markup naming anything outside it fails to compile.
pub struct Registry {
    components: BTreeMap<&'static str, &'static dyn Component>,
}

impl Registry {
    fn new(components: &[&'static dyn Component]) -> Self {
        Self {
            components: components.iter().map(|c| (c.name(), *c)).collect(),
        }
    }

    /// The registry of built-in components.
    #[must_use]
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    pub(crate) fn get(&self, name: &str) -> Option<&'static dyn Component> {
        self.components.get(name).copied()
    }

    /// Whether `name` is a registered component.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Kind of the named component.
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<ComponentKind> {
        self.get(name).map(|c| c.kind())
    }

    /// Registered component names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.keys().copied()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
