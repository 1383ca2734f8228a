//! Component directives.
//!
//! Components are written as whole-line directives and resolved against a
//! fixed [`Registry`]:
//!
//! ```text
//! :::callout{type="warn" title="Careful"}
//! Markdown content.
//! :::
//!
//! :::cards
//! ::card{title="Git" href="./git/index.md" description="Version control"}
//! :::
//! ```
//!
//! Processing is two-phase. Before pulldown-cmark, directive lines become
//! HTML blocks (markdown between them is untouched). After rendering,
//! deferred placeholders such as tab lists are replaced.

mod args;
mod components;
mod parser;
mod processor;
mod registry;
mod replacements;

pub use args::DirectiveArgs;
pub(crate) use processor::DirectiveProcessor;
pub use registry::{ComponentKind, Registry};
