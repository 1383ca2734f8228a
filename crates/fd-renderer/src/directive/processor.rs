//! Component preprocessing.
//!
//! Runs before pulldown-cmark. Directive lines outside code blocks are
//! validated against the registry and replaced with HTML blocks; everything
//! else passes through. Any malformed directive fails the whole pass.

use super::parser::{DirectiveLine, parse_line};
use super::registry::{Component, ComponentContext, ComponentKind, Registry};
use super::DirectiveArgs;
use crate::error::CompileError;
use crate::fence::CodeBlocks;
use crate::html::LinkResolver;

struct OpenComponent {
    component: &'static dyn Component,
    line: usize,
}

/// Expands component directives for a single compilation.
pub(crate) struct DirectiveProcessor<'a> {
    registry: &'static Registry,
    ctx: ComponentContext<'a>,
    open: Vec<OpenComponent>,
    warnings: Vec<String>,
}

impl<'a> DirectiveProcessor<'a> {
    pub(crate) fn new(registry: &'static Registry, links: &'a LinkResolver) -> Self {
        Self {
            registry,
            ctx: ComponentContext::new(links),
            open: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Replace directive lines with HTML blocks.
    ///
    /// Each emitted block is surrounded by blank lines so markdown between
    /// an opening and closing directive is still parsed as markdown. The
    /// block keeps the directive's indentation so it nests in list items.
    pub(crate) fn process(&mut self, input: &str) -> Result<String, CompileError> {
        let code = CodeBlocks::scan(input);
        let mut output = String::with_capacity(input.len());

        for (idx, line) in input.lines().enumerate() {
            let line_num = idx + 1;
            if idx > 0 {
                output.push('\n');
            }

            if code.contains(line_num) {
                output.push_str(line);
                continue;
            }

            match parse_line(line) {
                Some(directive) => match self.dispatch(directive, line_num)? {
                    Some(html) => {
                        let indent = &line[..line.len() - line.trim_start().len()];
                        output.push('\n');
                        for (i, html_line) in html.lines().enumerate() {
                            if i > 0 {
                                output.push('\n');
                            }
                            output.push_str(indent);
                            output.push_str(html_line);
                        }
                        output.push('\n');
                    }
                    None => output.push_str(line),
                },
                None => output.push_str(line),
            }
        }

        if input.ends_with('\n') {
            output.push('\n');
        }

        if let Some(line) = code.unterminated() {
            return Err(CompileError::UnterminatedCodeBlock { line });
        }
        if let Some(open) = self.open.last() {
            return Err(CompileError::UnclosedComponent {
                name: open.component.name().to_owned(),
                line: open.line,
            });
        }

        Ok(output)
    }

    /// Apply deferred replacements to the rendered HTML and return warnings.
    pub(crate) fn finish(self, html: &mut String) -> Vec<String> {
        self.ctx.replacements.apply(html);
        self.warnings
    }

    /// Expand one directive. `Ok(None)` leaves the line as plain text.
    fn dispatch(
        &mut self,
        directive: DirectiveLine<'_>,
        line: usize,
    ) -> Result<Option<String>, CompileError> {
        let html = match directive {
            DirectiveLine::Close => {
                let open = self
                    .open
                    .pop()
                    .ok_or(CompileError::UnexpectedClose { line })?;
                let component = open.component;
                component
                    .close(&mut self.ctx)
                    .map_err(|message| invalid(component.name(), message, line))?
            }
            // A broken tail only fails the page for a registered component
            DirectiveLine::Malformed { name, message } => match self.registry.get(name) {
                Some(component) => return Err(invalid(component.name(), message, line)),
                None => return Ok(None),
            },
            DirectiveLine::Leaf { name, label, attrs } => {
                self.open_component(name, label, attrs, ComponentKind::Leaf, line)?
            }
            DirectiveLine::Open { name, label, attrs } => {
                self.open_component(name, label, attrs, ComponentKind::Container, line)?
            }
        };
        Ok(Some(html))
    }

    fn lookup(&self, name: &str, line: usize) -> Result<&'static dyn Component, CompileError> {
        self.registry
            .get(name)
            .ok_or_else(|| CompileError::UnknownComponent {
                name: name.to_owned(),
                line,
            })
    }

    fn open_component(
        &mut self,
        name: &str,
        label: &str,
        attrs: &str,
        written_as: ComponentKind,
        line: usize,
    ) -> Result<String, CompileError> {
        let component = self.lookup(name, line)?;

        if component.kind() != written_as {
            let message = match component.kind() {
                ComponentKind::Container => format!("is a container, open it with :::{name}"),
                ComponentKind::Leaf => format!("is a leaf, write it as ::{name}"),
            };
            return Err(invalid(name, message, line));
        }

        if let Some(parent) = component.parent() {
            let enclosing = self.open.last().map(|open| open.component.name());
            if enclosing != Some(parent) {
                return Err(invalid(
                    name,
                    format!("must be placed directly inside :::{parent}"),
                    line,
                ));
            }
        }

        let args = DirectiveArgs::parse(label, attrs).map_err(|message| invalid(name, message, line))?;
        for key in args.attrs.keys() {
            if !component.attributes().contains(&key.as_str()) {
                self.warnings
                    .push(format!("line {line}: unknown attribute '{key}' on '{name}' ignored"));
            }
        }

        let html = component
            .open(&args, &mut self.ctx)
            .map_err(|message| invalid(name, message, line))?;

        if component.kind() == ComponentKind::Container {
            self.open.push(OpenComponent { component, line });
        }
        Ok(html)
    }
}

fn invalid(component: &str, message: impl Into<String>, line: usize) -> CompileError {
    CompileError::InvalidAttribute {
        component: component.to_owned(),
        message: message.into(),
        line,
    }
}
