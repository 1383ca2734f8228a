//! Built-in components.

use std::fmt::Write;

use super::DirectiveArgs;
use super::registry::{Component, ComponentContext, ComponentKind, TabGroup};
use crate::html::{SVG_ALERT, SVG_INFO, SVG_LIGHTBULB, SVG_STOP};
use crate::state::escape_html;

/// `:::callout[Title]{type="info|warn|error|tip" title="..."}`
pub(crate) struct Callout;

impl Component for Callout {
    fn name(&self) -> &'static str {
        "callout"
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Container
    }

    fn attributes(&self) -> &'static [&'static str] {
        &["type", "title"]
    }

    fn open(&self, args: &DirectiveArgs, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        let (class, icon, default_title) = match args.get("type").unwrap_or("info") {
            "info" => ("info", SVG_INFO, "Info"),
            "warn" => ("warn", SVG_ALERT, "Warning"),
            "error" => ("error", SVG_STOP, "Error"),
            "tip" => ("tip", SVG_LIGHTBULB, "Tip"),
            other => {
                return Err(format!(
                    "unknown type '{other}' (expected info, warn, error or tip)"
                ));
            }
        };
        let title = args.get_or_label("title").unwrap_or(default_title);

        Ok(format!(
            r#"<div class="callout callout-{class}" role="note"><div class="callout-title">{icon}{}</div><div class="callout-content">"#,
            escape_html(title)
        ))
    }

    fn close(&self, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        Ok("</div></div>".to_owned())
    }
}

/// `:::steps`: each `###` heading inside becomes a numbered step.
pub(crate) struct Steps;

impl Component for Steps {
    fn name(&self) -> &'static str {
        "steps"
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Container
    }

    fn open(&self, _args: &DirectiveArgs, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        Ok(r#"<div class="steps">"#.to_owned())
    }

    fn close(&self, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        Ok("</div>".to_owned())
    }
}

/// `:::cards`: grid of `::card` links.
pub(crate) struct Cards;

impl Component for Cards {
    fn name(&self) -> &'static str {
        "cards"
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Container
    }

    fn open(&self, _args: &DirectiveArgs, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        Ok(r#"<div class="cards">"#.to_owned())
    }

    fn close(&self, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        Ok("</div>".to_owned())
    }
}

/// `::card[Title]{href="..." description="..."}`
pub(crate) struct Card;

impl Component for Card {
    fn name(&self) -> &'static str {
        "card"
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Leaf
    }

    fn attributes(&self) -> &'static [&'static str] {
        &["title", "href", "description"]
    }

    fn parent(&self) -> Option<&'static str> {
        Some("cards")
    }

    fn open(&self, args: &DirectiveArgs, ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        let title = args
            .get_or_label("title")
            .filter(|t| !t.trim().is_empty())
            .ok_or("missing required 'title'")?;
        let href = args
            .get("href")
            .filter(|h| !h.trim().is_empty())
            .ok_or("missing required 'href'")?;
        let href = ctx.links.resolve(href);

        let mut html = format!(
            r#"<div class="card"><a class="card-link" href="{}"><span class="card-title">{}</span>"#,
            escape_html(&href),
            escape_html(title)
        );
        if let Some(description) = args.get("description").filter(|d| !d.is_empty()) {
            write!(
                html,
                r#"<span class="card-description">{}</span>"#,
                escape_html(description)
            )
            .unwrap();
        }
        html.push_str("</a></div>");
        Ok(html)
    }
}

/// `:::tabs`: a group of `:::tab` panels with a generated tab list.
pub(crate) struct Tabs;

impl Tabs {
    fn placeholder(id: usize) -> String {
        format!("<!--fd-tablist-{id}-->")
    }
}

impl Component for Tabs {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Container
    }

    fn open(&self, _args: &DirectiveArgs, ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        let id = ctx.next_tabs_id;
        ctx.next_tabs_id += 1;
        ctx.tab_groups.push(TabGroup {
            id,
            titles: Vec::new(),
        });
        Ok(format!(
            "<div class=\"tabs\" id=\"tabs-{id}\">\n{}",
            Self::placeholder(id)
        ))
    }

    fn close(&self, ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        let group = ctx
            .tab_groups
            .pop()
            .ok_or("closing tabs without an open group")?;
        if group.titles.is_empty() {
            return Err("requires at least one :::tab".to_owned());
        }

        let mut list = String::from(r#"<div class="tab-list" role="tablist">"#);
        for (index, title) in group.titles.iter().enumerate() {
            write!(
                list,
                r#"<button type="button" role="tab" id="tabs-{id}-tab-{index}" aria-controls="tabs-{id}-panel-{index}" aria-selected="{}">{}</button>"#,
                index == 0,
                escape_html(title),
                id = group.id,
            )
            .unwrap();
        }
        list.push_str("</div>");

        ctx.replacements.add(Self::placeholder(group.id), list);
        Ok("</div>".to_owned())
    }
}

/// `:::tab[Title]` inside `:::tabs`.
pub(crate) struct Tab;

impl Component for Tab {
    fn name(&self) -> &'static str {
        "tab"
    }

    fn kind(&self) -> ComponentKind {
        ComponentKind::Container
    }

    fn attributes(&self) -> &'static [&'static str] {
        &["title"]
    }

    fn parent(&self) -> Option<&'static str> {
        Some("tabs")
    }

    fn open(&self, args: &DirectiveArgs, ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        let title = args
            .get_or_label("title")
            .filter(|t| !t.trim().is_empty())
            .ok_or("missing required 'title'")?;
        let group = ctx
            .tab_groups
            .last_mut()
            .ok_or("must be placed inside :::tabs")?;

        let index = group.titles.len();
        group.titles.push(title.to_owned());
        let hidden = if index == 0 { "" } else { " hidden" };

        Ok(format!(
            r#"<div class="tab-panel" role="tabpanel" id="tabs-{id}-panel-{index}" aria-labelledby="tabs-{id}-tab-{index}"{hidden}>"#,
            id = group.id,
        ))
    }

    fn close(&self, _ctx: &mut ComponentContext<'_>) -> Result<String, String> {
        Ok("</div>".to_owned())
    }
}
