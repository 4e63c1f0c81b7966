//! Markdown back-end: re-emits the block structure in normalized form.

use crate::render::{RenderContext, Renderer};
use crate::tree::SyntaxNode;

pub(crate) fn register_defaults(renderer: &mut Renderer) {
    renderer.register("root", |node, ctx| ctx.render_blocks(node.children()));
    renderer.register("paragraph", |node, ctx| ctx.render_children(node).concat());
    renderer.register("inline", |node, _| node.content().to_owned());
    renderer.register("heading", heading);
    renderer.register("hr", |_, _| "---".to_owned());
    renderer.register("code_block", code_block);
    renderer.register("fence", fence);
    renderer.register("blockquote", |node, ctx| {
        prefix_lines(&ctx.render_blocks(node.children()), ">")
    });
    renderer.register("bullet_list", list);
    renderer.register("ordered_list", list);
    renderer.register("list_item", list_item);
}

/// Prefix every line of `text` with `marker` and a space. Empty lines get the
/// bare marker, and empty text yields the marker alone.
///
/// ```
/// assert_eq!(mdalert_block::prefix_lines("a\n\nb", ">"), "> a\n>\n> b");
/// ```
#[must_use]
pub fn prefix_lines(text: &str, marker: &str) -> String {
    if text.is_empty() {
        return marker.to_owned();
    }
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                marker.to_owned()
            } else {
                format!("{marker} {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn heading(node: &SyntaxNode, ctx: &RenderContext<'_>) -> String {
    let markup = node.token().map_or("#", |t| t.markup.as_str());
    let text = ctx.render_children(node).concat();
    if text.is_empty() {
        markup.to_owned()
    } else {
        format!("{markup} {text}")
    }
}

fn code_block(node: &SyntaxNode, _: &RenderContext<'_>) -> String {
    node.content()
        .trim_end_matches('\n')
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn fence(node: &SyntaxNode, _: &RenderContext<'_>) -> String {
    let info = node.token().map_or("", |t| t.info.as_str());
    let content = node.content();

    let marker = if info.contains('`') { '~' } else { '`' };
    let longest = longest_run(content, marker);
    let fence = marker.to_string().repeat((longest + 1).max(3));

    let mut out = format!("{fence}{info}\n{content}");
    if !content.is_empty() && !content.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&fence);
    out
}

fn longest_run(text: &str, marker: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for c in text.chars() {
        if c == marker {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn is_tight(node: &SyntaxNode) -> bool {
    node.token().and_then(|t| t.meta("tight")) == Some("true")
}

fn list(node: &SyntaxNode, ctx: &RenderContext<'_>) -> String {
    let Some(open) = node.token() else {
        return String::new();
    };
    let ordered = node.node_type() == "ordered_list";
    let mut number: u64 = open.info.parse().unwrap_or(1);

    let items: Vec<String> = node
        .children()
        .iter()
        .map(|item| {
            let marker = if ordered {
                let marker = format!("{number}{}", open.markup);
                number += 1;
                marker
            } else {
                open.markup.clone()
            };
            indent_item(&marker, &ctx.render(item))
        })
        .collect();

    let separator = if is_tight(node) { "\n" } else { "\n\n" };
    items.join(separator)
}

fn list_item(node: &SyntaxNode, ctx: &RenderContext<'_>) -> String {
    let separator = if is_tight(node) { "\n" } else { "\n\n" };
    ctx.render_children(node).join(separator)
}

/// Put `marker` before the first line and align the rest under the content.
fn indent_item(marker: &str, body: &str) -> String {
    if body.is_empty() {
        return marker.to_owned();
    }
    let indent = " ".repeat(marker.len() + 1);
    body.split('\n')
        .enumerate()
        .map(|(i, line)| match (i, line.is_empty()) {
            (0, _) => format!("{marker} {line}"),
            (_, true) => String::new(),
            (_, false) => format!("{indent}{line}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
