//! HTML back-end.
//!
//! Produces plain HTML5 block elements. Inline content is escaped, not parsed.

use std::borrow::Cow;

use crate::render::{RenderContext, Renderer};
use crate::tree::SyntaxNode;

pub(crate) fn register_defaults(renderer: &mut Renderer) {
    renderer.register("root", |node, ctx| ctx.render_blocks(node.children()));
    renderer.register("paragraph", paragraph);
    renderer.register("inline", |node, _| escape_html(node.content()).into_owned());
    renderer.register("heading", heading);
    renderer.register("hr", |_, _| "<hr>".to_owned());
    renderer.register("code_block", |node, _| code(None, node.content()));
    renderer.register("fence", |node, _| {
        let lang = node
            .token()
            .and_then(|t| t.info.split_whitespace().next());
        code(lang, node.content())
    });
    renderer.register("blockquote", |node, ctx| {
        wrap_block("blockquote", "", &ctx.render_blocks(node.children()))
    });
    renderer.register("bullet_list", |node, ctx| {
        wrap_block("ul", "", &ctx.render_blocks(node.children()))
    });
    renderer.register("ordered_list", |node, ctx| {
        let attrs = match node.token().and_then(|t| t.attr("start")) {
            Some(start) => format!(r#" start="{}""#, escape_html(start)),
            None => String::new(),
        };
        wrap_block("ol", &attrs, &ctx.render_blocks(node.children()))
    });
    renderer.register("list_item", list_item);
}

/// Escape `&`, `<`, `>` and `"` for use in HTML text and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }
    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// `<tag attrs>\ninner\n</tag>`, with the inner line omitted when empty.
fn wrap_block(tag: &str, attrs: &str, inner: &str) -> String {
    if inner.is_empty() {
        format!("<{tag}{attrs}>\n</{tag}>")
    } else {
        format!("<{tag}{attrs}>\n{inner}\n</{tag}>")
    }
}

fn paragraph(node: &SyntaxNode, ctx: &RenderContext<'_>) -> String {
    let inner = ctx.render_children(node).concat();
    if node.hidden() {
        inner
    } else {
        format!("<p>{inner}</p>")
    }
}

fn heading(node: &SyntaxNode, ctx: &RenderContext<'_>) -> String {
    let tag = node.token().map_or("h1", |t| t.tag.as_str());
    format!("<{tag}>{}</{tag}>", ctx.render_children(node).concat())
}

fn code(lang: Option<&str>, content: &str) -> String {
    match lang {
        Some(lang) => format!(
            r#"<pre><code class="language-{}">{}</code></pre>"#,
            escape_html(lang),
            escape_html(content)
        ),
        None => format!("<pre><code>{}</code></pre>", escape_html(content)),
    }
}

/// Tight items keep their text on the `<li>` line; block children still get
/// their own lines.
fn list_item(node: &SyntaxNode, ctx: &RenderContext<'_>) -> String {
    let children = node.children();
    let inner = ctx.render_blocks(children);
    if inner.is_empty() {
        return "<li></li>".to_owned();
    }

    let hidden_paragraph = |child: Option<&SyntaxNode>| {
        child.is_some_and(|c| c.node_type() == "paragraph" && c.hidden())
    };
    let lead = if hidden_paragraph(children.first()) { "" } else { "\n" };
    let tail = if hidden_paragraph(children.last()) { "" } else { "\n" };
    format!("<li>{lead}{inner}{tail}</li>")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::BlockParser;

    fn render(src: &str) -> String {
        let tree = BlockParser::commonmark().parse_tree(src).unwrap();
        Renderer::html().render(&tree)
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert!(matches!(escape_html("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape_html(r#"<a href="x">&</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_paragraph_escaped() {
        assert_eq!(render("a < b & c\n"), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_heading_and_hr() {
        assert_eq!(render("### Three\n\n---\n"), "<h3>Three</h3>\n<hr>");
    }

    #[test]
    fn test_code_blocks() {
        assert_eq!(
            render("```rust ignore\nfn main() {}\n```\n"),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
        assert_eq!(render("    <x>\n"), "<pre><code>&lt;x&gt;\n</code></pre>");
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            render("> a\n>\n> b\n"),
            "<blockquote>\n<p>a</p>\n<p>b</p>\n</blockquote>"
        );
        assert_eq!(render(">\n"), "<blockquote>\n</blockquote>");
    }

    #[test]
    fn test_tight_list() {
        assert_eq!(render("- a\n- b\n"), "<ul>\n<li>a</li>\n<li>b</li>\n</ul>");
    }

    #[test]
    fn test_loose_ordered_list() {
        assert_eq!(
            render("2. a\n\n3. b\n"),
            "<ol start=\"2\">\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ol>"
        );
    }

    #[test]
    fn test_tight_item_with_nested_list() {
        assert_eq!(
            render("- a\n  - b\n"),
            "<ul>\n<li>a\n<ul>\n<li>b</li>\n</ul>\n</li>\n</ul>"
        );
    }
}
