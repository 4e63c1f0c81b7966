//! Alert rendering.
//!
//! [`AlertNode`] is a typed view over an `alert` syntax node. The
//! [`AlertSerializer`] turns it into Markdown (the canonical `[!LABEL]` form,
//! optionally re-quoted) or into an HTML `<div>` with a title paragraph.

use std::borrow::Cow;
use std::ops::Range;

use mdalert_block::{OutputFormat, RenderContext, SyntaxNode, escape_html, prefix_lines};

use crate::kind::AlertKind;
use crate::options::{AlertOptions, MarkdownStyle};
use crate::recognizer::{ALERT_CLOSE, ALERT_NODE, ALERT_OPEN, META_LABEL, META_TAIL};

/// A recognized alert, borrowed from the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertNode<'a> {
    pub kind: AlertKind,
    /// Text that followed the marker on its line, possibly empty.
    pub inline_tail: &'a str,
    /// Source lines of the whole alert, marker line included.
    pub line_range: Range<usize>,
    pub children: &'a [SyntaxNode],
}

impl<'a> AlertNode<'a> {
    /// View an `alert` node.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a paired `alert_open` / `alert_close` node
    /// carrying a label and a source map. That means the tokens were not
    /// produced by the alert rule.
    #[must_use]
    pub fn from_syntax(node: &'a SyntaxNode) -> Self {
        let Some((open, close)) = node.nester_tokens() else {
            panic!(
                "alert renderer called on non-container node `{}`",
                node.node_type()
            );
        };
        assert!(
            open.kind == ALERT_OPEN && close.kind == ALERT_CLOSE,
            "alert renderer called on `{}` / `{}` tokens",
            open.kind,
            close.kind
        );
        let Some(label) = open.meta(META_LABEL) else {
            panic!("alert_open token without a label");
        };
        let Some((start, end)) = open.map else {
            panic!("alert_open token without a source map");
        };

        Self {
            kind: AlertKind::from_label(label),
            inline_tail: open.meta(META_TAIL).unwrap_or(""),
            line_range: start..end,
            children: node.children(),
        }
    }

    /// Whether `node` is an alert node.
    #[must_use]
    pub fn is_alert(node: &SyntaxNode) -> bool {
        node.node_type() == ALERT_NODE
    }

    /// The paragraph the inline tail continues.
    ///
    /// The tail is the first body line, so a paragraph starting on the line
    /// right below the marker is its continuation.
    #[must_use]
    pub fn tail_paragraph(&self) -> Option<&'a SyntaxNode> {
        if self.inline_tail.is_empty() {
            return None;
        }
        self.children.first().filter(|child| {
            child.node_type() == "paragraph"
                && child
                    .map()
                    .is_some_and(|(begin, _)| begin == self.line_range.start + 1)
        })
    }

    /// Children rendered after the tail block.
    fn trailing_children(&self) -> &'a [SyntaxNode] {
        let skip = usize::from(self.tail_paragraph().is_some());
        &self.children[skip..]
    }

    /// Body text with the inline tail as its first line.
    ///
    /// Each entry is the text of one block. An alert written with same-line
    /// text and one with that text on its own line have the same body.
    #[must_use]
    pub fn effective_body(&self) -> Vec<String> {
        let first = match (self.inline_tail, self.tail_paragraph()) {
            ("", _) => None,
            (tail, Some(paragraph)) => Some(format!("{tail}\n{}", paragraph.text())),
            (tail, None) => Some(tail.to_owned()),
        };
        first
            .into_iter()
            .chain(
                self.trailing_children()
                    .iter()
                    .map(SyntaxNode::text)
                    .filter(|text| !text.is_empty()),
            )
            .collect()
    }
}

/// Backslash-escape a line that would otherwise open a block other than a
/// paragraph.
fn escape_block_start(line: &str) -> Cow<'_, str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=9).contains(&digits) && matches!(line.as_bytes().get(digits).copied(), Some(b'.' | b')')) {
        let (number, rest) = line.split_at(digits);
        return Cow::Owned(format!("{number}\\{rest}"));
    }
    match line.chars().next() {
        Some('#' | '>' | '-' | '+' | '*' | '_' | '`' | '~') => Cow::Owned(format!("\\{line}")),
        _ => Cow::Borrowed(line),
    }
}

/// Renders alert nodes for the Markdown and HTML back-ends.
#[derive(Debug, Clone)]
pub struct AlertSerializer {
    options: AlertOptions,
}

impl AlertSerializer {
    #[must_use]
    pub fn new(options: AlertOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &AlertOptions {
        &self.options
    }

    /// Render callback for the `alert` node type.
    #[must_use]
    pub fn render(&self, node: &SyntaxNode, ctx: &RenderContext<'_>) -> String {
        let alert = AlertNode::from_syntax(node);
        let render_child = |child: &SyntaxNode| ctx.render(child);
        match ctx.format() {
            OutputFormat::Markdown => self.render_markdown(&alert, render_child),
            OutputFormat::Html => self.render_html(&alert, render_child),
        }
    }

    /// `[!LABEL]`, then the tail, then the children, separated by blank
    /// lines. A tail continuing a paragraph shares its block. The quoted
    /// style prefixes every line with `>`.
    #[must_use]
    pub fn render_markdown<F>(&self, alert: &AlertNode<'_>, render_child: F) -> String
    where
        F: Fn(&SyntaxNode) -> String,
    {
        let mut blocks = vec![format!("[!{}]", alert.kind.wire_label())];
        if !alert.inline_tail.is_empty() {
            let tail = escape_block_start(alert.inline_tail);
            blocks.push(match alert.tail_paragraph() {
                Some(paragraph) => format!("{tail}\n{}", render_child(paragraph)),
                None => tail.into_owned(),
            });
        }
        blocks.extend(
            alert
                .trailing_children()
                .iter()
                .map(&render_child)
                .filter(|out| !out.is_empty()),
        );

        let bare = blocks.join("\n\n");
        match self.options.markdown_style {
            MarkdownStyle::Bare => bare,
            MarkdownStyle::Quoted => prefix_lines(&bare, ">"),
        }
    }

    /// `<div>` with the title paragraph, the tail paragraph and the rendered
    /// children, one per line.
    #[must_use]
    pub fn render_html<F>(&self, alert: &AlertNode<'_>, render_child: F) -> String
    where
        F: Fn(&SyntaxNode) -> String,
    {
        let prefix = escape_html(&self.options.class_prefix);
        let title = match self.options.icon_for(&alert.kind) {
            Some(icon) => format!("{icon} {}", escape_html(&alert.kind.display_name())),
            None => escape_html(&alert.kind.display_name()).into_owned(),
        };

        let mut lines = vec![
            format!(
                r#"<div class="{prefix} {prefix}-{}">"#,
                escape_html(&alert.kind.css_suffix())
            ),
            format!(r#"<p class="{prefix}-title">{title}</p>"#),
        ];
        if !alert.inline_tail.is_empty() {
            let tail = escape_html(alert.inline_tail);
            lines.push(match alert.tail_paragraph() {
                Some(paragraph) => {
                    let inner: String = paragraph.children().iter().map(&render_child).collect();
                    format!("<p>{tail}\n{inner}</p>")
                }
                None => format!("<p>{tail}</p>"),
            });
        }
        lines.extend(
            alert
                .trailing_children()
                .iter()
                .map(&render_child)
                .filter(|out| !out.is_empty()),
        );
        lines.push("</div>".to_owned());
        lines.join("\n")
    }
}
