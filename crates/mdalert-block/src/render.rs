//! Name-keyed render registry.
//!
//! A [`Renderer`] maps node types to callbacks. Callbacks receive the node and
//! a [`RenderContext`] they use to render children, so extensions only need to
//! register a callback for their own node type.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::tree::SyntaxNode;
use crate::{html, markdown};

/// Render callback for one node type.
pub type RenderFn = Arc<dyn Fn(&SyntaxNode, &RenderContext<'_>) -> String + Send + Sync>;

/// Output format of a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Markdown,
    Html,
}

/// Renders a syntax tree with registered callbacks.
#[derive(Clone)]
pub struct Renderer {
    format: OutputFormat,
    callbacks: HashMap<String, RenderFn>,
}

impl Renderer {
    /// Markdown renderer with callbacks for every built-in node type.
    ///
    /// Blocks are separated by a blank line and the document ends with a
    /// single newline.
    #[must_use]
    pub fn markdown() -> Self {
        let mut renderer = Self::empty(OutputFormat::Markdown);
        markdown::register_defaults(&mut renderer);
        renderer
    }

    /// HTML renderer with callbacks for every built-in node type.
    ///
    /// Block elements are separated by a newline, with no trailing newline.
    #[must_use]
    pub fn html() -> Self {
        let mut renderer = Self::empty(OutputFormat::Html);
        html::register_defaults(&mut renderer);
        renderer
    }

    /// Renderer with no callbacks.
    #[must_use]
    pub fn empty(format: OutputFormat) -> Self {
        Self {
            format,
            callbacks: HashMap::new(),
        }
    }

    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Add or replace the callback for a node type.
    pub fn register<F>(&mut self, node_type: &str, callback: F)
    where
        F: Fn(&SyntaxNode, &RenderContext<'_>) -> String + Send + Sync + 'static,
    {
        self.callbacks
            .insert(node_type.to_owned(), Arc::new(callback));
    }

    /// Builder form of [`Renderer::register`].
    #[must_use]
    pub fn with_renderer<F>(mut self, node_type: &str, callback: F) -> Self
    where
        F: Fn(&SyntaxNode, &RenderContext<'_>) -> String + Send + Sync + 'static,
    {
        self.register(node_type, callback);
        self
    }

    #[must_use]
    pub fn has_renderer(&self, node_type: &str) -> bool {
        self.callbacks.contains_key(node_type)
    }

    /// Render a tree (usually the root node).
    #[must_use]
    pub fn render(&self, node: &SyntaxNode) -> String {
        let ctx = RenderContext { renderer: self };
        let mut out = ctx.render(node);
        if self.format == OutputFormat::Markdown && !out.is_empty() {
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.callbacks.keys().collect();
        names.sort();
        f.debug_struct("Renderer")
            .field("format", &self.format)
            .field("callbacks", &names)
            .finish()
    }
}

/// Handle passed to render callbacks.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    renderer: &'a Renderer,
}

impl RenderContext<'_> {
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.renderer.format
    }

    /// Render one node through its registered callback.
    ///
    /// Nodes without a callback render as their children.
    #[must_use]
    pub fn render(&self, node: &SyntaxNode) -> String {
        match self.renderer.callbacks.get(node.node_type()) {
            Some(callback) => callback(node, self),
            None => {
                tracing::warn!(
                    node_type = node.node_type(),
                    "No renderer registered, rendering children"
                );
                self.render_blocks(node.children())
            }
        }
    }

    /// Rendered children of `node`, dropping empty output.
    #[must_use]
    pub fn render_children(&self, node: &SyntaxNode) -> Vec<String> {
        self.render_all(node.children())
    }

    /// Separator placed between sibling blocks.
    #[must_use]
    pub fn block_separator(&self) -> &'static str {
        match self.renderer.format {
            OutputFormat::Markdown => "\n\n",
            OutputFormat::Html => "\n",
        }
    }

    /// Render `nodes` and join them with the block separator.
    #[must_use]
    pub fn render_blocks(&self, nodes: &[SyntaxNode]) -> String {
        self.render_all(nodes).join(self.block_separator())
    }

    fn render_all(&self, nodes: &[SyntaxNode]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| self.render(node))
            .filter(|out| !out.is_empty())
            .collect()
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("format", &self.renderer.format)
            .finish_non_exhaustive()
    }
}
