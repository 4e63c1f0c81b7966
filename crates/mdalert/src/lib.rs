//! GitHub-style alerts for the `mdalert-block` tokenizer.
//!
//! An alert is a blockquote whose first line carries a marker:
//!
//! ```markdown
//! > [!WARNING]
//! > Back up your data first.
//! ```
//!
//! The legacy `**Note**` and `**Warning**` markers are recognized as well.
//! [`AlertsPlugin`] installs a block rule that turns such quotes into `alert`
//! nodes, and render callbacks that write them back as canonical Markdown
//! (`[!WARNING]` on its own line) or as an HTML `<div>`.
//!
//! # Example
//!
//! ```
//! use mdalert::{AlertFormatter, AlertOptions};
//!
//! let formatter = AlertFormatter::new(AlertOptions::default())?;
//!
//! assert_eq!(
//!     formatter.to_markdown("> [!tip]\n> Use this.\n")?,
//!     "[!TIP]\n\nUse this.\n"
//! );
//! assert_eq!(
//!     formatter.to_html("> [!TIP]\n> Use this.\n")?,
//!     "<div class=\"markdown-alert markdown-alert-tip\">\n\
//!      <p class=\"markdown-alert-title\">Tip</p>\n\
//!      <p>Use this.</p>\n\
//!      </div>"
//! );
//! # Ok::<(), mdalert::AlertError>(())
//! ```

mod error;
mod kind;
mod options;
mod pattern;
mod recognizer;
mod serializer;

use std::sync::Arc;

use mdalert_block::{BlockParser, Renderer, SyntaxNode};

pub use error::AlertError;
pub use kind::AlertKind;
pub use options::{AlertOptions, DEFAULT_CLASS_PREFIX, LabelSet, MarkdownStyle};
pub use pattern::{LABEL_GROUP, MarkerGrammar, MarkerMatch, PatternTable, TAIL_GROUP};
pub use recognizer::{
    ALERT_CLOSE, ALERT_NODE, ALERT_OPEN, AlertRecognizer, META_LABEL, META_TAIL,
    SavedTokenizerState,
};
pub use serializer::{AlertNode, AlertSerializer};

/// Rule name the recognizer is registered under, ahead of `blockquote`.
const ANCHOR_RULE: &str = "blockquote";

/// Alternate chains the alert rule joins, so an alert can interrupt a
/// paragraph and end a quote or list item like a blockquote does.
const ALERT_ALT: &[&str] = &["paragraph", "blockquote", "list"];

/// Block rule and render callbacks built from one set of options.
#[derive(Debug, Clone)]
pub struct AlertsPlugin {
    recognizer: AlertRecognizer,
    serializer: Arc<AlertSerializer>,
}

impl AlertsPlugin {
    /// Compile the marker grammars for `options`.
    pub fn new(options: AlertOptions) -> Result<Self, AlertError> {
        let patterns = PatternTable::from_options(&options)?;
        Ok(Self::with_patterns(patterns, options))
    }

    /// Plugin using a custom pattern table.
    #[must_use]
    pub fn with_patterns(patterns: PatternTable, options: AlertOptions) -> Self {
        Self {
            recognizer: AlertRecognizer::new(patterns, options.parse_nested),
            serializer: Arc::new(AlertSerializer::new(options)),
        }
    }

    #[must_use]
    pub fn recognizer(&self) -> &AlertRecognizer {
        &self.recognizer
    }

    #[must_use]
    pub fn serializer(&self) -> &AlertSerializer {
        &self.serializer
    }

    /// Register the alert rule right before the `blockquote` rule.
    pub fn install(&self, parser: &mut BlockParser) -> Result<(), AlertError> {
        parser
            .ruler
            .before(ANCHOR_RULE, ALERT_NODE, self.recognizer.clone(), ALERT_ALT)?;
        tracing::debug!(
            grammars = self.recognizer.patterns().grammars().len(),
            "Registered alert block rule"
        );
        Ok(())
    }

    /// Register the `alert` render callback.
    pub fn install_renderers(&self, renderer: &mut Renderer) {
        let serializer = Arc::clone(&self.serializer);
        renderer.register(ALERT_NODE, move |node, ctx| serializer.render(node, ctx));
        tracing::debug!(format = ?renderer.format(), "Registered alert renderer");
    }
}

/// Parser plus Markdown and HTML renderers with alerts installed.
#[derive(Debug, Clone)]
pub struct AlertFormatter {
    parser: BlockParser,
    markdown: Renderer,
    html: Renderer,
}

impl AlertFormatter {
    pub fn new(options: AlertOptions) -> Result<Self, AlertError> {
        let plugin = AlertsPlugin::new(options)?;

        let mut parser = BlockParser::commonmark();
        plugin.install(&mut parser)?;
        let mut markdown = Renderer::markdown();
        plugin.install_renderers(&mut markdown);
        let mut html = Renderer::html();
        plugin.install_renderers(&mut html);

        Ok(Self {
            parser,
            markdown,
            html,
        })
    }

    /// Set the container depth limit of the parser.
    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.parser.max_nesting = max_nesting;
        self
    }

    #[must_use]
    pub fn parser(&self) -> &BlockParser {
        &self.parser
    }

    /// Parse a document into a syntax tree.
    pub fn parse(&self, src: &str) -> Result<SyntaxNode, AlertError> {
        Ok(self.parser.parse_tree(src)?)
    }

    /// Normalize a document, writing alerts in canonical form.
    pub fn to_markdown(&self, src: &str) -> Result<String, AlertError> {
        Ok(self.markdown.render(&self.parse(src)?))
    }

    pub fn to_html(&self, src: &str) -> Result<String, AlertError> {
        Ok(self.html.render(&self.parse(src)?))
    }
}

/// Parse `src` with alerts recognized.
pub fn parse(src: &str, options: AlertOptions) -> Result<SyntaxNode, AlertError> {
    AlertFormatter::new(options)?.parse(src)
}

/// Render `src` as normalized Markdown.
pub fn render_markdown(src: &str, options: AlertOptions) -> Result<String, AlertError> {
    AlertFormatter::new(options)?.to_markdown(src)
}

/// Render `src` as HTML.
pub fn render_html(src: &str, options: AlertOptions) -> Result<String, AlertError> {
    AlertFormatter::new(options)?.to_html(src)
}

/// Every alert in `tree`, outer alerts before the alerts nested in them.
#[must_use]
pub fn collect_alerts(tree: &SyntaxNode) -> Vec<AlertNode<'_>> {
    tree.walk()
        .filter(|node| AlertNode::is_alert(node))
        .map(AlertNode::from_syntax)
        .collect()
}
