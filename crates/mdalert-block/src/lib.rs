//! Line-oriented Markdown block tokenizer with pluggable rules and renderers.
//!
//! This crate is the host that block-level extensions plug into. It provides:
//!
//! - [`BlockState`]: per-line offsets and the ambient parser context
//!   (`parent_type`, `line_max`, `blk_indent`) that rules read and mutate
//! - [`Ruler`]: an ordered registry of named [`BlockRule`]s with alternate
//!   chains used to decide which rules may interrupt a paragraph or quote
//! - [`BlockParser`]: the recursive `tokenize` entry point container rules
//!   call back into for their interior lines
//! - [`SyntaxNode`]: a tree built from the flat [`Token`] stream
//! - [`Renderer`]: name-keyed render callbacks with Markdown and HTML defaults
//!
//! Inline markup is carried verbatim in `inline` tokens. The HTML renderer
//! escapes it; the Markdown renderer re-emits it unchanged.
//!
//! # Example
//!
//! ```
//! use mdalert_block::{BlockParser, Renderer, SyntaxNode};
//!
//! let parser = BlockParser::commonmark();
//! let tree = SyntaxNode::from_tokens(parser.parse("> quoted\n\n- a\n- b\n")).unwrap();
//!
//! assert_eq!(Renderer::markdown().render(&tree), "> quoted\n\n- a\n- b\n");
//! assert_eq!(
//!     Renderer::html().render(&tree),
//!     "<blockquote>\n<p>quoted</p>\n</blockquote>\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
//! );
//! ```

mod error;
mod fence;
mod html;
mod markdown;
mod parser;
mod render;
mod ruler;
pub mod rules;
mod state;
mod token;
mod tree;

pub use error::{RulerError, TreeError};
pub use html::escape_html;
pub use markdown::prefix_lines;
pub use parser::{BlockParser, DEFAULT_MAX_NESTING};
pub use render::{OutputFormat, RenderContext, RenderFn, Renderer};
pub use ruler::{BlockRule, Ruler};
pub use state::{BlockState, ParentType, QuoteFrame};
pub use token::Token;
pub use tree::{NodeTokens, SyntaxNode, Walk};
