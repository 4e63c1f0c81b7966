//! Block parser: rule set plus the tokenize loop.

use std::borrow::Cow;

use crate::error::TreeError;
use crate::rules;
use crate::ruler::Ruler;
use crate::state::BlockState;
use crate::token::Token;
use crate::tree::SyntaxNode;

/// Container depth beyond which nested blocks are not tokenized.
pub const DEFAULT_MAX_NESTING: usize = 20;

/// Block-level parser.
///
/// Holds the ordered rule set. Container rules call [`BlockParser::tokenize`]
/// back through [`BlockState::md`] to parse their interior lines.
#[derive(Debug, Clone)]
pub struct BlockParser {
    pub ruler: Ruler,
    pub max_nesting: usize,
}

impl Default for BlockParser {
    fn default() -> Self {
        Self::commonmark()
    }
}

impl BlockParser {
    /// Parser with no rules registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ruler: Ruler::new(),
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    /// Parser with the built-in block rules.
    #[must_use]
    pub fn commonmark() -> Self {
        const ALL: &[&str] = &["paragraph", "blockquote", "list"];

        let ruler = Ruler::new()
            .with_builtin("code", rules::code, &[])
            .with_builtin("fence", rules::fence, ALL)
            .with_builtin("blockquote", rules::blockquote, ALL)
            .with_builtin("hr", rules::hr, ALL)
            .with_builtin("list", rules::list, &["paragraph", "blockquote"])
            .with_builtin("heading", rules::heading, &["paragraph", "blockquote"])
            .with_builtin("paragraph", rules::paragraph, &[]);

        Self {
            ruler,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }

    /// Set the container depth limit.
    #[must_use]
    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    /// Tokenize lines `[start, end)` into `state.tokens`.
    ///
    /// Stops early at a line indented less than `state.blk_indent`, which
    /// belongs to an enclosing container.
    pub fn tokenize(&self, state: &mut BlockState<'_>, start: usize, end: usize) {
        let mut line = start;
        let mut has_empty_lines = false;

        while line < end {
            line = state.skip_empty_lines(line);
            state.line = line;
            if line >= end || state.s_count[line] < state.blk_indent {
                break;
            }
            if state.level >= self.max_nesting {
                tracing::trace!(line, level = state.level, "Nesting limit reached");
                state.line = end;
                break;
            }

            let matched = self
                .ruler
                .chain("")
                .any(|rule| rule.check(state, line, end, false));
            if !matched {
                tracing::warn!(line, "No block rule matched, skipping line");
                state.line = line + 1;
            } else if state.line <= line {
                tracing::warn!(line, "Block rule did not advance, skipping line");
                state.line = line + 1;
            }

            state.tight = !has_empty_lines;
            if state.is_empty(state.line - 1) {
                has_empty_lines = true;
            }

            line = state.line;
            if line < end && state.is_empty(line) {
                has_empty_lines = true;
                line += 1;
                state.line = line;
            }
        }
    }

    /// Parse a document into a flat token stream.
    #[must_use]
    pub fn parse(&self, src: &str) -> Vec<Token> {
        let src = normalize(src);
        let mut state = BlockState::new(&src, self);
        let end = state.line_max;
        self.tokenize(&mut state, 0, end);
        state.tokens
    }

    /// Parse a document into a syntax tree.
    pub fn parse_tree(&self, src: &str) -> Result<SyntaxNode, TreeError> {
        SyntaxNode::from_tokens(self.parse(src))
    }
}

/// Unify line endings and replace NUL characters.
fn normalize(src: &str) -> Cow<'_, str> {
    if !src.contains(['\r', '\0']) {
        return Cow::Borrowed(src);
    }
    Cow::Owned(
        src.replace("\r\n", "\n")
            .replace('\r', "\n")
            .replace('\0', "\u{FFFD}"),
    )
}
