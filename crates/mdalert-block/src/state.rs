//! Line-indexed block parser state.
//!
//! Every source line is described by four offsets:
//!
//! - `b_marks[line]`: byte offset where the line starts
//! - `e_marks[line]`: byte offset of the line end (excluding `\n`)
//! - `t_shift[line]`: bytes of leading whitespace (or masked markers) after `b_marks`
//! - `s_count[line]`: visual column of the first content character
//!
//! Container rules rewrite these for their interior lines (a blockquote moves
//! `b_marks` past the `>` marker, a list item masks its bullet into
//! `t_shift`) and restore them once the nested tokenization returns.

use crate::fence::FenceTracker;
use crate::parser::BlockParser;
use crate::rules::{heading, hr, list};
use crate::token::Token;

const TAB_WIDTH: usize = 4;

/// The container the tokenizer currently believes it is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentType {
    Root,
    Blockquote,
    List,
    Paragraph,
    /// A container introduced by an extension rule.
    Extension(&'static str),
}

impl ParentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Blockquote => "blockquote",
            Self::List => "list",
            Self::Paragraph => "paragraph",
            Self::Extension(name) => name,
        }
    }
}

/// Mutable state threaded through every block rule.
pub struct BlockState<'a> {
    /// Normalized source text.
    pub src: &'a str,
    /// Parser that owns the rule set, used for nested tokenization.
    pub md: &'a BlockParser,
    /// Token stream built so far.
    pub tokens: Vec<Token>,
    pub b_marks: Vec<usize>,
    pub e_marks: Vec<usize>,
    pub t_shift: Vec<usize>,
    pub s_count: Vec<usize>,
    /// Required content indent of the current container.
    pub blk_indent: usize,
    /// Indent of the enclosing list marker, while inside a list item.
    pub list_indent: Option<usize>,
    /// Next line to be processed.
    pub line: usize,
    /// Lines at or beyond this index belong to an enclosing scope.
    pub line_max: usize,
    /// Whether the blocks just tokenized were separated without blank lines.
    pub tight: bool,
    pub parent_type: ParentType,
    /// Current token nesting depth.
    pub level: usize,
    containers: Vec<&'static str>,
}

impl<'a> BlockState<'a> {
    /// Index `src` into lines. A sentinel entry is kept past the last line.
    #[must_use]
    pub fn new(src: &'a str, md: &'a BlockParser) -> Self {
        let mut state = Self {
            src,
            md,
            tokens: Vec::new(),
            b_marks: Vec::new(),
            e_marks: Vec::new(),
            t_shift: Vec::new(),
            s_count: Vec::new(),
            blk_indent: 0,
            list_indent: None,
            line: 0,
            line_max: 0,
            tight: false,
            parent_type: ParentType::Root,
            level: 0,
            containers: Vec::new(),
        };

        let mut start = 0;
        for raw in src.split_inclusive('\n') {
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            state.push_line(start, start + text.len());
            start += raw.len();
        }
        state.line_max = state.b_marks.len();

        state.b_marks.push(src.len());
        state.e_marks.push(src.len());
        state.t_shift.push(0);
        state.s_count.push(0);
        state
    }

    fn push_line(&mut self, begin: usize, end: usize) {
        let (shift, columns) = measure_indent(&self.src[begin..end]);
        self.b_marks.push(begin);
        self.e_marks.push(end);
        self.t_shift.push(shift);
        self.s_count.push(columns);
    }

    /// Whether the line has no content past its indentation.
    #[must_use]
    pub fn is_empty(&self, line: usize) -> bool {
        self.b_marks[line] + self.t_shift[line] >= self.e_marks[line]
    }

    /// First non-empty line at or after `from`, or `line_max`.
    #[must_use]
    pub fn skip_empty_lines(&self, mut from: usize) -> usize {
        while from < self.line_max && self.is_empty(from) {
            from += 1;
        }
        from
    }

    /// Whether the line is indented far enough to be an indented code block.
    #[must_use]
    pub fn is_code_block(&self, line: usize) -> bool {
        self.s_count[line] >= self.blk_indent + 4
    }

    /// Line content after indentation (and any masked markers).
    #[must_use]
    pub fn line_text(&self, line: usize) -> &'a str {
        let src: &'a str = self.src;
        src.get(self.b_marks[line] + self.t_shift[line]..self.e_marks[line])
            .unwrap_or("")
    }

    /// Join lines `[begin, end)` with up to `indent` columns of leading
    /// whitespace removed from each. Masked markers count as indentation.
    #[must_use]
    pub fn get_lines(&self, begin: usize, end: usize, indent: usize, keep_last_lf: bool) -> String {
        let bytes = self.src.as_bytes();
        let mut out = String::new();

        for line in begin..end {
            let line_start = self.b_marks[line];
            let last = if line + 1 < end || keep_last_lf {
                (self.e_marks[line] + 1).min(self.src.len())
            } else {
                self.e_marks[line]
            };

            let mut first = line_start;
            let mut line_indent = 0;
            while first < last && line_indent < indent {
                match bytes[first] {
                    b'\t' => line_indent += TAB_WIDTH - line_indent % TAB_WIDTH,
                    b' ' => line_indent += 1,
                    _ if first - line_start < self.t_shift[line] => line_indent += 1,
                    _ => break,
                }
                first += 1;
            }

            // A tab straddling the indent boundary leaves partial columns.
            if line_indent > indent {
                out.extend(std::iter::repeat_n(' ', line_indent - indent));
            }
            out.push_str(&self.src[first..last]);
        }
        out
    }

    /// Append a token, maintaining `level`.
    pub fn push(&mut self, kind: &str, tag: &str, nesting: i8) -> &mut Token {
        let mut token = Token::new(kind, tag, nesting);
        if nesting < 0 {
            self.level = self.level.saturating_sub(1);
        }
        token.level = self.level;
        if nesting > 0 {
            self.level += 1;
        }
        self.tokens.push(token);
        let last = self.tokens.len() - 1;
        &mut self.tokens[last]
    }

    /// Record that tokenization is entering a named container.
    pub fn enter_container(&mut self, name: &'static str) {
        self.containers.push(name);
    }

    /// Leave the innermost container.
    pub fn leave_container(&mut self) {
        self.containers.pop();
    }

    /// Whether any enclosing container has the given name.
    #[must_use]
    pub fn is_inside(&self, name: &str) -> bool {
        self.containers.iter().any(|c| *c == name)
    }

    /// Names of the enclosing containers, outermost first.
    #[must_use]
    pub fn containers(&self) -> &[&'static str] {
        &self.containers
    }

    /// Ask every enabled rule of `chain` whether it could start at `line`.
    pub fn terminates(&mut self, chain: &str, line: usize, end: usize) -> bool {
        let md = self.md;
        md.ruler.chain(chain).any(|rule| rule.check(self, line, end, true))
    }

    /// Text after the line's `>` marker and one optional space.
    #[must_use]
    pub fn quote_marker_content(&self, line: usize) -> Option<&'a str> {
        let pos = self.quote_marker_end(line)?;
        let src: &'a str = self.src;
        src.get(pos..self.e_marks[line])
    }

    fn quote_marker_end(&self, line: usize) -> Option<usize> {
        let bytes = self.src.as_bytes();
        let end = self.e_marks[line];
        let pos = self.b_marks[line] + self.t_shift[line];
        if pos >= end || bytes[pos] != b'>' {
            return None;
        }
        let pos = pos + 1;
        if pos < end && matches!(bytes[pos], b' ' | b'\t') {
            Some(pos + 1)
        } else {
            Some(pos)
        }
    }

    fn is_quoted(&self, line: usize) -> bool {
        self.s_count[line] >= self.blk_indent
            && !self.is_code_block(line)
            && self.quote_marker_end(line).is_some()
    }

    /// First line after the blockquote that starts at `start`.
    ///
    /// Quoted lines always continue the quote. An unquoted line continues it
    /// lazily only while a paragraph is open inside the quote and the line
    /// would not interrupt that paragraph. A blank line or `end` stops the scan.
    pub fn quote_extent(&mut self, start: usize, end: usize) -> usize {
        let mut scan = QuoteScan::default();
        scan.feed(self.quote_marker_content(start).unwrap_or(""));

        let mut next = start + 1;
        while next < end {
            if self.is_empty(next) {
                break;
            }
            if let Some(content) = self.quoted_content(next) {
                scan.feed(content);
                next += 1;
                continue;
            }
            if !scan.paragraph_open {
                break;
            }

            let parent = std::mem::replace(&mut self.parent_type, ParentType::Paragraph);
            let interrupts = self.terminates("paragraph", next, end);
            self.parent_type = parent;
            if interrupts {
                break;
            }
            next += 1;
        }
        next
    }

    fn quoted_content(&self, line: usize) -> Option<&'a str> {
        if self.is_quoted(line) {
            self.quote_marker_content(line)
        } else {
            None
        }
    }

    /// Move `b_marks` of every quoted line in `[start, end)` past its `>`
    /// marker and reset `blk_indent`, so the lines tokenize like a document.
    /// Lazy lines are left untouched.
    pub fn strip_quote_markers(&mut self, start: usize, end: usize) -> QuoteFrame {
        let frame = QuoteFrame {
            start,
            b_marks: self.b_marks[start..end].to_vec(),
            t_shift: self.t_shift[start..end].to_vec(),
            s_count: self.s_count[start..end].to_vec(),
            blk_indent: self.blk_indent,
            list_indent: self.list_indent.take(),
        };

        for line in start..end {
            if !self.is_quoted(line) {
                continue;
            }
            let Some(pos) = self.quote_marker_end(line) else {
                continue;
            };
            let (shift, columns) = measure_indent(&self.src[pos..self.e_marks[line]]);
            self.b_marks[line] = pos;
            self.t_shift[line] = shift;
            self.s_count[line] = columns;
        }
        self.blk_indent = 0;
        frame
    }
}

impl std::fmt::Debug for BlockState<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockState")
            .field("line", &self.line)
            .field("line_max", &self.line_max)
            .field("blk_indent", &self.blk_indent)
            .field("parent_type", &self.parent_type)
            .field("level", &self.level)
            .field("tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}

/// Line offsets saved by [`BlockState::strip_quote_markers`].
#[derive(Debug)]
#[must_use = "the frame must be restored once the quoted lines are tokenized"]
pub struct QuoteFrame {
    start: usize,
    b_marks: Vec<usize>,
    t_shift: Vec<usize>,
    s_count: Vec<usize>,
    blk_indent: usize,
    list_indent: Option<usize>,
}

impl QuoteFrame {
    /// Put the saved offsets back.
    pub fn restore(self, state: &mut BlockState<'_>) {
        let end = self.start + self.b_marks.len();
        state.b_marks[self.start..end].copy_from_slice(&self.b_marks);
        state.t_shift[self.start..end].copy_from_slice(&self.t_shift);
        state.s_count[self.start..end].copy_from_slice(&self.s_count);
        state.blk_indent = self.blk_indent;
        state.list_indent = self.list_indent;
    }
}

/// Tracks whether the quoted lines seen so far leave a paragraph open.
#[derive(Debug, Default)]
struct QuoteScan {
    fence: FenceTracker,
    paragraph_open: bool,
}

impl QuoteScan {
    fn feed(&mut self, content: &str) {
        let inner = strip_nested_markers(content);

        let was_in_fence = self.fence.in_fence();
        if self.fence.update(inner) || was_in_fence {
            self.paragraph_open = false;
            return;
        }

        let (_, columns) = measure_indent(inner);
        let trimmed = inner.trim_start();
        self.paragraph_open = if trimmed.is_empty() {
            false
        } else if columns >= 4 {
            // Indented text continues a paragraph, otherwise it is code.
            self.paragraph_open
        } else if heading::is_atx_heading(trimmed) || hr::is_thematic_break(trimmed) {
            false
        } else {
            list::item_content(trimmed).is_none_or(|rest| !rest.trim().is_empty())
        };
    }
}

/// Innermost content of a line carrying several `>` markers.
fn strip_nested_markers(mut text: &str) -> &str {
    loop {
        let trimmed = text.trim_start_matches(' ');
        let Some(rest) = trimmed.strip_prefix('>') else {
            return text;
        };
        text = rest
            .strip_prefix(' ')
            .or_else(|| rest.strip_prefix('\t'))
            .unwrap_or(rest);
    }
}

/// Leading whitespace of `text` as (bytes, columns).
fn measure_indent(text: &str) -> (usize, usize) {
    let mut bytes = 0;
    let mut columns = 0;
    for b in text.bytes() {
        match b {
            b' ' => columns += 1,
            b'\t' => columns += TAB_WIDTH - columns % TAB_WIDTH,
            _ => break,
        }
        bytes += 1;
    }
    (bytes, columns)
}
