//! Bullet and ordered lists.

use crate::state::{BlockState, ParentType};

const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Marker {
    ordered: bool,
    number: u64,
    /// `-`, `+`, `*` for bullets, `.` or `)` for ordered items.
    delimiter: u8,
    /// Byte length of the marker itself.
    len: usize,
}

fn parse_marker(text: &str) -> Option<Marker> {
    let bytes = text.as_bytes();
    let first = *bytes.first()?;

    let (ordered, number, len) = if matches!(first, b'*' | b'-' | b'+') {
        (false, 0, 1)
    } else {
        let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 || digits > 9 {
            return None;
        }
        if !matches!(bytes.get(digits), Some(b'.' | b')')) {
            return None;
        }
        (true, text[..digits].parse().ok()?, digits + 1)
    };

    if let Some(&next) = bytes.get(len)
        && next != b' '
        && next != b'\t'
    {
        return None;
    }
    Some(Marker {
        ordered,
        number,
        delimiter: bytes[len - 1],
        len,
    })
}

/// Text after a list marker, if the trimmed line starts a list item.
pub(crate) fn item_content(trimmed: &str) -> Option<&str> {
    let marker = parse_marker(trimmed)?;
    Some(&trimmed[marker.len..])
}

/// A run of list items sharing one marker type.
pub fn list(state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
    if state.is_code_block(start) {
        return false;
    }
    // Too far right of the parent list marker, yet left of its content.
    if let Some(list_indent) = state.list_indent
        && state.s_count[start] >= list_indent + 4
        && state.s_count[start] < state.blk_indent
    {
        return false;
    }
    let text = state.line_text(start);
    let Some(marker) = parse_marker(text) else {
        return false;
    };

    // Restrictions that only apply when interrupting a paragraph.
    if silent
        && state.parent_type == ParentType::Paragraph
        && state.s_count[start] >= state.blk_indent
    {
        if marker.ordered && marker.number != 1 {
            return false;
        }
        if text[marker.len..].trim().is_empty() {
            return false;
        }
    }
    if silent {
        return true;
    }

    let delimiter = char::from(marker.delimiter).to_string();
    let list_open = state.tokens.len();
    let (open, close, tag) = if marker.ordered {
        ("ordered_list_open", "ordered_list_close", "ol")
    } else {
        ("bullet_list_open", "bullet_list_close", "ul")
    };
    let token = state.push(open, tag, 1);
    token.markup.clone_from(&delimiter);
    if marker.ordered {
        token.info = marker.number.to_string();
        if marker.number != 1 {
            token.set_attr("start", marker.number.to_string());
        }
    }

    let parent = std::mem::replace(&mut state.parent_type, ParentType::List);
    let mut tight = true;
    let mut prev_empty_end = false;
    let mut line = start;
    let mut current = marker;
    let mut items = Vec::new();

    loop {
        let item_open = state.tokens.len();
        items.push(item_open);
        let token = state.push("list_item_open", "li", 1);
        token.markup.clone_from(&delimiter);
        if current.ordered {
            token.info = current.number.to_string();
        }

        let item_tight = tokenize_item(state, line, end, current.len);
        if !item_tight || prev_empty_end {
            tight = false;
        }
        // A trailing blank line makes the list loose only if another item follows.
        prev_empty_end = state.line - line > 1 && state.is_empty(state.line - 1);

        let token = state.push("list_item_close", "li", -1);
        token.markup.clone_from(&delimiter);
        state.tokens[item_open].map = Some((line, state.line));

        line = state.line;
        if line >= end
            || state.s_count[line] < state.blk_indent
            || state.is_code_block(line)
            || state.terminates("list", line, end)
        {
            break;
        }
        match parse_marker(state.line_text(line)) {
            Some(next) if next.ordered == marker.ordered && next.delimiter == marker.delimiter => {
                current = next;
            }
            _ => break,
        }
    }

    state.push(close, tag, -1).markup = delimiter;
    state.tokens[list_open].map = Some((start, line));
    for index in std::iter::once(list_open).chain(items) {
        state.tokens[index]
            .meta
            .insert("tight".to_owned(), tight.to_string());
    }
    state.line = line;
    state.parent_type = parent;

    if tight {
        mark_tight_paragraphs(state, list_open);
    }
    true
}

/// Tokenize one item whose marker starts `line`. Returns whether the item's
/// blocks were separated without blank lines.
fn tokenize_item(state: &mut BlockState<'_>, line: usize, end: usize, marker_len: usize) -> bool {
    let src = state.src;
    let bytes = src.as_bytes();
    let max = state.e_marks[line];
    let after_marker = state.b_marks[line] + state.t_shift[line] + marker_len;

    let initial = state.s_count[line] + marker_len;
    let mut offset = initial;
    let mut pos = after_marker;
    while pos < max {
        match bytes[pos] {
            b' ' => offset += 1,
            b'\t' => offset += TAB_WIDTH - offset % TAB_WIDTH,
            _ => break,
        }
        pos += 1;
    }
    let content_start = pos;

    // More than four spaces after the marker start an indented code block.
    let mut indent_after_marker = if content_start >= max {
        1
    } else {
        offset - initial
    };
    if indent_after_marker > 4 {
        indent_after_marker = 1;
    }
    let indent = initial + indent_after_marker;

    let saved_t_shift = state.t_shift[line];
    let saved_s_count = state.s_count[line];
    let saved_list_indent = state.list_indent;
    let saved_blk_indent = state.blk_indent;
    let saved_tight = state.tight;

    state.list_indent = Some(state.blk_indent);
    state.blk_indent = indent;
    state.tight = true;
    state.t_shift[line] = content_start - state.b_marks[line];
    state.s_count[line] = offset;
    state.enter_container("list_item");

    if content_start >= max && state.is_empty(line + 1) {
        state.line = (line + 2).min(end);
    } else {
        let md = state.md;
        md.tokenize(state, line, end);
    }
    let item_tight = state.tight;

    state.leave_container();
    state.t_shift[line] = saved_t_shift;
    state.s_count[line] = saved_s_count;
    state.list_indent = saved_list_indent;
    state.blk_indent = saved_blk_indent;
    state.tight = saved_tight;
    item_tight
}

/// Hide the paragraphs that are direct children of a tight list's items.
fn mark_tight_paragraphs(state: &mut BlockState<'_>, list_open: usize) {
    let level = state.level + 2;
    let last = state.tokens.len().saturating_sub(2);
    let mut i = list_open + 2;
    while i < last {
        if state.tokens[i].level == level && state.tokens[i].kind == "paragraph_open" {
            state.tokens[i].hidden = true;
            state.tokens[i + 2].hidden = true;
            i += 2;
        }
        i += 1;
    }
}
