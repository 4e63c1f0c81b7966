//! Fenced code blocks.

use crate::fence::{detect_fence, is_fence_line};
use crate::state::BlockState;

/// A backtick or tilde fence. Unclosed fences run to the end of the
/// enclosing container.
pub fn fence(state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
    if state.is_code_block(start) {
        return false;
    }
    let Some(open) = detect_fence(state.line_text(start)) else {
        return false;
    };
    if silent {
        return true;
    }

    let mut next = start + 1;
    let mut closed = false;
    while next < end {
        // A non-empty line left of the container indent ends the container.
        if !state.is_empty(next) && state.s_count[next] < state.blk_indent {
            break;
        }
        if !state.is_code_block(next) && is_fence_line(state.line_text(next), open.marker, open.len) {
            closed = true;
            break;
        }
        next += 1;
    }

    let info = open.info.trim().to_owned();
    let markup = open.marker.to_string().repeat(open.len);
    let content = state.get_lines(start + 1, next, state.s_count[start], true);
    let line_end = next + usize::from(closed);
    state.line = line_end;

    let token = state.push("fence", "code", 0);
    token.info = info;
    token.content = content;
    token.markup = markup;
    token.map = Some((start, line_end));
    true
}
