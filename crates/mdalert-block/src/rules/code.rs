//! Indented code blocks.

use crate::state::BlockState;

/// Lines indented four or more columns past the container indent.
pub fn code(state: &mut BlockState<'_>, start: usize, end: usize, _silent: bool) -> bool {
    if !state.is_code_block(start) {
        return false;
    }

    let mut next = start + 1;
    let mut last = next;
    while next < end {
        if state.is_empty(next) {
            next += 1;
            continue;
        }
        if state.is_code_block(next) {
            next += 1;
            last = next;
            continue;
        }
        break;
    }

    state.line = last;
    let content = state.get_lines(start, last, state.blk_indent + 4, false) + "\n";
    let token = state.push("code_block", "code", 0);
    token.content = content;
    token.map = Some((start, last));
    true
}
