//! Paragraphs, the rule of last resort.

use crate::state::{BlockState, ParentType};

/// Consume lines until a blank line or a rule of the `paragraph` chain
/// interrupts. Always succeeds.
pub fn paragraph(state: &mut BlockState<'_>, start: usize, end: usize, _silent: bool) -> bool {
    let parent = std::mem::replace(&mut state.parent_type, ParentType::Paragraph);

    let mut next = start + 1;
    while next < end && !state.is_empty(next) {
        // Over-indented lines are lazy continuations, never block starts.
        if state.is_code_block(next) {
            next += 1;
            continue;
        }
        if state.terminates("paragraph", next, end) {
            break;
        }
        next += 1;
    }

    let content = state
        .get_lines(start, next, state.blk_indent, false)
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");
    state.line = next;

    let token = state.push("paragraph_open", "p", 1);
    token.map = Some((start, next));
    let token = state.push("inline", "", 0);
    token.content = content;
    token.map = Some((start, next));
    state.push("paragraph_close", "p", -1);

    state.parent_type = parent;
    true
}
