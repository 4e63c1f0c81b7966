//! ATX headings.

use crate::state::BlockState;

/// `#` through `######` followed by a space or the end of the line.
pub fn heading(state: &mut BlockState<'_>, start: usize, _end: usize, silent: bool) -> bool {
    if state.is_code_block(start) {
        return false;
    }
    let Some((level, text)) = parse_atx(state.line_text(start)) else {
        return false;
    };
    if silent {
        return true;
    }

    let tag = format!("h{level}");
    let markup = "#".repeat(level);
    state.line = start + 1;

    let token = state.push("heading_open", &tag, 1);
    token.markup.clone_from(&markup);
    token.map = Some((start, start + 1));

    let token = state.push("inline", "", 0);
    token.content = text.to_owned();
    token.map = Some((start, start + 1));

    let token = state.push("heading_close", &tag, -1);
    token.markup = markup;
    true
}

/// Split an ATX heading into its level and text, dropping an optional
/// closing sequence of `#`.
pub(crate) fn parse_atx(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }

    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with([' ', '\t']) {
        return None;
    }

    let rest = rest.trim();
    let without_closing = rest.trim_end_matches('#');
    let text = if without_closing.is_empty() {
        ""
    } else if without_closing.len() < rest.len() && without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end()
    } else {
        rest
    };
    Some((level, text))
}

pub(crate) fn is_atx_heading(trimmed: &str) -> bool {
    parse_atx(trimmed).is_some()
}
