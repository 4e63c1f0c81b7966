//! Thematic breaks.

use crate::state::BlockState;

/// Three or more `*`, `-` or `_`, optionally separated by spaces.
pub fn hr(state: &mut BlockState<'_>, start: usize, _end: usize, silent: bool) -> bool {
    if state.is_code_block(start) {
        return false;
    }
    let text = state.line_text(start);
    if !is_thematic_break(text) {
        return false;
    }
    if silent {
        return true;
    }

    let marker = text.chars().next().unwrap_or('-');
    let count = text.chars().filter(|&c| c == marker).count();
    state.line = start + 1;
    let token = state.push("hr", "hr", 0);
    token.markup = marker.to_string().repeat(count);
    token.map = Some((start, start + 1));
    true
}

/// Whether trimmed line text is a thematic break.
pub(crate) fn is_thematic_break(trimmed: &str) -> bool {
    let Some(marker) = trimmed.chars().next() else {
        return false;
    };
    if !matches!(marker, '*' | '-' | '_') {
        return false;
    }

    let mut count = 0;
    for c in trimmed.chars() {
        if c == marker {
            count += 1;
        } else if c != ' ' && c != '\t' {
            return false;
        }
    }
    count >= 3
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::BlockParser;

    #[test]
    fn test_is_thematic_break() {
        assert!(is_thematic_break("---"));
        assert!(is_thematic_break("* * *"));
        assert!(is_thematic_break("_____"));
        assert!(!is_thematic_break("--"));
        assert!(!is_thematic_break("-*-"));
        assert!(!is_thematic_break("--- a"));
    }

    #[test]
    fn test_hr_token() {
        let tokens = BlockParser::commonmark().parse("* * *\n");

        assert_eq!(tokens[0].kind, "hr");
        assert_eq!(tokens[0].markup, "***");
    }

    #[test]
    fn test_hr_wins_over_list() {
        let tokens = BlockParser::commonmark().parse("- - -\n");

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, "hr");
    }
}
