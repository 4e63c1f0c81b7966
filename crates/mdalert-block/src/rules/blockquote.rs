//! Blockquotes.

use crate::state::{BlockState, ParentType};

/// Lines starting with `>`, plus lazy paragraph continuations.
pub fn blockquote(state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
    if state.is_code_block(start) || state.quote_marker_content(start).is_none() {
        return false;
    }
    if silent {
        return true;
    }

    let parent = std::mem::replace(&mut state.parent_type, ParentType::Blockquote);
    let next = state.quote_extent(start, end);
    let line_max = std::mem::replace(&mut state.line_max, next);
    let frame = state.strip_quote_markers(start, next);

    let token = state.push("blockquote_open", "blockquote", 1);
    token.markup = ">".to_owned();
    token.map = Some((start, next));

    state.enter_container("blockquote");
    let md = state.md;
    md.tokenize(state, start, next);
    state.leave_container();

    state.push("blockquote_close", "blockquote", -1).markup = ">".to_owned();

    frame.restore(state);
    state.line_max = line_max;
    state.parent_type = parent;
    state.line = next;
    true
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::BlockParser;

    fn kinds(src: &str) -> Vec<String> {
        BlockParser::commonmark()
            .parse(src)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_quote() {
        let tokens = BlockParser::commonmark().parse("> a\n> b\n");

        assert_eq!(tokens[0].kind, "blockquote_open");
        assert_eq!(tokens[0].map, Some((0, 2)));
        assert_eq!(tokens[2].content, "a\nb");
        assert_eq!(tokens[4].kind, "blockquote_close");
    }

    #[test]
    fn test_lazy_continuation() {
        let tokens = BlockParser::commonmark().parse("> a\nb\n\nc\n");

        assert_eq!(tokens[2].content, "a\nb");
        assert_eq!(tokens[6].content, "c");
    }

    #[test]
    fn test_nested_quotes() {
        assert_eq!(
            kinds("> > deep\n"),
            vec![
                "blockquote_open",
                "blockquote_open",
                "paragraph_open",
                "inline",
                "paragraph_close",
                "blockquote_close",
                "blockquote_close",
            ]
        );
    }

    #[test]
    fn test_quote_with_list_and_fence() {
        let tokens = BlockParser::commonmark().parse("> - a\n> ```\n> code\n> ```\n");

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.as_str()).collect();
        assert!(kinds.contains(&"bullet_list_open"));
        let fence = tokens.iter().find(|t| t.kind == "fence").unwrap();
        assert_eq!(fence.content, "code\n");
    }

    #[test]
    fn test_indented_quote_is_code() {
        assert_eq!(kinds("    > not a quote\n"), vec!["code_block"]);
    }

    #[test]
    fn test_quote_in_list_item() {
        let tokens = BlockParser::commonmark().parse("- > a\n  > b\n");

        let quote = tokens.iter().position(|t| t.kind == "blockquote_open").unwrap();
        assert_eq!(tokens[quote + 2].content, "a\nb");
    }
}
