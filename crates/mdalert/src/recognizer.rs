//! The alert block rule.
//!
//! Runs ahead of the host's `blockquote` rule. When the first line of a
//! quote carries a marker, the rule claims the whole quote: it computes the
//! quote's extent, strips the `>` markers, tokenizes the lines after the
//! marker line as the alert body, and wraps them in `alert_open` /
//! `alert_close` tokens.

use std::sync::Arc;

use mdalert_block::{BlockRule, BlockState, ParentType};

use crate::kind::AlertKind;
use crate::pattern::PatternTable;

/// Node type of recognized alerts.
pub const ALERT_NODE: &str = "alert";
pub const ALERT_OPEN: &str = "alert_open";
pub const ALERT_CLOSE: &str = "alert_close";
/// Token meta key holding the upper-case label.
pub const META_LABEL: &str = "label";
/// Token meta key holding the same-line text after the marker.
pub const META_TAIL: &str = "inline_tail";

const ALERT_PARENT: ParentType = ParentType::Extension(ALERT_NODE);

/// Ambient tokenizer context an alert overrides while its body is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedTokenizerState {
    pub parent_type: ParentType,
    pub line_max: usize,
}

impl SavedTokenizerState {
    #[must_use]
    pub fn capture(state: &BlockState<'_>) -> Self {
        Self {
            parent_type: state.parent_type,
            line_max: state.line_max,
        }
    }

    pub fn restore(self, state: &mut BlockState<'_>) {
        state.parent_type = self.parent_type;
        state.line_max = self.line_max;
    }
}

/// Block rule that turns marked blockquotes into alerts.
#[derive(Debug, Clone)]
pub struct AlertRecognizer {
    patterns: Arc<PatternTable>,
    parse_nested: bool,
}

impl AlertRecognizer {
    #[must_use]
    pub fn new(patterns: PatternTable, parse_nested: bool) -> Self {
        Self {
            patterns: Arc::new(patterns),
            parse_nested,
        }
    }

    #[must_use]
    pub fn patterns(&self) -> &PatternTable {
        &self.patterns
    }

    /// Try to start an alert at `start`.
    ///
    /// With `silent` set this only reports whether the line opens an alert
    /// and leaves the state untouched. Otherwise the alert tokens are pushed
    /// and `state.line` moves past the quote.
    pub fn try_recognize(
        &self,
        state: &mut BlockState<'_>,
        start: usize,
        end: usize,
        silent: bool,
    ) -> bool {
        if state.is_code_block(start) {
            return false;
        }
        if !self.parse_nested && state.is_inside(ALERT_NODE) {
            return false;
        }
        let Some(text) = state.quote_marker_content(start) else {
            return false;
        };
        let Some(marker) = self.patterns.find(text) else {
            return false;
        };
        if silent {
            return true;
        }

        let kind = AlertKind::from_label(marker.label);
        let saved = SavedTokenizerState::capture(state);
        state.parent_type = ALERT_PARENT;
        let next = state.quote_extent(start, end);
        state.line_max = next;
        let frame = state.strip_quote_markers(start, next);

        let token = state.push(ALERT_OPEN, "div", 1);
        token.markup = format!("[!{}]", kind.wire_label());
        token.map = Some((start, next));
        token
            .meta
            .insert(META_LABEL.to_owned(), kind.wire_label().to_owned());
        token
            .meta
            .insert(META_TAIL.to_owned(), marker.inline_tail.to_owned());
        tracing::trace!(line = start, end = next, label = %kind, "Recognized alert");

        state.enter_container(ALERT_NODE);
        let md = state.md;
        md.tokenize(state, start + 1, next);
        state.leave_container();
        state.push(ALERT_CLOSE, "div", -1);

        frame.restore(state);
        saved.restore(state);
        state.line = next;
        true
    }
}

impl BlockRule for AlertRecognizer {
    fn check(&self, state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
        self.try_recognize(state, start, end, silent)
    }
}

#[cfg(test)]
mod tests {
    use mdalert_block::{BlockParser, Token};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::options::AlertOptions;

    fn parser(options: &AlertOptions) -> BlockParser {
        let patterns = PatternTable::from_options(options).unwrap();
        let mut parser = BlockParser::commonmark();
        parser
            .ruler
            .before(
                "blockquote",
                ALERT_NODE,
                AlertRecognizer::new(patterns, options.parse_nested),
                &["paragraph", "blockquote", "list"],
            )
            .unwrap();
        parser
    }

    fn tokens(src: &str) -> Vec<Token> {
        parser(&AlertOptions::default()).parse(src)
    }

    fn kinds(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.kind.as_str()).collect()
    }

    #[test]
    fn test_simple_alert() {
        let tokens = tokens("> [!TIP]\n> Use this.\n");

        assert_eq!(
            kinds(&tokens),
            vec![
                ALERT_OPEN,
                "paragraph_open",
                "inline",
                "paragraph_close",
                ALERT_CLOSE
            ]
        );
        assert_eq!(tokens[0].meta(META_LABEL), Some("TIP"));
        assert_eq!(tokens[0].meta(META_TAIL), Some(""));
        assert_eq!(tokens[0].markup, "[!TIP]");
        assert_eq!(tokens[0].map, Some((0, 2)));
        assert_eq!(tokens[2].content, "Use this.");
        assert_eq!(tokens[2].level, 2);
    }

    #[test]
    fn test_marker_only() {
        let tokens = tokens("> [!NOTE]\n");

        assert_eq!(kinds(&tokens), vec![ALERT_OPEN, ALERT_CLOSE]);
        assert_eq!(tokens[0].map, Some((0, 1)));
    }

    #[test]
    fn test_inline_tail_captured() {
        let tokens = tokens("> [!warning] be careful\n> more\n");

        assert_eq!(tokens[0].meta(META_LABEL), Some("WARNING"));
        assert_eq!(tokens[0].meta(META_TAIL), Some("be careful"));
        assert_eq!(tokens[2].content, "more");
    }

    #[test]
    fn test_unknown_label_is_blockquote() {
        let tokens = tokens("> [!BOGUS]\n> text\n");

        assert_eq!(tokens[0].kind, "blockquote_open");
        assert_eq!(tokens[2].content, "[!BOGUS]\ntext");
    }

    #[test]
    fn test_alert_in_fence_not_recognized() {
        let tokens = tokens("```\n> [!NOTE]\n```\n");

        assert_eq!(kinds(&tokens), vec!["fence"]);
    }

    #[test]
    fn test_indented_alert_is_code() {
        let tokens = tokens("    > [!NOTE]\n");

        assert_eq!(kinds(&tokens), vec!["code_block"]);
    }

    #[test]
    fn test_alert_stops_at_blank_line() {
        let tokens = tokens("> [!NOTE]\n> a\n\nafter\n");

        assert_eq!(tokens[0].map, Some((0, 2)));
        assert_eq!(tokens[5].kind, "paragraph_open");
        assert_eq!(tokens[6].content, "after");
    }

    #[test]
    fn test_lazy_line_belongs_to_alert() {
        let tokens = tokens("> [!NOTE]\n> a\nlazy\n");

        assert_eq!(tokens[0].map, Some((0, 3)));
        assert_eq!(tokens[2].content, "a\nlazy");
    }

    #[test]
    fn test_alert_interrupts_paragraph() {
        let tokens = tokens("text\n> [!NOTE]\n> body\n");

        assert_eq!(tokens[1].content, "text");
        assert_eq!(tokens[3].kind, ALERT_OPEN);
    }

    #[test]
    fn test_alert_body_blocks() {
        let tokens = tokens("> [!IMPORTANT]\n> - one\n> - two\n>\n> ```sh\n> run\n> ```\n");

        let kinds = kinds(&tokens);
        assert!(kinds.contains(&"bullet_list_open"));
        let fence = tokens.iter().find(|t| t.kind == "fence").unwrap();
        assert_eq!(fence.content, "run\n");
        assert_eq!(fence.info, "sh");
        assert_eq!(kinds.last(), Some(&ALERT_CLOSE));
    }

    #[test]
    fn test_nested_alerts() {
        let tokens = tokens("> [!NOTE]\n> > [!WARNING]\n> > inner\n");

        assert_eq!(
            kinds(&tokens),
            vec![
                ALERT_OPEN,
                ALERT_OPEN,
                "paragraph_open",
                "inline",
                "paragraph_close",
                ALERT_CLOSE,
                ALERT_CLOSE,
            ]
        );
        assert_eq!(tokens[1].meta(META_LABEL), Some("WARNING"));
        assert_eq!(tokens[1].map, Some((1, 3)));
    }

    #[test]
    fn test_nested_alerts_disabled() {
        let options = AlertOptions::default().with_parse_nested(false);
        let tokens = parser(&options).parse("> [!NOTE]\n> > [!WARNING]\n> > inner\n");

        assert_eq!(tokens[0].kind, ALERT_OPEN);
        assert_eq!(tokens[1].kind, "blockquote_open");
        assert_eq!(tokens[3].content, "[!WARNING]\ninner");
    }

    #[test]
    fn test_alert_inside_blockquote() {
        let tokens = tokens("> quote\n>\n> > [!TIP]\n> > hint\n");

        assert_eq!(tokens[0].kind, "blockquote_open");
        assert!(tokens.iter().any(|t| t.kind == ALERT_OPEN));
    }

    #[test]
    fn test_alert_in_list_item() {
        let tokens = tokens("- > [!NOTE]\n  > body\n- next\n");

        let open = tokens.iter().position(|t| t.kind == ALERT_OPEN).unwrap();
        assert_eq!(tokens[open].map, Some((0, 2)));
        assert_eq!(tokens[open + 2].content, "body");
        assert_eq!(
            tokens.iter().filter(|t| t.kind == "list_item_open").count(),
            2
        );
    }

    #[test]
    fn test_state_restored_after_alert() {
        let options = AlertOptions::default();
        let parser = parser(&options);
        let src = "> [!NOTE]\n> a\n\ntext\n";
        let mut state = BlockState::new(src, &parser);
        let end = state.line_max;

        assert!(parser.ruler.is_enabled(ALERT_NODE));
        let recognizer = AlertRecognizer::new(PatternTable::from_options(&options).unwrap(), true);
        assert!(recognizer.try_recognize(&mut state, 0, end, false));

        assert_eq!(state.line, 2);
        assert_eq!(state.line_max, end);
        assert_eq!(state.parent_type, ParentType::Root);
        assert_eq!(state.blk_indent, 0);
        assert_eq!(state.line_text(0), "> [!NOTE]");
        assert!(state.containers().is_empty());
        assert_eq!(state.level, 0);
    }

    #[test]
    fn test_silent_probe_leaves_state() {
        let parser = parser(&AlertOptions::default());
        let mut state = BlockState::new("> [!NOTE]\n> a\n", &parser);
        let recognizer =
            AlertRecognizer::new(PatternTable::from_options(&AlertOptions::default()).unwrap(), true);

        assert!(recognizer.try_recognize(&mut state, 0, 2, true));
        assert!(state.tokens.is_empty());
        assert_eq!(state.line, 0);
        assert!(!recognizer.try_recognize(&mut state, 1, 2, true));
    }

    #[test]
    fn test_saved_state_roundtrip() {
        let parser = BlockParser::commonmark();
        let mut state = BlockState::new("a\nb\n", &parser);
        let saved = SavedTokenizerState::capture(&state);

        state.parent_type = ALERT_PARENT;
        state.line_max = 1;
        saved.restore(&mut state);

        assert_eq!(state.parent_type, ParentType::Root);
        assert_eq!(state.line_max, 2);
    }
}
