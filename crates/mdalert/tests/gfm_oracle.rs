//! Cross-checks alert recognition against pulldown-cmark's GFM alerts.

use mdalert::{AlertFormatter, AlertKind, AlertOptions, collect_alerts};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use pulldown_cmark::{BlockQuoteKind, Event, Options, Parser, Tag};

fn oracle_kinds(src: &str) -> Vec<AlertKind> {
    Parser::new_ext(src, Options::ENABLE_GFM)
        .filter_map(|event| match event {
            Event::Start(Tag::BlockQuote(Some(kind))) => Some(match kind {
                BlockQuoteKind::Note => AlertKind::Note,
                BlockQuoteKind::Tip => AlertKind::Tip,
                BlockQuoteKind::Important => AlertKind::Important,
                BlockQuoteKind::Warning => AlertKind::Warning,
                BlockQuoteKind::Caution => AlertKind::Caution,
            }),
            _ => None,
        })
        .collect()
}

fn our_kinds(src: &str) -> Vec<AlertKind> {
    let formatter = AlertFormatter::new(AlertOptions::default()).unwrap();
    let tree = formatter.parse(src).unwrap();
    collect_alerts(&tree)
        .into_iter()
        .map(|alert| alert.kind)
        .collect()
}

#[test]
fn test_matches_oracle_on_fixed_documents() {
    let documents = [
        "> [!NOTE]\n> body\n",
        "> [!TIP]\n> Use this.\n",
        "> [!BOGUS]\n> text\n",
        "```\n> [!NOTE]\n> body\n```\n",
        "    > [!NOTE]\n",
        "para\n\n> [!WARNING]\n> a\n\n> [!CAUTION]\n> b\n",
        "> plain quote\n",
    ];

    for src in documents {
        assert_eq!(our_kinds(src), oracle_kinds(src), "document: {src:?}");
    }
}

fn block() -> impl Strategy<Value = String> {
    let label = prop::sample::select(vec![
        "NOTE",
        "TIP",
        "IMPORTANT",
        "WARNING",
        "CAUTION",
        "BOGUS",
    ]);
    let text = prop::collection::vec("[a-z]{1,8}", 1..4).prop_map(|w| w.join(" "));
    prop_oneof![
        (label, text.clone()).prop_map(|(label, body)| format!("> [!{label}]\n> {body}")),
        text.clone().prop_map(|body| format!("> {body}")),
        text.clone(),
        text.prop_map(|body| format!("```\n> [!NOTE]\n{body}\n```")),
    ]
}

proptest! {
    #[test]
    fn recognition_matches_oracle(blocks in prop::collection::vec(block(), 1..6)) {
        let src = blocks.join("\n\n") + "\n";

        prop_assert_eq!(our_kinds(&src), oracle_kinds(&src));
    }
}
