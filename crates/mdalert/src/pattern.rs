//! Marker grammars.
//!
//! A [`PatternTable`] holds an ordered list of [`MarkerGrammar`]s. Each grammar
//! is a regex anchored at the start of the quoted text with a mandatory
//! `label` capture and an optional `inline_tail` capture. The first grammar
//! that matches wins.

use regex::{Regex, RegexBuilder};

use crate::error::AlertError;
use crate::options::{AlertOptions, LabelSet};

/// Capture group holding the alert label.
pub const LABEL_GROUP: &str = "label";
/// Capture group holding same-line text after the marker.
pub const TAIL_GROUP: &str = "inline_tail";

/// Optional separator (space, tab or `<br>`) and the rest of the line.
const TAIL_SUFFIX: &str = r"(?:[ \t]|<br\s*/?>)?(?P<inline_tail>[^\n]+)?";

/// Labels the legacy `**Note**` syntax ever supported.
const LEGACY_LABELS: [&str; 2] = ["Note", "Warning"];

/// Result of a successful marker match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerMatch<'t> {
    /// Label as written in the source.
    pub label: &'t str,
    /// Trimmed same-line text after the marker, possibly empty.
    pub inline_tail: &'t str,
}

/// One recognized marker syntax.
#[derive(Debug, Clone)]
pub struct MarkerGrammar {
    name: String,
    regex: Regex,
}

impl MarkerGrammar {
    /// Compile a grammar from its marker pattern.
    ///
    /// The pattern is anchored at the start of the text. Unless it declares
    /// its own `inline_tail` group, the standard tail suffix is appended.
    pub fn new(name: &str, marker: &str, case_sensitive: bool) -> Result<Self, AlertError> {
        let pattern = if marker.contains("(?P<inline_tail>") || marker.contains("(?<inline_tail>")
        {
            format!("^(?:{marker})")
        } else {
            format!("^(?:{marker}){TAIL_SUFFIX}")
        };

        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|source| AlertError::InvalidPattern {
                grammar: name.to_owned(),
                source,
            })?;

        if !regex.capture_names().any(|n| n == Some(LABEL_GROUP)) {
            return Err(AlertError::MissingLabelCapture(name.to_owned()));
        }

        Ok(Self {
            name: name.to_owned(),
            regex,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Match the grammar against text following a `>` marker.
    #[must_use]
    pub fn captures<'t>(&self, text: &'t str) -> Option<MarkerMatch<'t>> {
        let caps = self.regex.captures(text)?;
        let label = caps.name(LABEL_GROUP)?.as_str();
        let inline_tail = caps.name(TAIL_GROUP).map_or("", |m| m.as_str().trim());
        Some(MarkerMatch { label, inline_tail })
    }
}

/// Ordered set of marker grammars; the first match wins.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    grammars: Vec<MarkerGrammar>,
}

impl PatternTable {
    /// Name of the `**Note**` grammar.
    pub const LEGACY: &'static str = "legacy";
    /// Name of the `[!NOTE]` grammar.
    pub const CURRENT: &'static str = "current";

    /// Built-in grammars restricted to the configured labels: the legacy
    /// `**Note**` / `**Warning**` syntax first, then `[!LABEL]` (brackets may
    /// be backslash-escaped).
    pub fn from_options(options: &AlertOptions) -> Result<Self, AlertError> {
        let case_sensitive = options.case_sensitive_labels;
        let mut table = Self::empty();

        let legacy: Vec<&str> = LEGACY_LABELS
            .into_iter()
            .filter(|label| options.labels.admits(label))
            .collect();
        if !legacy.is_empty() {
            let marker = format!(r"\*\*(?P<label>{})\*\*", legacy.join("|"));
            table = table.with_grammar(MarkerGrammar::new(Self::LEGACY, &marker, case_sensitive)?);
        }

        let labels = match &options.labels {
            LabelSet::Any => r"\w+".to_owned(),
            LabelSet::Only(set) => set
                .iter()
                .map(|label| regex::escape(label))
                .collect::<Vec<_>>()
                .join("|"),
        };
        let marker = format!(r"\\?\[!(?P<label>{labels})\\?\]");
        table = table.with_grammar(MarkerGrammar::new(Self::CURRENT, &marker, case_sensitive)?);

        Ok(table)
    }

    /// Table with no grammars; it matches nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a grammar at the lowest priority.
    #[must_use]
    pub fn with_grammar(mut self, grammar: MarkerGrammar) -> Self {
        self.grammars.push(grammar);
        self
    }

    #[must_use]
    pub fn grammars(&self) -> &[MarkerGrammar] {
        &self.grammars
    }

    /// First grammar match for the text after a `>` marker.
    #[must_use]
    pub fn find<'t>(&self, text: &'t str) -> Option<MarkerMatch<'t>> {
        self.grammars.iter().find_map(|g| g.captures(text))
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}
