//! Alert extension options.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::AlertError;
use crate::kind::AlertKind;

/// Default CSS class prefix for rendered alerts.
pub const DEFAULT_CLASS_PREFIX: &str = "markdown-alert";

/// Labels the recognizer accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSet {
    /// Any word is a label (`["*"]` in configuration).
    Any,
    /// Exactly these upper-case labels.
    Only(BTreeSet<String>),
}

impl Default for LabelSet {
    fn default() -> Self {
        Self::Only(
            AlertKind::BUILTIN
                .iter()
                .map(|kind| kind.wire_label().to_owned())
                .collect(),
        )
    }
}

impl LabelSet {
    /// Build a label set from configured labels.
    ///
    /// Labels are upper-cased. `*` alone admits every word.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, AlertError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| label.as_ref().trim().to_owned())
            .collect();

        if labels.is_empty() {
            return Err(AlertError::EmptyLabelSet);
        }
        if labels.iter().any(|label| label == "*") {
            return if labels.len() == 1 {
                Ok(Self::Any)
            } else {
                Err(AlertError::MixedWildcard)
            };
        }

        let mut set = BTreeSet::new();
        for label in labels {
            if label.is_empty() || !label.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(AlertError::InvalidLabel(label));
            }
            set.insert(label.to_uppercase());
        }
        Ok(Self::Only(set))
    }

    /// Whether a label (in any case) belongs to the set.
    #[must_use]
    pub fn admits(&self, label: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(set) => set.contains(&label.to_uppercase()),
        }
    }
}

/// How alerts are written back as Markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkdownStyle {
    /// `[!NOTE]` on its own line with the body as plain blocks.
    #[default]
    Bare,
    /// The bare form with every line prefixed by `> `, which parses back
    /// into the same alert.
    Quoted,
}

/// Options shared by the recognizer and the serializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertOptions {
    pub labels: LabelSet,
    /// Icon glyphs keyed by upper-case label.
    pub icons: BTreeMap<String, String>,
    pub class_prefix: String,
    /// Recognize alerts nested inside other alerts.
    pub parse_nested: bool,
    pub case_sensitive_labels: bool,
    pub markdown_style: MarkdownStyle,
}

impl Default for AlertOptions {
    fn default() -> Self {
        Self {
            labels: LabelSet::default(),
            icons: BTreeMap::new(),
            class_prefix: DEFAULT_CLASS_PREFIX.to_owned(),
            parse_nested: true,
            case_sensitive_labels: false,
            markdown_style: MarkdownStyle::Bare,
        }
    }
}

impl AlertOptions {
    #[must_use]
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// Set the icon shown before the title of one label.
    #[must_use]
    pub fn with_icon(mut self, label: &str, icon: impl Into<String>) -> Self {
        self.icons.insert(label.to_uppercase(), icon.into());
        self
    }

    #[must_use]
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_parse_nested(mut self, parse_nested: bool) -> Self {
        self.parse_nested = parse_nested;
        self
    }

    #[must_use]
    pub fn with_case_sensitive_labels(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive_labels = case_sensitive;
        self
    }

    #[must_use]
    pub fn with_markdown_style(mut self, style: MarkdownStyle) -> Self {
        self.markdown_style = style;
        self
    }

    #[must_use]
    pub fn icon_for(&self, kind: &AlertKind) -> Option<&str> {
        self.icons.get(kind.wire_label()).map(String::as_str)
    }
}
