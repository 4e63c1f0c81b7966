//! Alert labels.

use std::fmt;

/// Semantic category of an alert.
///
/// Input labels are case-insensitive. The wire form is upper-case (`NOTE`),
/// the display form title-case (`Note`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
    /// A label admitted by a custom label set, stored upper-case.
    Custom(String),
}

impl AlertKind {
    /// The five GitHub labels in display order.
    pub const BUILTIN: [Self; 5] = [
        Self::Note,
        Self::Tip,
        Self::Important,
        Self::Warning,
        Self::Caution,
    ];

    /// Kind for a label matched in source, in any case.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::builtin(label).unwrap_or_else(|| Self::Custom(label.to_uppercase()))
    }

    /// Built-in kind for a label, in any case.
    #[must_use]
    pub fn builtin(label: &str) -> Option<Self> {
        Self::BUILTIN
            .into_iter()
            .find(|kind| kind.wire_label().eq_ignore_ascii_case(label))
    }

    #[must_use]
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }

    /// Upper-case label as written inside `[!...]`.
    #[must_use]
    pub fn wire_label(&self) -> &str {
        match self {
            Self::Note => "NOTE",
            Self::Tip => "TIP",
            Self::Important => "IMPORTANT",
            Self::Warning => "WARNING",
            Self::Caution => "CAUTION",
            Self::Custom(label) => label,
        }
    }

    /// Title-case label for alert headings: each run of letters starts upper-case.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut out = String::with_capacity(self.wire_label().len());
        let mut at_word_start = true;
        for c in self.wire_label().chars() {
            if c.is_alphabetic() {
                if at_word_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.extend(c.to_lowercase());
                }
                at_word_start = false;
            } else {
                out.push(c);
                at_word_start = true;
            }
        }
        out
    }

    /// Lower-case label used in CSS class names.
    #[must_use]
    pub fn css_suffix(&self) -> String {
        self.wire_label().to_lowercase()
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_from_label_any_case() {
        assert_eq!(AlertKind::from_label("note"), AlertKind::Note);
        assert_eq!(AlertKind::from_label("Tip"), AlertKind::Tip);
        assert_eq!(AlertKind::from_label("IMPORTANT"), AlertKind::Important);
        assert_eq!(AlertKind::from_label("wArNiNg"), AlertKind::Warning);
        assert_eq!(AlertKind::from_label("caution"), AlertKind::Caution);
    }

    #[test]
    fn test_custom_label() {
        let kind = AlertKind::from_label("todo");

        assert_eq!(kind, AlertKind::Custom("TODO".to_owned()));
        assert!(!kind.is_builtin());
        assert_eq!(kind.to_string(), "TODO");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(AlertKind::Important.display_name(), "Important");
        assert_eq!(
            AlertKind::Custom("READ_ME2".to_owned()).display_name(),
            "Read_Me2"
        );
    }

    #[test]
    fn test_css_suffix() {
        assert_eq!(AlertKind::Caution.css_suffix(), "caution");
    }

    #[test]
    fn test_builtin_rejects_unknown() {
        assert_eq!(AlertKind::builtin("bogus"), None);
    }
}
