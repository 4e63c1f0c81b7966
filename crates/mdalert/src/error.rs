//! Error types for alert configuration and plugin installation.

use mdalert_block::{RulerError, TreeError};

/// Error building or installing the alert extension.
///
/// A line that does not carry an alert marker is never an error; the rule
/// simply declines it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AlertError {
    /// A marker grammar failed to compile.
    #[error("invalid pattern for marker grammar `{grammar}`")]
    InvalidPattern {
        /// Name of the grammar.
        grammar: String,
        #[source]
        source: regex::Error,
    },

    /// A marker grammar has no `label` capture group.
    #[error("marker grammar `{0}` has no `label` capture group")]
    MissingLabelCapture(String),

    /// The configured label set is empty.
    #[error("label set is empty")]
    EmptyLabelSet,

    /// A label contains characters other than letters, digits and `_`.
    #[error("invalid alert label: {0:?}")]
    InvalidLabel(String),

    /// The `*` wildcard was combined with explicit labels.
    #[error("wildcard label `*` cannot be combined with other labels")]
    MixedWildcard,

    /// Registering the block rule failed.
    #[error("failed to register alert rule")]
    Ruler(#[from] RulerError),

    /// The token stream could not be folded into a tree.
    #[error("malformed token stream")]
    Tree(#[from] TreeError),
}
