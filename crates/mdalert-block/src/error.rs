//! Host error types.

/// Error raised while registering or toggling block rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulerError {
    /// No rule with the given name is registered.
    #[error("unknown block rule: {0}")]
    UnknownRule(String),
    /// A rule with the given name is already registered.
    #[error("block rule already registered: {0}")]
    DuplicateRule(String),
}

/// Error raised when a token stream cannot be folded into a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// A closing token appeared with no open container.
    #[error("closing token `{kind}` has no matching opening token")]
    UnexpectedClose {
        /// Type of the stray closing token.
        kind: String,
    },
    /// A closing token does not match the innermost open container.
    #[error("opening token `{opening}` closed by `{closing}`")]
    Mismatched {
        /// Type of the innermost opening token.
        opening: String,
        /// Type of the closing token that was found.
        closing: String,
    },
    /// The stream ended with containers still open.
    #[error("opening token `{kind}` is never closed")]
    Unclosed {
        /// Type of the unclosed opening token.
        kind: String,
    },
}
