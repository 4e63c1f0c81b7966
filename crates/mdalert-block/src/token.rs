//! Flat block tokens emitted by rules.

use std::collections::BTreeMap;

/// A single entry in the token stream.
///
/// Containers are represented as an opening token (`nesting == 1`) and a
/// closing token (`nesting == -1`) sharing a base type (`blockquote_open` /
/// `blockquote_close`). Leaves such as `inline`, `fence` or `hr` have
/// `nesting == 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token type, e.g. `paragraph_open` or `inline`.
    pub kind: String,
    /// HTML tag name associated with the token.
    pub tag: String,
    /// `1` opens, `-1` closes, `0` is self-contained.
    pub nesting: i8,
    /// Nesting depth at which the token was pushed.
    pub level: usize,
    /// Source line range `[begin, end)` the token covers.
    pub map: Option<(usize, usize)>,
    /// Raw text payload.
    pub content: String,
    /// Fence info string, or the start number of an ordered list.
    pub info: String,
    /// Source markup, e.g. `>` or the fence characters.
    pub markup: String,
    /// HTML attributes.
    pub attrs: Vec<(String, String)>,
    /// Free-form metadata extensions attach.
    pub meta: BTreeMap<String, String>,
    /// Always true for tokens produced by the block tokenizer.
    pub block: bool,
    /// Hidden tokens are skipped by renderers; tight list paragraphs are hidden.
    pub hidden: bool,
}

impl Token {
    /// Create a block token with empty payload.
    #[must_use]
    pub fn new(kind: impl Into<String>, tag: impl Into<String>, nesting: i8) -> Self {
        Self {
            kind: kind.into(),
            tag: tag.into(),
            nesting,
            level: 0,
            map: None,
            content: String::new(),
            info: String::new(),
            markup: String::new(),
            attrs: Vec::new(),
            meta: BTreeMap::new(),
            block: true,
            hidden: false,
        }
    }

    /// Look up an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Look up a metadata value.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// Base type with any `_open` / `_close` suffix removed.
    #[must_use]
    pub fn base_kind(&self) -> &str {
        self.kind
            .strip_suffix("_open")
            .or_else(|| self.kind.strip_suffix("_close"))
            .unwrap_or(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces_existing() {
        let mut token = Token::new("div_open", "div", 1);
        token.set_attr("class", "a");
        token.set_attr("class", "b");

        assert_eq!(token.attr("class"), Some("b"));
        assert_eq!(token.attrs.len(), 1);
    }

    #[test]
    fn test_base_kind_strips_suffix() {
        assert_eq!(Token::new("alert_open", "div", 1).base_kind(), "alert");
        assert_eq!(Token::new("alert_close", "div", -1).base_kind(), "alert");
        assert_eq!(Token::new("inline", "", 0).base_kind(), "inline");
    }
}
