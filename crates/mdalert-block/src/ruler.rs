//! Ordered registry of block rules.
//!
//! Rules are tried in registration order; the first one that returns `true`
//! claims the line. Each rule also names the *alternate chains* it belongs to:
//! a rule in the `paragraph` chain may interrupt an open paragraph, one in the
//! `blockquote` chain ends a quote's lazy continuation, and so on.

use std::fmt;
use std::sync::Arc;

use crate::error::RulerError;
use crate::state::BlockState;

/// A block-level parsing rule.
///
/// Called with the line window `[start, end)`. When `silent` is `true` the
/// rule is being probed as a terminator and must only report whether it
/// *could* start at `start`, leaving the state untouched. Otherwise a matching
/// rule pushes its tokens, advances `state.line` past the consumed lines, and
/// returns `true`.
pub trait BlockRule: Send + Sync {
    fn check(&self, state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool;
}

impl<F> BlockRule for F
where
    F: Fn(&mut BlockState<'_>, usize, usize, bool) -> bool + Send + Sync,
{
    fn check(&self, state: &mut BlockState<'_>, start: usize, end: usize, silent: bool) -> bool {
        self(state, start, end, silent)
    }
}

#[derive(Clone)]
struct RuleEntry {
    name: String,
    enabled: bool,
    alt: Vec<String>,
    rule: Arc<dyn BlockRule>,
}

/// Ordered, named collection of [`BlockRule`]s.
#[derive(Clone, Default)]
pub struct Ruler {
    rules: Vec<RuleEntry>,
}

impl Ruler {
    /// Create an empty ruler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule at the lowest priority.
    pub fn push<R>(&mut self, name: &str, rule: R, alt: &[&str]) -> Result<(), RulerError>
    where
        R: BlockRule + 'static,
    {
        let entry = self.entry(name, rule, alt)?;
        self.rules.push(entry);
        Ok(())
    }

    /// Insert a rule immediately before `anchor`.
    pub fn before<R>(
        &mut self,
        anchor: &str,
        name: &str,
        rule: R,
        alt: &[&str],
    ) -> Result<(), RulerError>
    where
        R: BlockRule + 'static,
    {
        let index = self.position(anchor)?;
        let entry = self.entry(name, rule, alt)?;
        self.rules.insert(index, entry);
        Ok(())
    }

    /// Insert a rule immediately after `anchor`.
    pub fn after<R>(
        &mut self,
        anchor: &str,
        name: &str,
        rule: R,
        alt: &[&str],
    ) -> Result<(), RulerError>
    where
        R: BlockRule + 'static,
    {
        let index = self.position(anchor)?;
        let entry = self.entry(name, rule, alt)?;
        self.rules.insert(index + 1, entry);
        Ok(())
    }

    /// Re-enable a disabled rule.
    pub fn enable(&mut self, name: &str) -> Result<(), RulerError> {
        let index = self.position(name)?;
        self.rules[index].enabled = true;
        Ok(())
    }

    /// Disable a rule without removing it.
    pub fn disable(&mut self, name: &str) -> Result<(), RulerError> {
        let index = self.position(name)?;
        self.rules[index].enabled = false;
        Ok(())
    }

    /// Whether a rule is registered and enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.rules.iter().any(|r| r.name == name && r.enabled)
    }

    /// Rule names in priority order, including disabled ones.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name.as_str())
    }

    /// Enabled rules of a chain in priority order. The empty chain name
    /// selects every enabled rule.
    pub fn chain<'r>(&'r self, alt: &'r str) -> impl Iterator<Item = &'r Arc<dyn BlockRule>> {
        self.rules
            .iter()
            .filter(move |r| r.enabled && (alt.is_empty() || r.alt.iter().any(|a| a == alt)))
            .map(|r| &r.rule)
    }

    fn position(&self, name: &str) -> Result<usize, RulerError> {
        self.rules
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| RulerError::UnknownRule(name.to_owned()))
    }

    /// Append a built-in rule whose name is known to be unique.
    pub(crate) fn with_builtin<R>(mut self, name: &str, rule: R, alt: &[&str]) -> Self
    where
        R: BlockRule + 'static,
    {
        debug_assert!(self.position(name).is_err(), "duplicate built-in rule {name}");
        self.rules.push(RuleEntry::new(name, rule, alt));
        self
    }

    fn entry<R>(&self, name: &str, rule: R, alt: &[&str]) -> Result<RuleEntry, RulerError>
    where
        R: BlockRule + 'static,
    {
        if self.rules.iter().any(|r| r.name == name) {
            return Err(RulerError::DuplicateRule(name.to_owned()));
        }
        Ok(RuleEntry::new(name, rule, alt))
    }
}

impl RuleEntry {
    fn new<R>(name: &str, rule: R, alt: &[&str]) -> Self
    where
        R: BlockRule + 'static,
    {
        Self {
            name: name.to_owned(),
            enabled: true,
            alt: alt.iter().map(|a| (*a).to_owned()).collect(),
            rule: Arc::new(rule),
        }
    }
}

impl fmt::Debug for Ruler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| (&r.name, r.enabled, &r.alt)))
            .finish()
    }
}
