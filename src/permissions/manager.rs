//! Permission manager implementation
//!
//! Holds an ordered chain of rules and decides requests with first-match
//! semantics: the first rule whose pattern covers the target decides, and a
//! target no rule covers is denied.

use serde::{Deserialize, Serialize};

use super::permission::Permission;
use crate::core::PermissionResult;

/// Decide `target` against `rules`, first match wins, default deny
///
/// Only the deciding rule's sign is consulted; the target's own sign is
/// ignored. Rule order is the caller's contract: an early broad rule masks
/// any later, more specific one.
pub fn authorize(rules: &[Permission], target: &Permission) -> bool {
    match first_match(rules, target) {
        Some(rule) => {
            tracing::debug!("Permission {} decided by rule {}", target, rule);
            rule.is_allow()
        }
        None => {
            tracing::debug!("Permission {} matched no rule, denying", target);
            false
        }
    }
}

fn first_match<'a>(rules: &'a [Permission], target: &Permission) -> Option<&'a Permission> {
    rules.iter().find(|rule| {
        let hit = rule.matches(target);
        tracing::trace!("Rule {} against {}: {}", rule, target, hit);
        hit
    })
}

/// Ordered rule chain for authorizing permission requests
///
/// Serializes as a list of canonical permission strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionManager {
    rules: Vec<Permission>,
}

impl PermissionManager {
    /// Create a new permission manager with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a manager from rules, kept in the given order
    pub fn with_rules(rules: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Parse every entry as a rule
    ///
    /// The first malformed entry fails the whole load; no partial chain is
    /// returned.
    pub fn from_strs<I, S>(entries: I) -> PermissionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = entries
            .into_iter()
            .map(|entry| Permission::parse(entry.as_ref()))
            .collect::<PermissionResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Append a rule at the end of the chain
    pub fn add_rule(&mut self, rule: Permission) {
        self.rules.push(rule);
    }

    /// Remove all rules
    pub fn clear(&mut self) {
        self.rules.clear();
    }

    /// The rules in evaluation order
    pub fn rules(&self) -> &[Permission] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule that decides `target`, if any
    pub fn first_match(&self, target: &Permission) -> Option<&Permission> {
        first_match(&self.rules, target)
    }

    /// Check the rules for a decision on `target`
    ///
    /// Returns:
    /// - Some(true) if the first matching rule allows
    /// - Some(false) if the first matching rule denies
    /// - None if no rule matches
    pub fn evaluate_rules(&self, target: &Permission) -> Option<bool> {
        self.first_match(target).map(Permission::is_allow)
    }

    /// Decide `target`; no matching rule means deny
    pub fn authorize(&self, target: &Permission) -> bool {
        authorize(&self.rules, target)
    }

    /// Parse `text` and decide it
    pub fn authorize_str(&self, text: &str) -> PermissionResult<bool> {
        let target = Permission::parse(text)?;
        Ok(self.authorize(&target))
    }
}

impl FromIterator<Permission> for PermissionManager {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self::with_rules(iter)
    }
}

impl Extend<Permission> for PermissionManager {
    fn extend<T: IntoIterator<Item = Permission>>(&mut self, iter: T) {
        self.rules.extend(iter);
    }
}
