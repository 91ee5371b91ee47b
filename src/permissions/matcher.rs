//! Segment-wise wildcard matching

use super::permission::{Permission, WILDCARD};

/// Whether `pattern` covers the namespace path of `target`
///
/// The pattern is a left-anchored prefix: it must not be longer than the
/// target, and each of its segments must equal the target's segment at the
/// same position unless it is the wildcard `*`. Target segments past the end
/// of the pattern are not checked. Signs play no part.
///
/// ```
/// use nsperm::{matches, Permission};
///
/// let pattern = Permission::parse("a:*").unwrap();
/// assert!(matches(&pattern, &Permission::parse("a:c").unwrap()));
/// assert!(matches(&pattern, &Permission::parse("a:c:d").unwrap()));
/// assert!(!matches(&pattern, &Permission::parse("b").unwrap()));
/// ```
pub fn matches(pattern: &Permission, target: &Permission) -> bool {
    if pattern.len() > target.len() {
        return false;
    }

    pattern
        .segments()
        .iter()
        .zip(target.segments())
        .all(|(want, have)| want == WILDCARD || want == have)
}
