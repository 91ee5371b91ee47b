//! Permission value and its text encoding
//!
//! A permission is a sign (allow/deny) plus an ordered namespace path,
//! written as colon-separated segments with an optional leading sign token:
//!
//! ```text
//! hello:world      allow, [hello, world]
//! +:hello:world    allow, [hello, world]
//! -:hello:*        deny,  [hello, *]
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::matcher;
use crate::core::{PermissionError, PermissionResult};

/// Separator between segments
pub const SEPARATOR: char = ':';

/// Segment that matches any single segment at its position
pub const WILDCARD: &str = "*";

const ALLOW_TOKEN: &str = "+";
const DENY_TOKEN: &str = "-";

/// A signed namespace path such as `+:files:read` or `-:files:*`
///
/// Equality and hashing follow the canonical text form, so two permissions
/// built in different ways compare equal when they print the same.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    allow: bool,
    segments: Vec<String>,
}

impl Permission {
    /// Create a permission from a sign and segments
    ///
    /// Fails with [`PermissionError::InvalidSyntax`] when `segments` is empty,
    /// holds an empty string, or holds a segment containing the separator.
    pub fn new<I, S>(allow: bool, segments: I) -> PermissionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        validate(&segments)?;
        Ok(Self { allow, segments })
    }

    /// Create an allow permission
    pub fn allow<I, S>(segments: I) -> PermissionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(true, segments)
    }

    /// Create a deny permission
    pub fn deny<I, S>(segments: I) -> PermissionResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(false, segments)
    }

    /// Parse a permission from its text form
    ///
    /// A first token of exactly `+` or `-` is the sign; anything else
    /// (including `+hello`) is a segment and the sign defaults to allow.
    pub fn parse(text: &str) -> PermissionResult<Self> {
        let mut tokens = text.split(SEPARATOR).peekable();

        let allow = match tokens.peek().copied() {
            Some(ALLOW_TOKEN) => {
                tokens.next();
                true
            }
            Some(DENY_TOKEN) => {
                tokens.next();
                false
            }
            _ => true,
        };

        let segments: Vec<String> = tokens.map(str::to_string).collect();
        if let Err(err) = validate(&segments) {
            tracing::debug!("Rejected permission text {:?}", text);
            return Err(err);
        }

        Ok(Self { allow, segments })
    }

    /// Whether this permission allows (`+`) rather than denies (`-`)
    pub fn is_allow(&self) -> bool {
        self.allow
    }

    /// The namespace path
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false` for a valid permission
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Canonical text form: sign token, separator, then the joined segments
    pub fn to_canonical(&self) -> String {
        let sign = if self.allow { ALLOW_TOKEN } else { DENY_TOKEN };
        let mut out = String::with_capacity(
            2 + self.segments.iter().map(|s| s.len() + 1).sum::<usize>(),
        );
        out.push_str(sign);
        for segment in &self.segments {
            out.push(SEPARATOR);
            out.push_str(segment);
        }
        out
    }

    /// Whether this permission, used as a pattern, covers `target`'s path
    ///
    /// Signs are ignored. See [`matcher::matches`].
    pub fn matches(&self, target: &Permission) -> bool {
        matcher::matches(self, target)
    }

    /// Single-rule check: `self` is the rule, `target` the request
    ///
    /// Both the rule and the target must be allow, and the rule's path must
    /// cover the target's. Unlike [`authorize`](super::authorize), the
    /// target's own sign counts here.
    pub fn has_permission(&self, target: &Permission) -> bool {
        self.allow && target.allow && self.matches(target)
    }
}

fn validate(segments: &[String]) -> PermissionResult<()> {
    let malformed = |segment: &String| segment.is_empty() || segment.contains(SEPARATOR);
    if segments.is_empty() || segments.iter().any(malformed) {
        return Err(PermissionError::InvalidSyntax);
    }
    Ok(())
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

impl FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Permission {
    type Error = PermissionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Permission {
    type Error = PermissionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Permission> for String {
    fn from(permission: Permission) -> Self {
        permission.to_canonical()
    }
}

// Segments never contain the separator, so comparing sign and segments is
// the same as comparing canonical forms.
impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.allow == other.allow && self.segments == other.segments
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.allow.hash(state);
        self.segments.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(text: &str) -> Permission {
        Permission::parse(text).unwrap()
    }

    #[test]
    fn test_canonical_form() {
        let cases = [
            (Permission::allow(["hello", "world"]).unwrap(), "+:hello:world"),
            (Permission::allow(["*"]).unwrap(), "+:*"),
            (Permission::deny(["hello", "world"]).unwrap(), "-:hello:world"),
            (Permission::deny(["*"]).unwrap(), "-:*"),
        ];
        for (p, expected) in cases {
            assert_eq!(p.to_canonical(), expected);
            assert_eq!(p.to_string(), expected);
        }
    }

    #[test]
    fn test_parse_signs() {
        let p = perm("hello:world");
        assert!(p.is_allow());
        assert_eq!(p.segments(), ["hello", "world"]);

        let p = perm("+:hello:world");
        assert!(p.is_allow());
        assert_eq!(p.segments(), ["hello", "world"]);

        let p = perm("-:hello:world");
        assert!(!p.is_allow());
        assert_eq!(p.segments(), ["hello", "world"]);

        let p = perm("-:*");
        assert!(!p.is_allow());
        assert_eq!(p.segments(), ["*"]);
    }

    #[test]
    fn test_sign_prefix_is_a_segment() {
        let p = perm("+hello:world");
        assert!(p.is_allow());
        assert_eq!(p.segments(), ["+hello", "world"]);

        let p = perm("-hello:world");
        assert!(p.is_allow());
        assert_eq!(p.segments(), ["-hello", "world"]);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", ":world", "hello::world", "hello:", "+:", "-:", "+", "-", "-::a"] {
            assert_eq!(
                Permission::parse(text),
                Err(PermissionError::InvalidSyntax),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn test_constructor_validation() {
        assert_eq!(
            Permission::allow(Vec::<String>::new()),
            Err(PermissionError::InvalidSyntax)
        );
        assert_eq!(
            Permission::deny(["a", ""]),
            Err(PermissionError::InvalidSyntax)
        );
    }

    #[test]
    fn test_constructor_rejects_separator_in_segment() {
        assert_eq!(
            Permission::allow(["a:b"]),
            Err(PermissionError::InvalidSyntax)
        );
        assert_eq!(
            Permission::deny(["a", "b:*"]),
            Err(PermissionError::InvalidSyntax)
        );

        // Built and parsed values agree on structure, equality and matching
        let built = Permission::allow(["a", "b"]).unwrap();
        let parsed = perm("a:b");
        assert_eq!(built, parsed);
        assert_eq!(built.segments(), parsed.segments());
        assert!(perm("a:*").matches(&built));
        assert_eq!(perm(&built.to_canonical()).segments(), built.segments());
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        use std::collections::HashSet;

        let set: HashSet<Permission> = [
            perm("a:b"),
            perm("+:a:b"),
            Permission::allow(["a", "b"]).unwrap(),
            perm("-:a:b"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&perm("-:a:b")));
    }

    #[test]
    fn test_round_trip() {
        for text in ["a", "-:a:*:c", "+:*", "x:+y:-z", "*:*:*"] {
            let p = perm(text);
            assert_eq!(perm(&p.to_canonical()), p);
        }
    }

    #[test]
    fn test_equality_uses_canonical_form() {
        assert_eq!(perm("hello:world"), perm("+:hello:world"));
        assert_eq!(perm("hello:world"), Permission::allow(["hello", "world"]).unwrap());
        assert_ne!(perm("hello:world"), perm("-:hello:world"));
        assert_ne!(perm("hello"), perm("hello:world"));
    }

    #[test]
    fn test_from_str_and_try_from() {
        let p: Permission = "-:a:b".parse().unwrap();
        assert_eq!(p, perm("-:a:b"));
        assert_eq!(Permission::try_from("a:b").unwrap(), perm("+:a:b"));
        assert!(Permission::try_from(String::from("a::b")).is_err());
    }

    #[test]
    fn test_serialize_json() {
        let p = Permission::allow(["hello", "world"]).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""+:hello:world""#);

        let p = Permission::deny(["*"]).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), r#""-:*""#);
    }

    #[test]
    fn test_deserialize_json() {
        let p: Permission = serde_json::from_str(r#""hello:world""#).unwrap();
        assert_eq!(p, perm("+:hello:world"));

        let list: Vec<Permission> =
            serde_json::from_str(r#"["+:hello:world", "-:*", "a:*:b"]"#).unwrap();
        assert_eq!(list, vec![perm("hello:world"), perm("-:*"), perm("a:*:b")]);
    }

    #[test]
    fn test_deserialize_json_rejects_malformed() {
        let err = serde_json::from_str::<Permission>(r#""""#).unwrap_err();
        assert!(err.to_string().contains("invalid syntax"));

        assert!(serde_json::from_str::<Permission>(r#""a::b""#).is_err());
        assert!(serde_json::from_str::<Permission>("42").is_err());
    }

    #[test]
    fn test_has_permission() {
        let cases = [
            ("hello", "hello", true),
            ("world", "hello", false),
            ("-:hello", "hello", false),
            ("hello", "-:hello", false),
            ("hello:world", "hello:world", true),
            ("hello:*", "hello:world", true),
            ("*", "hello:world", true),
            ("-:*", "hello:world", false),
            ("hello:*:foo", "hello:world:foo", true),
            ("hello:*:foo", "hello:bar:foo", true),
            ("hello:*:bar", "hello:bar:foo", false),
            ("hello:world", "hello", false),
            ("hello:*", "hello", false),
        ];
        for (rule, target, expected) in cases {
            assert_eq!(
                perm(rule).has_permission(&perm(target)),
                expected,
                "rule {} target {}",
                rule,
                target
            );
        }
    }
}
