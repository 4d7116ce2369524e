//! Key paths into a configuration tree

use std::fmt;

/// Ordered sequence of mapping keys leading from a tree root to one location.
///
/// Displayed dotted (`vxlan.topology.switches`). Keys are opaque strings; the dotted form
/// is only a rendering, so keys containing dots are allowed when built programmatically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keys.into_iter().map(Into::into).collect())
    }

    /// Split a dotted path. No escaping; every segment is taken literally.
    pub fn parse_dotted(path: &str) -> Self {
        Self::new(path.split('.'))
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// New path with `key` appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut keys = self.0.clone();
        keys.push(key.into());
        Self(keys)
    }

    pub fn starts_with(&self, prefix: &KeyPath) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// True when `self` is a prefix of `other` and strictly shorter.
    pub fn is_proper_prefix_of(&self, other: &KeyPath) -> bool {
        self.len() < other.len() && other.starts_with(self)
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl From<&[&str]> for KeyPath {
    fn from(keys: &[&str]) -> Self {
        Self::new(keys.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for KeyPath {
    fn from(keys: [&str; N]) -> Self {
        Self::new(keys)
    }
}
