//! Structural distance between package identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifier::{segment_count, strip_ancestor};

/// Signed segment distance between two identifiers.
///
/// `Related(k)` with `k > 0` means the target lies `k` segments below the
/// source, `k < 0` means it lies `-k` segments above, and `0` means they are
/// the same package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// One identifier is an ancestor of (or equal to) the other
    Related(i32),
    /// Neither identifier is an ancestor of the other
    Unrelated,
}

impl Distance {
    /// The finite distance, if any.
    pub fn finite(self) -> Option<i32> {
        match self {
            Distance::Related(d) => Some(d),
            Distance::Unrelated => None,
        }
    }

    /// Whether the target is a proper descendant of the source.
    pub fn is_descendant(self) -> bool {
        matches!(self, Distance::Related(d) if d > 0)
    }

    /// The distance seen from the other end.
    pub fn reversed(self) -> Self {
        match self {
            Distance::Related(d) => Distance::Related(-d),
            Distance::Unrelated => Distance::Unrelated,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Related(d) => write!(f, "{}", d),
            Distance::Unrelated => write!(f, "∞"),
        }
    }
}

/// Number of segments as a signed distance.
pub(crate) fn depth(identifier: &str) -> i32 {
    i32::try_from(segment_count(identifier)).unwrap_or(i32::MAX)
}

/// Compute the structural distance from `source` to `target`.
///
/// Cases are tried in order: equal identifiers, `target` below `source`,
/// `source` below `target`, unrelated.
pub fn distance(source: &str, target: &str) -> Distance {
    if source == target {
        return Distance::Related(0);
    }
    if let Some(rest) = strip_ancestor(source, target) {
        return Distance::Related(depth(rest));
    }
    if let Some(rest) = strip_ancestor(target, source) {
        return Distance::Related(-depth(rest));
    }
    Distance::Unrelated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_package() {
        assert_eq!(distance("a.b", "a.b"), Distance::Related(0));
        assert_eq!(distance("", ""), Distance::Related(0));
    }

    #[test]
    fn test_subpackage_is_positive() {
        assert_eq!(distance("a", "a.b"), Distance::Related(1));
        assert_eq!(distance("a", "a.b.c.d"), Distance::Related(3));
        assert_eq!(distance("", "x.y"), Distance::Related(2));
    }

    #[test]
    fn test_parent_package_is_negative() {
        assert_eq!(distance("a.b", "a"), Distance::Related(-1));
        assert_eq!(distance("a.b.c.d", "a"), Distance::Related(-3));
        assert_eq!(distance("x.y", ""), Distance::Related(-2));
    }

    #[test]
    fn test_unrelated() {
        assert_eq!(distance("a.b", "a.c"), Distance::Unrelated);
        assert_eq!(distance("a.b", "a.bc"), Distance::Unrelated);
        assert_eq!(distance("x", "y"), Distance::Unrelated);
    }

    #[test]
    fn test_antisymmetry() {
        let ids = ["", "a", "a.b", "a.b.c", "a.c", "b"];
        for source in ids {
            for target in ids {
                assert_eq!(distance(source, target), distance(target, source).reversed());
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Distance::Related(-2).to_string(), "-2");
        assert_eq!(Distance::Unrelated.to_string(), "∞");
    }
}
