//! Dotted package identifier helpers.
//!
//! Identifiers are opaque strings made of `.`-separated segments. The empty
//! string is the global root and is an ancestor of every other identifier.
//! Prefix relations only hold on whole segments: `a.b` is an ancestor of
//! `a.b.c` but not of `a.bc`.

/// Segment separator within a package identifier.
pub const SEPARATOR: char = '.';

/// Iterate over the segments of an identifier (none for the root).
pub fn segments(identifier: &str) -> impl Iterator<Item = &str> {
    let source = if identifier.is_empty() {
        None
    } else {
        Some(identifier.split(SEPARATOR))
    };
    source.into_iter().flatten()
}

/// Number of segments in an identifier; `0` for the root.
pub fn segment_count(identifier: &str) -> usize {
    if identifier.is_empty() {
        0
    } else {
        identifier.matches(SEPARATOR).count() + 1
    }
}

/// Return the remainder of `identifier` below `ancestor`, if `ancestor` is a
/// proper dotted prefix of it.
///
/// ```
/// use docpath_core::identifier::strip_ancestor;
///
/// assert_eq!(strip_ancestor("a.b", "a.b.c.d"), Some("c.d"));
/// assert_eq!(strip_ancestor("", "a.b"), Some("a.b"));
/// assert_eq!(strip_ancestor("a.b", "a.bc"), None);
/// assert_eq!(strip_ancestor("a.b", "a.b"), None);
/// ```
pub fn strip_ancestor<'a>(ancestor: &str, identifier: &'a str) -> Option<&'a str> {
    let rest = if ancestor.is_empty() {
        identifier
    } else {
        identifier
            .strip_prefix(ancestor)?
            .strip_prefix(SEPARATOR)?
    };
    (!rest.is_empty()).then_some(rest)
}

/// Whether `ancestor` is a proper dotted prefix of `identifier`.
pub fn is_ancestor(ancestor: &str, identifier: &str) -> bool {
    strip_ancestor(ancestor, identifier).is_some()
}

/// Whether `ancestor` equals `identifier` or is a proper dotted prefix of it.
pub fn is_ancestor_or_self(ancestor: &str, identifier: &str) -> bool {
    ancestor == identifier || is_ancestor(ancestor, identifier)
}

/// Longest common prefix of two identifiers, on whole segments.
///
/// ```
/// use docpath_core::identifier::common_prefix;
///
/// assert_eq!(common_prefix("a.b.c", "a.b.d"), "a.b");
/// assert_eq!(common_prefix("a.bc", "a.bd"), "a");
/// assert_eq!(common_prefix("x.y", "z.w"), "");
/// ```
pub fn common_prefix<'a>(left: &'a str, right: &str) -> &'a str {
    let mut len = 0;
    for (index, (l, r)) in segments(left).zip(segments(right)).enumerate() {
        if l != r {
            break;
        }
        // Account for the separator preceding every segment but the first
        len += l.len() + usize::from(index > 0);
    }
    &left[..len]
}

/// Longest common prefix shared by every identifier in `identifiers`.
///
/// Returns the root for an empty input.
pub fn common_prefix_of_all<'a, I>(identifiers: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut iter = identifiers.into_iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut prefix = first;
    for identifier in iter {
        prefix = common_prefix(prefix, identifier);
        if prefix.is_empty() {
            break;
        }
    }
    prefix.to_string()
}
