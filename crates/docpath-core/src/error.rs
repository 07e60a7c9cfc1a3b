//! Error types for package tree construction and path resolution.

use thiserror::Error;

/// Errors surfaced by the package tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Identifier was never indexed
    #[error("unknown package identifier '{identifier}'")]
    UnknownIdentifier { identifier: String },

    /// Tree construction left nodes unreachable from the root
    #[error("package graph is disconnected: {} node(s) unreachable from root ({})", unreached.len(), unreached.join(", "))]
    DisconnectedGraph { unreached: Vec<String> },
}

impl ResolveError {
    /// Create a new UnknownIdentifier error.
    pub fn unknown(identifier: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            identifier: identifier.into(),
        }
    }
}

/// Result type for resolver operations.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_identifier_display() {
        let err = ResolveError::unknown("com.example.missing");
        assert_eq!(
            err.to_string(),
            "unknown package identifier 'com.example.missing'"
        );
    }

    #[test]
    fn test_disconnected_graph_display() {
        let err = ResolveError::DisconnectedGraph {
            unreached: vec!["a.b".to_string(), "c".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("2 node(s)"));
        assert!(message.contains("a.b, c"));
    }
}
