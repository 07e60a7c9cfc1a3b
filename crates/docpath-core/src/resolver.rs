//! Relative path resolution between packages
//!
//! `PackageTree` is the read-only structure handed to page rendering once the
//! identifier set is closed. A path from one package to another climbs parent
//! links until it reaches a package that contains the target, then walks down
//! the child whose identifier prefixes the target at each level.

use serde::{Deserialize, Serialize};

use crate::distance::{distance, Distance};
use crate::error::{ResolveError, Result};
use crate::identifier::{is_ancestor, is_ancestor_or_self, segments, strip_ancestor};
use crate::index::NodeId;
use crate::repair::RepairReport;
use crate::tree::{RootedTree, TreeNode};

/// One hop of a resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "lowercase")]
pub enum Step {
    /// Move to the parent package, `levels` directories up
    Ascend { levels: usize },
    /// Move into a child package through the listed directory segments
    Descend {
        package: String,
        segments: Vec<String>,
    },
}

impl Step {
    fn ascend(levels: i32) -> Self {
        Step::Ascend {
            levels: levels.unsigned_abs() as usize,
        }
    }

    fn descend(parent: &str, child: &str) -> Self {
        let rest = strip_ancestor(parent, child).unwrap_or_default();
        Step::Descend {
            package: child.to_string(),
            segments: segments(rest).map(str::to_string).collect(),
        }
    }
}

/// Summary counts for a built tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Packages supplied by producers
    pub packages: usize,
    /// Common ancestors synthesized by repair
    pub virtual_nodes: usize,
    /// Tree nodes, alpha included
    pub nodes: usize,
    /// Largest number of hops from alpha
    pub max_depth: usize,
}

/// Immutable package hierarchy answering path queries.
#[derive(Debug, Clone)]
pub struct PackageTree {
    tree: RootedTree,
    report: RepairReport,
}

impl PackageTree {
    pub(crate) fn new(tree: RootedTree, report: RepairReport) -> Self {
        Self { tree, report }
    }

    /// Build a tree from a set of identifiers with default settings.
    pub fn from_identifiers<I, S>(identifiers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let builder = crate::builder::PackageTreeBuilder::new();
        builder.add_all(identifiers);
        builder.build()
    }

    /// Whether the package is known, real or virtual.
    pub fn contains(&self, identifier: &str) -> bool {
        self.tree.id(identifier).is_some()
    }

    /// Whether the package was discovered and so has pages of its own.
    ///
    /// Virtual packages only exist to join the tree, so renderers link to
    /// documented packages and fall back to plain text for everything else.
    pub fn is_documented(&self, identifier: &str) -> bool {
        self.tree
            .id(identifier)
            .and_then(|id| self.tree.node(id))
            .is_some_and(|node| !node.is_virtual())
    }

    /// Structural distance between two known packages.
    pub fn distance(&self, source: &str, target: &str) -> Result<Distance> {
        self.require(source)?;
        self.require(target)?;
        Ok(distance(source, target))
    }

    /// Resolve the hops leading from `source` to `target`.
    ///
    /// Returns an empty sequence when both are the same package.
    pub fn resolve(&self, source: &str, target: &str) -> Result<Vec<Step>> {
        let source_id = self.require(source)?;
        let target_id = self.require(target)?;

        let mut steps = Vec::new();
        let mut current = source_id;

        while current != target_id && !self.covers(current, target) {
            let Some(parent) = self.tree.parent(current) else {
                return Err(ResolveError::DisconnectedGraph {
                    unreached: vec![source.to_string()],
                });
            };
            let levels = self.tree.weight(parent, current).unwrap_or_default();
            // Alpha and the global package share a directory
            if levels != 0 {
                steps.push(Step::ascend(levels));
            }
            current = parent;
        }

        while current != target_id {
            let parent_identifier = self.identifier(current);
            let Some(child) = self.tree.children(current).into_iter().find(|&child| {
                is_ancestor_or_self(self.identifier(child), target)
            }) else {
                return Err(ResolveError::DisconnectedGraph {
                    unreached: vec![target.to_string()],
                });
            };
            let child_identifier = self.identifier(child);
            if child_identifier != parent_identifier {
                steps.push(Step::descend(parent_identifier, child_identifier));
            }
            current = child;
        }

        Ok(steps)
    }

    /// Depth-first walk yielding `(node, hops from alpha)`, alpha first.
    pub fn iter(&self) -> impl Iterator<Item = (&TreeNode, usize)> + '_ {
        self.tree
            .walk()
            .into_iter()
            .filter_map(|(id, level)| self.tree.node(id).map(|node| (node, level)))
    }

    /// The underlying rooted tree.
    pub fn tree(&self) -> &RootedTree {
        &self.tree
    }

    /// What connectivity repair did while building.
    pub fn repair_report(&self) -> &RepairReport {
        &self.report
    }

    /// Packages supplied by producers, in id order.
    pub fn packages(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.tree.len())
            .filter_map(|id| self.tree.node(id))
            .filter(|node| !node.is_alpha() && !node.is_virtual())
            .map(|node| node.identifier.as_str())
    }

    /// Node and depth counts.
    pub fn stats(&self) -> TreeStats {
        let virtual_nodes = (0..self.tree.len())
            .filter_map(|id| self.tree.node(id))
            .filter(|node| node.is_virtual())
            .count();
        TreeStats {
            packages: self.packages().count(),
            virtual_nodes,
            nodes: self.tree.len(),
            max_depth: self.tree.max_depth(),
        }
    }

    fn require(&self, identifier: &str) -> Result<NodeId> {
        self.tree
            .id(identifier)
            .ok_or_else(|| ResolveError::unknown(identifier))
    }

    fn identifier(&self, id: NodeId) -> &str {
        self.tree.identifier(id).unwrap_or_default()
    }

    /// Whether `node` is a structural ancestor of `target`, alpha covering all.
    fn covers(&self, node: NodeId, target: &str) -> bool {
        node == self.tree.alpha() || is_ancestor(self.identifier(node), target)
    }
}
