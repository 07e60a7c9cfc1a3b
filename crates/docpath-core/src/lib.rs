//! DocPath Core - Package hierarchy resolution for documentation links
//!
//! This crate turns the set of dotted package identifiers found in a
//! documented codebase into a rooted package tree, and answers "how do I get
//! from the page of package A to the page of package B" as a sequence of
//! ascend/descend steps:
//! - Concurrent identifier indexing
//! - Signed segment distances and the pairwise distance matrix
//! - Connectivity repair through virtual common-ancestor packages
//! - Alpha-rooted spanning tree construction
//! - Path resolution and relative link rendering

pub mod adjacency;
pub mod builder;
pub mod distance;
pub mod error;
pub mod identifier;
pub mod index;
pub mod link;
pub mod repair;
pub mod resolver;
pub mod tree;

// Re-exports for convenience
pub use adjacency::{AdjacencyBuilder, DistanceMatrix};
pub use builder::{BuilderConfig, PackageTreeBuilder};
pub use distance::{distance, Distance};
pub use error::{ResolveError, Result};
pub use index::{NodeId, NodeOrigin, PackageIndex, PackageNode};
pub use link::LinkStyle;
pub use repair::{repair, RepairReport};
pub use resolver::{PackageTree, Step, TreeStats};
pub use tree::{build_tree, RootedTree, TreeNode, TreeNodeKind};
