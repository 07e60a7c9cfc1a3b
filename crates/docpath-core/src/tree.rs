//! Alpha-rooted package tree
//!
//! The tree adds one synthetic root, the alpha node, standing for the global
//! package, and grows a spanning tree from it over the repaired distance
//! graph. From each dequeued node the builder looks at the unvisited packages
//! it is an ancestor of, takes every candidate at the closest positive
//! distance as a child, and repeats on the candidates not covered by those
//! children. Siblings at equal depth therefore all hang off their shared
//! ancestor instead of forming an arbitrary chain.
//!
//! The distance from alpha to a node is the node's segment count. If the
//! global package itself is indexed it is alpha's only child, with weight 0.

use std::collections::{HashMap, VecDeque};
use std::fmt;

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::adjacency::DistanceMatrix;
use crate::distance::{depth, Distance};
use crate::error::{ResolveError, Result};
use crate::index::{NodeId, NodeOrigin, PackageNode};

/// Kind of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeNodeKind {
    /// Synthetic root standing for the global package
    Alpha,
    /// Package supplied by a producer
    Discovered,
    /// Common ancestor synthesized by connectivity repair
    Virtual,
}

/// A node of the rooted tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub identifier: String,
    pub kind: TreeNodeKind,
}

impl TreeNode {
    fn alpha() -> Self {
        Self {
            identifier: String::new(),
            kind: TreeNodeKind::Alpha,
        }
    }

    pub fn is_alpha(&self) -> bool {
        self.kind == TreeNodeKind::Alpha
    }

    pub fn is_virtual(&self) -> bool {
        self.kind == TreeNodeKind::Virtual
    }
}

impl From<&PackageNode> for TreeNode {
    fn from(node: &PackageNode) -> Self {
        Self {
            identifier: node.identifier.clone(),
            kind: match node.origin {
                NodeOrigin::Discovered => TreeNodeKind::Discovered,
                NodeOrigin::Virtual => TreeNodeKind::Virtual,
            },
        }
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TreeNodeKind::Alpha => write!(f, "(root)"),
            TreeNodeKind::Discovered if self.identifier.is_empty() => write!(f, "(global)"),
            TreeNodeKind::Discovered => write!(f, "{}", self.identifier),
            TreeNodeKind::Virtual if self.identifier.is_empty() => write!(f, "(global, virtual)"),
            TreeNodeKind::Virtual => write!(f, "{} (virtual)", self.identifier),
        }
    }
}

/// Immutable, alpha-rooted package tree.
///
/// Node ids match the index ids; alpha is the last node. Edges run parent →
/// child and carry the positive segment distance between them.
#[derive(Debug, Clone)]
pub struct RootedTree {
    graph: DiGraph<TreeNode, i32>,
    parents: Vec<Option<NodeId>>,
    ids: HashMap<String, NodeId>,
    alpha: NodeId,
}

impl RootedTree {
    /// Id of the alpha node.
    pub fn alpha(&self) -> NodeId {
        self.alpha
    }

    /// Number of nodes, alpha included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the tree holds nothing but alpha.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    /// Node record for an id.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// Identifier of a node (empty for alpha).
    pub fn identifier(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.identifier.as_str())
    }

    /// Id of an indexed identifier. Alpha is never returned.
    pub fn id(&self, identifier: &str) -> Option<NodeId> {
        self.ids.get(identifier).copied()
    }

    /// Parent of a node; `None` for alpha.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id).copied().flatten()
    }

    /// Children of a node, ordered by identifier.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut children: Vec<NodeId> = self
            .graph
            .neighbors_directed(NodeIndex::new(id), Direction::Outgoing)
            .map(|child| child.index())
            .collect();
        children.sort_by(|a, b| {
            let left = &self.graph[NodeIndex::new(*a)].identifier;
            let right = &self.graph[NodeIndex::new(*b)].identifier;
            left.cmp(right)
        });
        children
    }

    /// Weight of the tree edge between two adjacent nodes.
    ///
    /// Positive from parent to child, negated from child to parent.
    pub fn weight(&self, from: NodeId, to: NodeId) -> Option<i32> {
        let (from_idx, to_idx) = (NodeIndex::new(from), NodeIndex::new(to));
        if let Some(edge) = self.graph.find_edge(from_idx, to_idx) {
            return Some(self.graph[edge]);
        }
        self.graph
            .find_edge(to_idx, from_idx)
            .map(|edge| -self.graph[edge])
    }

    /// Number of parent hops from a node up to alpha.
    pub fn depth(&self, id: NodeId) -> usize {
        std::iter::successors(self.parent(id), |&p| self.parent(p)).count()
    }

    /// Largest hop count from alpha to any node.
    pub fn max_depth(&self) -> usize {
        (0..self.len()).map(|id| self.depth(id)).max().unwrap_or(0)
    }

    /// Depth-first walk from alpha, yielding `(id, hops from alpha)`.
    ///
    /// Siblings are visited in identifier order.
    pub fn walk(&self) -> Vec<(NodeId, usize)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack = vec![(self.alpha, 0)];
        while let Some((id, level)) = stack.pop() {
            out.push((id, level));
            for child in self.children(id).into_iter().rev() {
                stack.push((child, level + 1));
            }
        }
        out
    }

    /// Render the tree as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[]))
    }

    /// Underlying petgraph instance.
    pub fn inner(&self) -> &DiGraph<TreeNode, i32> {
        &self.graph
    }
}

/// Build the alpha-rooted tree from a repaired distance matrix.
///
/// `nodes` must be the index arena the matrix was built from, in id order.
/// Fails with [`ResolveError::DisconnectedGraph`] if some node cannot be
/// reached from alpha.
pub fn build_tree(nodes: &[PackageNode], matrix: &DistanceMatrix) -> Result<RootedTree> {
    let n = matrix.size();
    debug_assert_eq!(nodes.len(), n, "matrix and index out of sync");
    let builder = TreeBuilder { nodes, matrix, alpha: n };
    builder.build()
}

struct TreeBuilder<'a> {
    nodes: &'a [PackageNode],
    matrix: &'a DistanceMatrix,
    alpha: NodeId,
}

impl TreeBuilder<'_> {
    /// Distance with alpha standing in for the global package.
    fn alpha_distance(&self, source: NodeId, target: NodeId) -> Distance {
        if source == target {
            Distance::Related(0)
        } else if source == self.alpha {
            Distance::Related(depth(&self.nodes[target].identifier))
        } else if target == self.alpha {
            self.alpha_distance(target, source).reversed()
        } else {
            self.matrix.get(source, target)
        }
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        if ancestor == self.alpha {
            node != self.alpha
        } else {
            self.matrix.get(ancestor, node).is_descendant()
        }
    }

    fn build(&self) -> Result<RootedTree> {
        let n = self.alpha;
        let mut graph = DiGraph::with_capacity(n + 1, n);
        for node in self.nodes {
            graph.add_node(TreeNode::from(node));
        }
        graph.add_node(TreeNode::alpha());

        let mut parents: Vec<Option<NodeId>> = vec![None; n + 1];
        let mut visited = vec![false; n + 1];
        let mut queue = VecDeque::from([self.alpha]);
        visited[self.alpha] = true;

        let mut attach = |parent: NodeId,
                          child: NodeId,
                          weight: i32,
                          visited: &mut Vec<bool>,
                          queue: &mut VecDeque<NodeId>| {
            graph.add_edge(NodeIndex::new(parent), NodeIndex::new(child), weight);
            parents[child] = Some(parent);
            visited[child] = true;
            queue.push_back(child);
        };

        while let Some(current) = queue.pop_front() {
            let mut candidates: Vec<NodeId> = (0..n)
                .filter(|&m| !visited[m] && self.is_ancestor(current, m))
                .collect();

            if current == self.alpha {
                // The global package sits at distance 0 and covers everything else
                if let Some(pos) = candidates
                    .iter()
                    .position(|&m| self.nodes[m].identifier.is_empty())
                {
                    let global = candidates.remove(pos);
                    attach(current, global, 0, &mut visited, &mut queue);
                    candidates.clear();
                }
            }

            while let Some(closest) = candidates
                .iter()
                .filter_map(|&m| self.alpha_distance(current, m).finite())
                .filter(|&d| d > 0)
                .min()
            {
                let layer: Vec<NodeId> = candidates
                    .iter()
                    .copied()
                    .filter(|&m| self.alpha_distance(current, m) == Distance::Related(closest))
                    .collect();
                trace!(
                    "Layer at distance {} below {:?}: {} node(s)",
                    closest,
                    self.label(current),
                    layer.len()
                );
                for &child in &layer {
                    attach(current, child, closest, &mut visited, &mut queue);
                }
                candidates.retain(|&m| {
                    !visited[m] && !layer.iter().any(|&s| self.is_ancestor(s, m))
                });
            }
        }

        let unreached: Vec<String> = (0..n)
            .filter(|&m| !visited[m])
            .map(|m| self.nodes[m].identifier.clone())
            .collect();
        if !unreached.is_empty() {
            return Err(ResolveError::DisconnectedGraph { unreached });
        }

        let ids = self
            .nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (node.identifier.clone(), id))
            .collect();

        debug!("Built rooted tree with {} node(s)", n + 1);
        Ok(RootedTree {
            graph,
            parents,
            ids,
            alpha: self.alpha,
        })
    }

    fn label(&self, id: NodeId) -> &str {
        if id == self.alpha {
            "(root)"
        } else {
            &self.nodes[id].identifier
        }
    }
}
