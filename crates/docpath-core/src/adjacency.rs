//! Pairwise distance matrix over indexed packages
//!
//! The matrix is derived state: it can be rebuilt at any time from the index.
//! Rebuilds after the index grows are incremental through a sparse cache of
//! already evaluated pairs, keyed by node id. Ids are append-only, so a cached
//! pair never goes stale as long as the builder stays bound to one index.

use std::collections::HashMap;

use tracing::trace;

use crate::distance::{distance, Distance};
use crate::index::{NodeId, PackageIndex, PackageNode};

/// Square matrix of signed distances, indexed by node id.
///
/// Cell `(i, j)` holds `distance(identifier(i), identifier(j))`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Distance>,
}

impl DistanceMatrix {
    /// Number of nodes covered by the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from node `i` to node `j`.
    ///
    /// # Panics
    ///
    /// Panics if either id is out of bounds.
    pub fn get(&self, i: NodeId, j: NodeId) -> Distance {
        assert!(i < self.size && j < self.size, "node id out of bounds");
        self.cells[i * self.size + j]
    }

    /// Row of distances from node `i`.
    pub fn row(&self, i: NodeId) -> &[Distance] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }

    /// Nodes with a finite, non-self relation from node `i`.
    pub fn links(&self, i: NodeId) -> impl Iterator<Item = (NodeId, i32)> + '_ {
        self.row(i)
            .iter()
            .enumerate()
            .filter(move |(j, _)| *j != i)
            .filter_map(|(j, d)| d.finite().map(|d| (j, d)))
    }

    /// Whether node `i` is unrelated to every other node.
    pub fn is_isolated(&self, i: NodeId) -> bool {
        self.links(i).next().is_none()
    }

    /// Ids of all isolated nodes, ascending.
    pub fn isolated_nodes(&self) -> Vec<NodeId> {
        (0..self.size).filter(|&i| self.is_isolated(i)).collect()
    }
}

/// Builds distance matrices, reusing previously evaluated pairs.
#[derive(Debug, Default)]
pub struct AdjacencyBuilder {
    /// Evaluated pairs `(i, j)` with `i < j`
    cache: HashMap<(NodeId, NodeId), Distance>,
    /// Number of distance evaluations performed so far
    evaluations: usize,
}

impl AdjacencyBuilder {
    /// Create a builder with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the matrix for the current contents of `index`.
    pub fn build_from_index(&mut self, index: &PackageIndex) -> DistanceMatrix {
        let nodes = index.nodes();
        self.build(&nodes)
    }

    /// Build the matrix for `nodes`, in id order.
    pub fn build(&mut self, nodes: &[PackageNode]) -> DistanceMatrix {
        let n = nodes.len();
        let mut cells = vec![Distance::Unrelated; n * n];

        for i in 0..n {
            cells[i * n + i] = Distance::Related(0);
            for j in (i + 1)..n {
                let d = match self.cache.get(&(i, j)) {
                    Some(&d) => d,
                    None => {
                        let d = distance(&nodes[i].identifier, &nodes[j].identifier);
                        trace!(
                            "distance({:?}, {:?}) = {}",
                            nodes[i].identifier,
                            nodes[j].identifier,
                            d
                        );
                        self.evaluations += 1;
                        self.cache.insert((i, j), d);
                        d
                    }
                };
                cells[i * n + j] = d;
                cells[j * n + i] = d.reversed();
            }
        }

        DistanceMatrix { size: n, cells }
    }

    /// Number of cached pairs.
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    /// Number of distance evaluations performed across all builds.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}
