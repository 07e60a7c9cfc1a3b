//! Connectivity repair
//!
//! Packages that share no declared ancestor leave the distance graph split.
//! Repair synthesizes virtual common-ancestor packages until every node is
//! related to another node and the graph forms a single component:
//!
//! 1. Each isolated node is linked to the longest dotted prefix it shares with
//!    any other indexed identifier. When that prefix is empty the global
//!    package itself becomes the connecting node.
//! 2. Any remaining clusters are joined under the longest prefix shared by
//!    their roots. The root of a cluster is its shallowest member, which is an
//!    ancestor of every other member, so a single insertion suffices.
//!
//! Virtual nodes are deduplicated by identifier.

use std::collections::BTreeMap;

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adjacency::{AdjacencyBuilder, DistanceMatrix};
use crate::identifier::{common_prefix, common_prefix_of_all, segment_count};
use crate::index::{NodeId, PackageIndex};

/// Summary of a repair run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairReport {
    /// Virtual identifiers inserted, in insertion order
    pub virtual_nodes: Vec<String>,
    /// Nodes found isolated before repair
    pub isolated: usize,
    /// Clusters joined by the component merge (0 if already connected)
    pub components_merged: usize,
    /// Isolation passes executed
    pub passes: usize,
}

impl RepairReport {
    /// Whether the graph needed any repair.
    pub fn is_noop(&self) -> bool {
        self.virtual_nodes.is_empty()
    }
}

/// Repair the graph in place, growing `index` with virtual nodes.
///
/// Returns the repaired matrix, built incrementally through `adjacency`.
pub fn repair(
    index: &PackageIndex,
    adjacency: &mut AdjacencyBuilder,
) -> (DistanceMatrix, RepairReport) {
    let mut report = RepairReport::default();
    let mut matrix = adjacency.build_from_index(index);

    loop {
        let isolated = matrix.isolated_nodes();
        if isolated.is_empty() {
            break;
        }
        if report.passes == 0 {
            report.isolated = isolated.len();
        }
        report.passes += 1;

        let mut identifiers = index.identifiers();
        let mut inserted = false;
        for node in isolated {
            let prefix = closest_ancestor(node, &identifiers);
            let (id, created) = index.insert_virtual(&prefix);
            if created {
                debug!(
                    "Connected isolated package {:?} through virtual node {:?} (id {})",
                    identifiers[node], prefix, id
                );
                identifiers.push(prefix.clone());
                report.virtual_nodes.push(prefix);
                inserted = true;
            }
        }

        matrix = adjacency.build_from_index(index);
        if !inserted {
            // Only reachable for an index holding nothing but the global package
            break;
        }
    }

    let roots = component_roots(&matrix, &index.identifiers());
    if roots.len() > 1 {
        let prefix = common_prefix_of_all(roots.iter().map(String::as_str));
        let (id, created) = index.insert_virtual(&prefix);
        debug!(
            "Joined {} package clusters under virtual node {:?} (id {})",
            roots.len(),
            prefix,
            id
        );
        report.components_merged = roots.len();
        if created {
            report.virtual_nodes.push(prefix);
        }
        matrix = adjacency.build_from_index(index);
    }

    if !report.is_noop() {
        info!(
            "Connectivity repair inserted {} virtual node(s) ({} isolated, {} clusters)",
            report.virtual_nodes.len(),
            report.isolated,
            report.components_merged
        );
    }

    (matrix, report)
}

/// Longest common prefix between `node` and any other identifier.
fn closest_ancestor(node: NodeId, identifiers: &[String]) -> String {
    let own = identifiers[node].as_str();
    identifiers
        .iter()
        .enumerate()
        .filter(|(id, _)| *id != node)
        .map(|(_, other)| common_prefix(own, other))
        .max_by_key(|prefix| prefix.len())
        .unwrap_or("")
        .to_string()
}

/// Shallowest member of each connected component, in component order.
fn component_roots(matrix: &DistanceMatrix, identifiers: &[String]) -> Vec<String> {
    let n = matrix.size();
    let mut components = UnionFind::<usize>::new(n);
    for i in 0..n {
        for (j, _) in matrix.links(i).filter(|&(j, _)| j > i) {
            components.union(i, j);
        }
    }

    let mut roots: BTreeMap<usize, NodeId> = BTreeMap::new();
    for node in 0..n {
        let label = components.find(node);
        roots
            .entry(label)
            .and_modify(|root| {
                if segment_count(&identifiers[node]) < segment_count(&identifiers[*root]) {
                    *root = node;
                }
            })
            .or_insert(node);
    }

    roots
        .into_values()
        .map(|root| identifiers[root].clone())
        .collect()
}
