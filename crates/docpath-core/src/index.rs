//! Package identifier index
//!
//! Assigns a dense node id to every distinct package identifier and keeps the
//! reverse mapping (id → node record) in an append-only arena.
//!
//! The index is the only structure written concurrently: identifiers may be
//! discovered by several producers at once (one per compilation unit, say).
//! Insertion goes through `DashMap`'s entry API so that the first writer of an
//! identifier wins and an id is issued exactly once, while lookups of settled
//! entries proceed in parallel on other shards.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{RwLock, RwLockReadGuard};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Dense node id issued by the index, in `[0, len)`.
pub type NodeId = usize;

/// Where a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeOrigin {
    /// Supplied by an identifier producer
    Discovered,
    /// Synthesized as a common ancestor during connectivity repair
    Virtual,
}

/// A node record in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageNode {
    /// Dotted package identifier (empty for the global package)
    pub identifier: String,
    /// Whether the package was discovered or synthesized
    pub origin: NodeOrigin,
}

impl PackageNode {
    /// Whether this node was synthesized by connectivity repair.
    pub fn is_virtual(&self) -> bool {
        self.origin == NodeOrigin::Virtual
    }
}

/// Concurrent, append-only package index.
///
/// Invariant: `nodes()[id(p)].identifier == p` for every indexed `p`.
#[derive(Debug, Default)]
pub struct PackageIndex {
    /// Identifier → node id
    ids: DashMap<String, NodeId>,
    /// Node id → node record
    nodes: RwLock<Vec<PackageNode>>,
}

impl PackageIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from a sequence of identifiers (duplicates allowed).
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = Self::new();
        for identifier in identifiers {
            index.insert(identifier.as_ref());
        }
        index
    }

    /// Index a discovered identifier, returning its id.
    ///
    /// Returns the existing id if the identifier is already indexed.
    pub fn insert(&self, identifier: &str) -> NodeId {
        self.insert_with_origin(identifier, NodeOrigin::Discovered).0
    }

    /// Index a synthesized common-ancestor identifier.
    ///
    /// Returns the id and whether a new node was created. An identifier that
    /// is already indexed keeps its original origin.
    pub fn insert_virtual(&self, identifier: &str) -> (NodeId, bool) {
        self.insert_with_origin(identifier, NodeOrigin::Virtual)
    }

    fn insert_with_origin(&self, identifier: &str, origin: NodeOrigin) -> (NodeId, bool) {
        if let Some(id) = self.ids.get(identifier).map(|entry| *entry) {
            return (id, false);
        }

        match self.ids.entry(identifier.to_string()) {
            Entry::Occupied(entry) => (*entry.get(), false),
            Entry::Vacant(entry) => {
                // The id is issued under the arena lock while the shard entry is
                // held, so concurrent inserts of one identifier serialize here.
                let mut nodes = self.nodes.write();
                let id = nodes.len();
                nodes.push(PackageNode {
                    identifier: identifier.to_string(),
                    origin,
                });
                entry.insert(id);
                (id, true)
            }
        }
    }

    /// Index identifiers coming from several independent producers.
    ///
    /// Producers run in parallel, each inserting its identifiers in order.
    pub fn index_sources<P, S>(&self, producers: &[P])
    where
        P: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        producers.par_iter().for_each(|producer| {
            for identifier in producer.as_ref() {
                self.insert(identifier.as_ref());
            }
        });
    }

    /// Look up the id of an identifier.
    pub fn id(&self, identifier: &str) -> Option<NodeId> {
        self.ids.get(identifier).map(|entry| *entry)
    }

    /// Check whether an identifier is indexed.
    pub fn contains(&self, identifier: &str) -> bool {
        self.ids.contains_key(identifier)
    }

    /// Look up the identifier for a node id.
    ///
    /// Returns an owned String since the arena sits behind a lock.
    pub fn identifier(&self, id: NodeId) -> Option<String> {
        self.nodes.read().get(id).map(|node| node.identifier.clone())
    }

    /// Read access to the node arena, in id order.
    ///
    /// Do not insert while holding the guard.
    pub fn nodes(&self) -> RwLockReadGuard<'_, Vec<PackageNode>> {
        self.nodes.read()
    }

    /// Snapshot of all identifiers, in id order.
    pub fn identifiers(&self) -> Vec<String> {
        self.nodes
            .read()
            .iter()
            .map(|node| node.identifier.clone())
            .collect()
    }

    /// Number of indexed identifiers.
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the index, returning the node arena.
    pub fn into_nodes(self) -> Vec<PackageNode> {
        self.nodes.into_inner()
    }
}
