//! Package Tree Builder
//!
//! Drives the resolver pipeline: producers feed identifiers into a shared
//! index, then the distance matrix is built, repaired and turned into the
//! alpha-rooted tree that answers path queries.
//!
//! ## Usage
//!
//! ```
//! use docpath_core::{PackageTreeBuilder, Step};
//!
//! let builder = PackageTreeBuilder::new();
//! builder.add_sources(&[
//!     vec!["com.acme.core".to_string()],
//!     vec!["com.acme.web".to_string(), "com.acme".to_string()],
//! ]);
//! let tree = builder.build().unwrap();
//!
//! let steps = tree.resolve("com.acme.core", "com.acme.web").unwrap();
//! assert_eq!(steps[0], Step::Ascend { levels: 1 });
//! ```

use std::time::Instant;

use tracing::{info, warn};

use crate::adjacency::AdjacencyBuilder;
use crate::error::Result;
use crate::index::PackageIndex;
use crate::repair::repair;
use crate::resolver::PackageTree;
use crate::tree::build_tree;

/// Configuration for the package tree builder.
#[derive(Debug, Clone, Default)]
pub struct BuilderConfig {
    /// Worker threads used to index producers (None = rayon default)
    pub parallelism: Option<usize>,
}

/// Collects package identifiers and builds the package tree.
///
/// Identifier intake takes `&self` and may be called from several threads;
/// `build` consumes the builder once the identifier set is closed.
#[derive(Debug, Default)]
pub struct PackageTreeBuilder {
    config: BuilderConfig,
    index: PackageIndex,
}

impl PackageTreeBuilder {
    /// Create a builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            index: PackageIndex::new(),
        }
    }

    /// Add a single package identifier.
    pub fn add(&self, identifier: &str) {
        self.index.insert(identifier);
    }

    /// Add identifiers from one producer.
    pub fn add_all<I, S>(&self, identifiers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for identifier in identifiers {
            self.index.insert(identifier.as_ref());
        }
    }

    /// Add identifiers from several producers in parallel.
    pub fn add_sources<P, S>(&self, producers: &[P])
    where
        P: AsRef<[S]> + Sync,
        S: AsRef<str> + Sync,
    {
        let index = &self.index;
        match self.config.parallelism {
            Some(threads) if threads > 0 => {
                match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                    Ok(pool) => pool.install(|| index.index_sources(producers)),
                    Err(e) => {
                        warn!("Failed to create indexing thread pool: {}", e);
                        index.index_sources(producers);
                    }
                }
            }
            _ => index.index_sources(producers),
        }
    }

    /// The shared identifier index.
    pub fn index(&self) -> &PackageIndex {
        &self.index
    }

    /// Close the identifier set and build the package tree.
    pub fn build(self) -> Result<PackageTree> {
        let start = Instant::now();
        let discovered = self.index.len();
        info!("Building package tree from {} package(s)", discovered);

        let mut adjacency = AdjacencyBuilder::new();
        let (matrix, report) = repair(&self.index, &mut adjacency);
        let nodes = self.index.into_nodes();
        let tree = build_tree(&nodes, &matrix)?;

        info!(
            "Built package tree: {} package(s), {} virtual node(s), {} distance evaluation(s) in {:?}",
            discovered,
            report.virtual_nodes.len(),
            adjacency.evaluations(),
            start.elapsed()
        );

        Ok(PackageTree::new(tree, report))
    }
}
