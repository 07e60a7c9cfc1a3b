//! Tree command - Print the rooted package tree

use anyhow::Result;
use clap::{Args, ValueEnum};
use docpath_config::DocpathConfig;
use docpath_core::{PackageTree, TreeNodeKind};
use serde::Serialize;

use super::build_tree;
use crate::GlobalOptions;

/// Tree output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TreeFormat {
    /// Indented outline (default)
    Text,
    /// Flat JSON node list in walk order
    Json,
    /// Graphviz DOT
    Dot,
}

/// Arguments for the tree command
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Output format: text (default), json, dot
    #[arg(long, short = 'f', value_enum, default_value = "text")]
    format: TreeFormat,
}

/// One tree node in JSON output
#[derive(Debug, Serialize)]
struct TreeEntry<'a> {
    identifier: &'a str,
    kind: TreeNodeKind,
    /// Hops from the root
    level: usize,
    /// Parent identifier, `null` for the root and its children
    parent: Option<&'a str>,
}

/// Execute the tree command
pub fn execute(args: TreeArgs, global: &GlobalOptions, config: &DocpathConfig) -> Result<()> {
    let tree = build_tree(global, config)?;

    match args.format {
        TreeFormat::Text => print!("{}", render_outline(&tree)),
        TreeFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries(&tree))?);
        }
        TreeFormat::Dot => println!("{}", tree.tree().to_dot()),
    }

    Ok(())
}

/// Indented outline, two spaces per level.
fn render_outline(tree: &PackageTree) -> String {
    let mut out = String::new();
    for (node, level) in tree.iter() {
        out.push_str(&"  ".repeat(level));
        out.push_str(&node.to_string());
        out.push('\n');
    }
    out
}

fn entries(tree: &PackageTree) -> Vec<TreeEntry<'_>> {
    let inner = tree.tree();
    inner
        .walk()
        .into_iter()
        .filter_map(|(id, level)| {
            let node = inner.node(id)?;
            Some(TreeEntry {
                identifier: &node.identifier,
                kind: node.kind,
                level,
                parent: inner
                    .parent(id)
                    .filter(|&parent| parent != inner.alpha())
                    .and_then(|parent| inner.identifier(parent)),
            })
        })
        .collect()
}
