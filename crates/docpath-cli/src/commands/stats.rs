//! Stats command - Package tree statistics

use anyhow::Result;
use clap::Args;
use docpath_config::DocpathConfig;
use docpath_core::{RepairReport, TreeStats};
use serde::Serialize;

use super::build_tree;
use crate::GlobalOptions;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Statistics as printed with `--json`
#[derive(Debug, Serialize)]
struct StatsOutput<'a> {
    #[serde(flatten)]
    stats: TreeStats,
    repair: &'a RepairReport,
}

/// Execute the stats command
pub fn execute(args: StatsArgs, global: &GlobalOptions, config: &DocpathConfig) -> Result<()> {
    let tree = build_tree(global, config)?;
    let output = StatsOutput {
        stats: tree.stats(),
        repair: tree.repair_report(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render(&output));
    }

    Ok(())
}

fn render(output: &StatsOutput<'_>) -> String {
    let stats = &output.stats;
    let repair = output.repair;
    let mut out = format!(
        "Packages:       {}\nVirtual nodes:  {}\nTree nodes:     {}\nMax depth:      {}\n",
        stats.packages, stats.virtual_nodes, stats.nodes, stats.max_depth
    );
    if !repair.is_noop() {
        out.push_str(&format!(
            "Repair:         {} isolated, {} cluster(s) joined, {} pass(es)\n",
            repair.isolated, repair.components_merged, repair.passes
        ));
        for identifier in &repair.virtual_nodes {
            let label = if identifier.is_empty() {
                "(global)"
            } else {
                identifier.as_str()
            };
            out.push_str(&format!("  + {}\n", label));
        }
    }
    out
}
