//! Resolve command - Navigation steps between two packages

use anyhow::Result;
use clap::Args;
use docpath_config::DocpathConfig;
use docpath_core::Step;
use serde::Serialize;

use super::build_tree;
use crate::GlobalOptions;

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Package the navigation starts from
    source: String,

    /// Package the navigation leads to
    target: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Resolved path as printed with `--json`
#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    source: &'a str,
    target: &'a str,
    /// Signed segment distance, `null` when the packages are unrelated
    distance: Option<i32>,
    steps: &'a [Step],
}

/// Execute the resolve command
pub fn execute(args: ResolveArgs, global: &GlobalOptions, config: &DocpathConfig) -> Result<()> {
    let tree = build_tree(global, config)?;
    let steps = tree.resolve(&args.source, &args.target)?;

    if args.json {
        let output = ResolveOutput {
            source: &args.source,
            target: &args.target,
            distance: tree.distance(&args.source, &args.target)?.finite(),
            steps: &steps,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if steps.is_empty() {
        println!("(same package)");
    }
    for step in &steps {
        println!("{}", format_step(step));
    }

    Ok(())
}

/// One-line rendering of a step.
fn format_step(step: &Step) -> String {
    match step {
        Step::Ascend { levels } => format!("ascend  {}", levels),
        Step::Descend { package, segments } => {
            format!("descend {} ({})", package, segments.join("/"))
        }
    }
}
