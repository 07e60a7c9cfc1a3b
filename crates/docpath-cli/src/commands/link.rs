//! Link command - Relative href from one package page to another
//!
//! Without `--page` the link points at the target package's index page.
//! A target package that is not part of the tree, or only joins it as a
//! virtual node, has no pages to link to; its name is printed as plain text
//! instead, or reported as an error with `--strict`.

use anyhow::{bail, Result};
use clap::Args;
use docpath_config::DocpathConfig;

use super::{build_tree, link_style, print_warning};
use crate::GlobalOptions;

/// Arguments for the link command
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Package of the page containing the link
    source: String,

    /// Package being linked to
    target: String,

    /// Page name within the target package (e.g. a type name)
    #[arg(long)]
    page: Option<String>,

    /// Fail instead of falling back to plain text for undocumented targets
    #[arg(long)]
    strict: bool,
}

/// Execute the link command
pub fn execute(args: LinkArgs, global: &GlobalOptions, config: &DocpathConfig) -> Result<()> {
    let tree = build_tree(global, config)?;
    let style = link_style(&config.links);

    if !tree.is_documented(&args.target) {
        if args.strict && tree.contains(&args.target) {
            bail!("Package '{}' has no pages of its own", args.target);
        }
        if args.strict {
            bail!("Unknown package '{}'", args.target);
        }
        if !global.quiet {
            print_warning(&format!(
                "package '{}' is not documented, emitting plain text",
                args.target
            ));
        }
        println!("{}", plain_text(&args.target, args.page.as_deref()));
        return Ok(());
    }

    let href = match args.page {
        Some(ref page) => style.href(&tree, &args.source, &args.target, page)?,
        None => style.package_href(&tree, &args.source, &args.target)?,
    };
    println!("{}", href);

    Ok(())
}

/// Qualified name used when a target cannot be linked.
fn plain_text(target: &str, page: Option<&str>) -> String {
    match page {
        Some(page) if target.is_empty() => page.to_string(),
        Some(page) => format!("{}.{}", target, page),
        None => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("java.lang", Some("String")), "java.lang.String");
        assert_eq!(plain_text("java.lang", None), "java.lang");
        assert_eq!(plain_text("", Some("Main")), "Main");
    }
}
