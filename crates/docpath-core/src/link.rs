//! Relative hyperlink rendering
//!
//! Pages live in a directory tree mirroring the package hierarchy (`a.b.c`
//! under `a/b/c/`). A link from a page of one package to a page of another is
//! the resolved step sequence rendered as directory tokens, followed by the
//! target page name.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::resolver::{PackageTree, Step};

/// Tokens used to turn steps into a relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkStyle {
    /// Token emitted per directory level climbed
    pub up_directory: String,
    /// Appended after every descended segment
    pub separator: String,
    /// Extension appended to page names
    pub extension: String,
    /// File name of a package's own index page
    pub package_index: String,
}

impl Default for LinkStyle {
    fn default() -> Self {
        Self {
            up_directory: "../".to_string(),
            separator: "/".to_string(),
            extension: ".md".to_string(),
            package_index: "README.md".to_string(),
        }
    }
}

impl LinkStyle {
    /// Render a step sequence as a relative directory path.
    ///
    /// An empty sequence renders as the empty string (same directory).
    pub fn render(&self, steps: &[Step]) -> String {
        let mut path = String::new();
        for step in steps {
            match step {
                Step::Ascend { levels } => {
                    for _ in 0..*levels {
                        path.push_str(&self.up_directory);
                    }
                }
                Step::Descend { segments, .. } => {
                    for segment in segments {
                        path.push_str(segment);
                        path.push_str(&self.separator);
                    }
                }
            }
        }
        path
    }

    /// Relative directory path from one package to another.
    pub fn relative_path(&self, tree: &PackageTree, source: &str, target: &str) -> Result<String> {
        tree.resolve(source, target).map(|steps| self.render(&steps))
    }

    /// Link from a page in `source` to page `page` of package `target`.
    pub fn href(
        &self,
        tree: &PackageTree,
        source: &str,
        target: &str,
        page: &str,
    ) -> Result<String> {
        let mut href = self.relative_path(tree, source, target)?;
        href.push_str(page);
        href.push_str(&self.extension);
        Ok(href)
    }

    /// Link from a page in `source` to the index page of package `target`.
    pub fn package_href(&self, tree: &PackageTree, source: &str, target: &str) -> Result<String> {
        let mut href = self.relative_path(tree, source, target)?;
        href.push_str(&self.package_index);
        Ok(href)
    }
}
