//! Tree command implementation.
//!
//! Prints every path of an archive in sorted order, directories marked with
//! a trailing slash.

use anyhow::{Context, Result};
use serde::Serialize;
use statical_vfs::StaticFs;
use std::path::Path;

use super::common::load_tree;
use crate::formatters::format_output;
use crate::types::{ExitCode, OutputFormat};

/// Every path of an archive plus totals.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TreeReport {
    /// Sorted paths; directories other than the root end with `/`
    pub paths: Vec<String>,
    /// Number of regular files
    pub files: usize,
    /// Number of directories, root included
    pub dirs: usize,
}

/// Collects every path of `tree`.
#[must_use]
pub fn collect(tree: &StaticFs) -> TreeReport {
    let paths = tree
        .all_paths()
        .into_iter()
        .map(|path| match tree.entry(path.as_str()) {
            Some(entry) if entry.is_dir() && !path.is_root() => format!("{path}/"),
            _ => path.to_string(),
        })
        .collect();

    TreeReport {
        paths,
        files: tree.file_count(),
        dirs: tree.dir_count(),
    }
}

/// Runs the tree command.
pub fn run(archive: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let tree = load_tree(archive)?;
    let report = collect(&tree);

    let formatted = match output_format {
        OutputFormat::Text => report.paths.join("\n"),
        _ => format_output(&report, output_format).context("failed to format tree")?,
    };
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect() {
        let tree = StaticFs::builder()
            .add_file("/public/css/app.css", "body{}")
            .add_file("/public/hello.txt", "hi")
            .add_file("/index.html", "<h1/>")
            .build()
            .unwrap();

        let report = collect(&tree);
        assert_eq!(
            report.paths,
            [
                "/",
                "/index.html",
                "/public/",
                "/public/css/",
                "/public/css/app.css",
                "/public/hello.txt",
            ]
        );
        assert_eq!(report.files, 3);
        assert_eq!(report.dirs, 3);
    }

    #[test]
    fn test_collect_empty_tree() {
        let tree = StaticFs::builder().build().unwrap();
        let report = collect(&tree);
        assert_eq!(report.paths, ["/"]);
        assert_eq!(report.files, 0);
        assert_eq!(report.dirs, 1);
    }
}
