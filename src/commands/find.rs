use std::path::{Path, PathBuf};

use colored::*;
use glob::{MatchOptions, Pattern};
use log::debug;
use walkdir::WalkDir;

use crate::error::{VoxError, VoxResult};
use crate::terminal::Console;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundPath {
    /// Relative to the search root.
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Compile `name` as a search anywhere below the root, i.e. `**/name`.
pub fn search_pattern(name: &str) -> VoxResult<Pattern> {
    let name = name.trim_start_matches('/');
    let full = if name.starts_with("**/") || name == "**" {
        name.to_string()
    } else {
        format!("**/{}", name)
    };
    Pattern::new(&full).map_err(|e| VoxError::InvalidArguments(format!("bad pattern '{}': {}", name, e)))
}

/// Every entry under `root` (not `root` itself) whose path relative to
/// `root` matches `**/name`, sorted by path.
pub fn find_paths(root: &Path, name: &str) -> VoxResult<Vec<FoundPath>> {
    if name.trim_matches('/').is_empty() {
        return Ok(Vec::new());
    }
    let pattern = search_pattern(name)?;

    let mut found = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if pattern.matches_path_with(relative, MATCH_OPTIONS) {
            found.push(FoundPath {
                path: relative.to_path_buf(),
                is_dir: entry.file_type().is_dir(),
            });
        }
    }

    Ok(found)
}

pub fn find(console: &mut Console, name: &str) -> VoxResult<()> {
    let root = console.cwd().to_path_buf();
    let found = find_paths(&root, name)?;
    debug!("find '{}' under {}: {} match(es)", name, root.display(), found.len());

    if found.is_empty() {
        return console.line("No matching files or directories found.");
    }

    console.line("Found paths:".green())?;
    for item in found {
        let suffix = if item.is_dir { " [DIR]" } else { "" };
        console.line(format!("- {}{}", item.path.display(), suffix))?;
    }
    Ok(())
}
