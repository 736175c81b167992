use std::collections::BTreeSet;

use super::static_data::reason_for_directory_name;
use super::types::{ExclusionRule, FileSet};

/// Parent directory of a relative path, `None` for root-level entries
pub fn parent_dir(path: &str) -> Option<&str> {
    path.rfind('/').map(|idx| &path[..idx]).filter(|dir| !dir.is_empty())
}

/// Last segment of a relative path
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Collect every distinct directory that is an ancestor of at least one file
pub fn ancestor_directories(files: &FileSet) -> BTreeSet<&str> {
    let mut directories = BTreeSet::new();

    for file in files {
        let mut current = parent_dir(file);
        while let Some(dir) = current {
            // Ancestors above an already seen directory were recorded with it
            if !directories.insert(dir) {
                break;
            }
            current = parent_dir(dir);
        }
    }

    directories
}

/// Propose an exclusion rule for every ancestor directory whose basename is a
/// known non-production directory name
pub fn generate_candidates(files: &FileSet) -> BTreeSet<ExclusionRule> {
    let directories = ancestor_directories(files);

    let candidates: BTreeSet<ExclusionRule> = directories
        .into_iter()
        .filter_map(|dir| {
            reason_for_directory_name(basename(dir))
                .map(|reason| ExclusionRule::for_directory(dir, reason))
        })
        .collect();

    tracing::debug!(
        "Generated {} candidate excludes from {} files",
        candidates.len(),
        files.len()
    );

    candidates
}
