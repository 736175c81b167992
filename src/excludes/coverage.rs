use std::collections::BTreeSet;

use super::types::{Coverage, ExclusionRule, FileSet};

/// Map every rule to the exact subset of `files` it excludes.
///
/// A file may be covered by several rules when matching directories nest.
pub fn compute_coverage<'a, I>(rules: I, files: &FileSet) -> Coverage
where
    I: IntoIterator<Item = &'a ExclusionRule>,
{
    rules
        .into_iter()
        .map(|rule| {
            let covered: BTreeSet<String> = files
                .iter()
                .filter(|file| rule.covers(file))
                .cloned()
                .collect();
            (rule.clone(), covered)
        })
        .collect()
}

/// Union of all files covered by any rule in `coverage`
pub fn covered_files(coverage: &Coverage) -> BTreeSet<&str> {
    coverage
        .values()
        .flat_map(|files| files.iter().map(String::as_str))
        .collect()
}
