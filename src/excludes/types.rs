use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Suffix turning a directory path into a "directory and everything beneath it" pattern
pub const RECURSIVE_SUFFIX: &str = "/**";

/// Relative file paths (`/` separated) that make up a source tree
pub type FileSet = BTreeSet<String>;

/// Files each candidate rule would exclude
pub type Coverage = BTreeMap<ExclusionRule, BTreeSet<String>>;

/// Why a directory is considered outside the reviewable code.
///
/// The names read as "this path is the build tool / documentation / test OF
/// the surrounding project".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExcludeReason {
    BuildToolOf,
    DocumentationOf,
    TestOf,
}

impl ExcludeReason {
    /// Serialized name of the reason
    pub fn as_str(&self) -> &'static str {
        match self {
            ExcludeReason::BuildToolOf => "BUILD_TOOL_OF",
            ExcludeReason::DocumentationOf => "DOCUMENTATION_OF",
            ExcludeReason::TestOf => "TEST_OF",
        }
    }
}

impl fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path exclude: a directory subtree marked as outside review scope.
///
/// Ordering is by pattern first, then reason, which is also the canonical
/// output order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub pattern: String,
    pub reason: ExcludeReason,
}

impl ExclusionRule {
    /// Build a rule covering `directory` and all of its descendants
    pub fn for_directory(directory: &str, reason: ExcludeReason) -> Self {
        Self {
            pattern: format!("{directory}{RECURSIVE_SUFFIX}"),
            reason,
        }
    }

    /// The directory this rule is rooted at
    pub fn directory(&self) -> &str {
        self.pattern
            .strip_suffix(RECURSIVE_SUFFIX)
            .unwrap_or(&self.pattern)
    }

    /// Whether `file` lies beneath this rule's directory, at any depth
    pub fn covers(&self, file: &str) -> bool {
        file.strip_prefix(self.directory())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.pattern, self.reason)
    }
}

/// Outcome of a full exclude analysis, with counts for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExcludeAnalysis {
    pub files_analyzed: usize,
    pub candidates: usize,
    pub files_covered: usize,
    pub rules: Vec<ExclusionRule>,
}
