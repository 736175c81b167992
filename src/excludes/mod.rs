//! Path exclude generation
//!
//! Given the relative file paths of a source tree, this module infers which
//! subdirectories hold build tooling, tests, benchmarks or documentation and
//! emits a small set of `<dir>/**` rules covering them.
//!
//! ```text
//! file paths ──▶ classifier ──▶ candidate rules ──▶ coverage ──▶ cover ──▶ rules
//!                (directory      (one per matching   (files per   (greedy
//!                 name table)     ancestor dir)       rule)        set cover)
//! ```
//!
//! Every stage is a pure function over in-memory sets.

pub mod classifier;
pub mod cover;
pub mod coverage;
pub mod document;
pub mod static_data;
pub mod types;

pub use classifier::generate_candidates;
pub use cover::select_cover;
pub use coverage::compute_coverage;
pub use document::ExcludesDocument;
pub use types::{Coverage, ExcludeAnalysis, ExcludeReason, ExclusionRule, FileSet};

/// Run the full pipeline and report counts alongside the selected rules
pub fn analyze(files: &FileSet) -> ExcludeAnalysis {
    let candidates = generate_candidates(files);
    let coverage = compute_coverage(&candidates, files);
    let files_covered = coverage::covered_files(&coverage).len();
    let selected = select_cover(&coverage);

    ExcludeAnalysis {
        files_analyzed: files.len(),
        candidates: candidates.len(),
        files_covered,
        rules: selected.into_iter().collect(),
    }
}

/// Suggest path excludes for `files`, sorted by pattern
pub fn find_path_excludes(files: &FileSet) -> Vec<ExclusionRule> {
    analyze(files).rules
}
