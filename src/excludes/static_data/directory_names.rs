//! Static directory names that mark non-production code
//!
//! The table maps a directory basename to the reason its subtree is excluded.
//! Lookups are exact and case-sensitive.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

use crate::excludes::types::ExcludeReason;

lazy_static! {
    /// Directory basename to exclude reason, built once for the program lifetime
    pub static ref DIRECTORY_NAME_TABLE: Arc<HashMap<&'static str, ExcludeReason>> = Arc::new(
        [
            // Tests and benchmarks
            ("bench", ExcludeReason::TestOf),
            ("benchmark", ExcludeReason::TestOf),
            ("benchmarks", ExcludeReason::TestOf),
            ("test", ExcludeReason::TestOf),
            ("tests", ExcludeReason::TestOf),
            // Build tooling
            ("build", ExcludeReason::BuildToolOf),
            ("m4", ExcludeReason::BuildToolOf),
            ("tools", ExcludeReason::BuildToolOf),
            // Documentation
            ("docs", ExcludeReason::DocumentationOf),
        ]
        .into_iter()
        .collect()
    );
}

/// Look up the exclude reason for a directory basename
pub fn reason_for_directory_name(name: &str) -> Option<ExcludeReason> {
    DIRECTORY_NAME_TABLE.get(name).copied()
}
