//! # reviewscope - path exclude suggestions for license review
//!
//! Given the relative file paths of a source tree, reviewscope finds
//! directories that hold build tooling, tests, benchmarks or documentation
//! and suggests a minimal set of `<dir>/**` path excludes covering them, so
//! that license and compliance review can focus on the shipped code.
//!
//! ```
//! use reviewscope::excludes::{find_path_excludes, ExcludeReason, FileSet};
//!
//! let files: FileSet = ["src/Main.kt", "test/FooTest.kt", "test/BarTest.kt"]
//!     .iter()
//!     .map(|p| p.to_string())
//!     .collect();
//!
//! let rules = find_path_excludes(&files);
//! assert_eq!(rules.len(), 1);
//! assert_eq!(rules[0].pattern, "test/**");
//! assert_eq!(rules[0].reason, ExcludeReason::TestOf);
//! ```

pub mod cli;
pub mod config;
pub mod excludes;
pub mod files;
pub mod report;

pub use cli::{Cli, Output};
pub use config::ReviewscopeConfig;
pub use excludes::{ExclusionRule, ExcludeReason, find_path_excludes};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
