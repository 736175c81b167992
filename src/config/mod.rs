//! Configuration management for reviewscope
//!
//! Layers embedded defaults, user and repository config files (TOML, JSON or
//! YAML) and `REVIEWSCOPE_` environment variables with figment. CLI flags are
//! applied on top of the extracted [`Settings`] by the commands.

pub mod core;

pub use self::core::{OutputConfig, ReviewscopeConfig, Settings};
