//! File listing for exclude analysis
//!
//! Produces the flat set of relative, `/`-separated file paths the exclude
//! pipeline works on, either from a git index or by walking the directory.

use anyhow::{Context, Result};
use git2::Repository;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::excludes::FileSet;

/// Git index mode for submodule (gitlink) entries
const GITLINK_MODE: u32 = 0o160000;

/// Where file paths come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Git index when the root is a repository, directory walk otherwise
    #[default]
    Auto,
    /// Tracked files from the git index
    Git,
    /// Walk the directory tree, honoring ignore files
    Walk,
}

/// Settings for collecting the file set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub mode: SourceMode,
    /// Include hidden files and directories when walking
    #[serde(default)]
    pub include_hidden: bool,
    /// Follow symbolic links when walking
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Glob patterns of files left out of the analysis
    #[serde(default)]
    pub ignore_paths: Vec<String>,
}

/// Collect the relative file paths under `root`
pub fn list_files(root: &Path, config: &SourceConfig) -> Result<FileSet> {
    let files = match config.mode {
        SourceMode::Git => list_git_files(root)?,
        SourceMode::Walk => list_walked_files(root, config)?,
        SourceMode::Auto => match Repository::open(root) {
            Ok(repo) if !repo.is_bare() => {
                tracing::debug!("Reading file list from git index at {}", root.display());
                index_files(&repo)?
            }
            _ => {
                tracing::debug!("{} has no git work tree, walking files", root.display());
                list_walked_files(root, config)?
            }
        },
    };

    let files = apply_ignore_paths(files, &config.ignore_paths)?;
    tracing::info!("Collected {} files from {}", files.len(), root.display());
    Ok(files)
}

/// Tracked files from the git index of the repository at `root`
pub fn list_git_files(root: &Path) -> Result<FileSet> {
    let repo = Repository::open(root)
        .with_context(|| format!("Failed to open Git repository at {}", root.display()))?;
    index_files(&repo)
}

fn index_files(repo: &Repository) -> Result<FileSet> {
    let index = repo.index().context("Failed to read Git index")?;

    let files = index
        .iter()
        .filter(|entry| entry.mode != GITLINK_MODE)
        .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
        .collect();

    Ok(files)
}

/// Files found by walking `root`, honoring .gitignore and hidden-file settings
pub fn list_walked_files(root: &Path, config: &SourceConfig) -> Result<FileSet> {
    if !root.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let walker = WalkBuilder::new(root)
        .hidden(!config.include_hidden)
        .follow_links(config.follow_symlinks)
        .git_ignore(true)
        .git_exclude(true)
        .require_git(false)
        .build();

    let mut files = FileSet::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        if let Ok(relative) = entry.path().strip_prefix(root) {
            files.insert(to_slash_path(relative));
        }
    }

    Ok(files)
}

/// Render a relative path with `/` separators regardless of platform
fn to_slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build a matcher for the configured ignore globs
pub fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // Directory patterns like "vendor/" mean everything beneath it
        let processed = if pattern.ends_with('/') {
            format!("{pattern}**")
        } else {
            pattern.clone()
        };
        let glob = Glob::new(&processed)
            .with_context(|| format!("Invalid ignore pattern: {pattern}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}

/// Drop the files matching any of `patterns`
pub fn apply_ignore_paths(files: FileSet, patterns: &[String]) -> Result<FileSet> {
    if patterns.is_empty() {
        return Ok(files);
    }

    let matcher = build_globset(patterns)?;
    Ok(files
        .into_iter()
        .filter(|file| !matcher.is_match(file))
        .collect())
}
