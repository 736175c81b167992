//! Serialized form of a list of path excludes
//!
//! The document nests rules as `excludes.paths`, the layout repository
//! configuration files use for path excludes. The same shape is written as
//! output and read back when existing excludes are supplied.

use anyhow::{Context, Result, bail};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::types::{ExclusionRule, FileSet};

/// Structured serialization formats for an excludes document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yml") | Some("yaml") => Ok(DocumentFormat::Yaml),
            Some("toml") => Ok(DocumentFormat::Toml),
            _ => bail!(
                "Cannot determine excludes format of {}: expected .json, .yml, .yaml or .toml",
                path.display()
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludesDocument {
    #[serde(default)]
    pub excludes: PathExcludes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathExcludes {
    #[serde(default)]
    pub paths: Vec<ExclusionRule>,
}

impl ExcludesDocument {
    pub fn new(rules: Vec<ExclusionRule>) -> Self {
        Self {
            excludes: PathExcludes { paths: rules },
        }
    }

    pub fn rules(&self) -> &[ExclusionRule] {
        &self.excludes.paths
    }

    /// Render the document in the given format
    pub fn render(&self, format: DocumentFormat) -> Result<String> {
        let rendered = match format {
            DocumentFormat::Json => serde_json::to_string_pretty(self)?,
            DocumentFormat::Yaml => serde_yml::to_string(self)?,
            DocumentFormat::Toml => toml::to_string(self)?,
        };
        Ok(rendered)
    }

    /// Parse a document from text in the given format
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self> {
        let document = match format {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => serde_yml::from_str(content)?,
            DocumentFormat::Toml => toml::from_str(content)?,
        };
        Ok(document)
    }

    /// Load a document from disk, picking the format from the extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = DocumentFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read excludes file {}", path.display()))?;

        Self::parse(&content, format)
            .with_context(|| format!("Failed to parse excludes file {}", path.display()))
    }

    /// Compile the document's patterns into a glob matcher
    pub fn matcher(&self) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for rule in self.rules() {
            let glob = GlobBuilder::new(&rule.pattern)
                .literal_separator(true)
                .build()
                .with_context(|| format!("Invalid exclude pattern: {}", rule.pattern))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Drop the files that are already excluded by this document
    pub fn retain_unexcluded(&self, files: FileSet) -> Result<FileSet> {
        if self.rules().is_empty() {
            return Ok(files);
        }

        let matcher = self.matcher()?;
        let before = files.len();
        let remaining: FileSet = files
            .into_iter()
            .filter(|file| !matcher.is_match(file))
            .collect();

        tracing::debug!(
            "Existing excludes already cover {} of {} files",
            before - remaining.len(),
            before
        );

        Ok(remaining)
    }
}
