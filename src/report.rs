//! Rendering of exclude analysis results

use anyhow::Result;
use console::style;
use serde::{Deserialize, Serialize};

use crate::excludes::document::DocumentFormat;
use crate::excludes::{ExcludeAnalysis, ExcludeReason, ExcludesDocument};

/// Output format for suggested excludes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human readable list
    #[default]
    Text,
    /// `excludes.paths` document as JSON
    Json,
    /// `excludes.paths` document as YAML
    Yaml,
    /// `excludes.paths` document as TOML
    Toml,
}

impl OutputFormat {
    fn document_format(self) -> Option<DocumentFormat> {
        match self {
            OutputFormat::Text => None,
            OutputFormat::Json => Some(DocumentFormat::Json),
            OutputFormat::Yaml => Some(DocumentFormat::Yaml),
            OutputFormat::Toml => Some(DocumentFormat::Toml),
        }
    }
}

/// Render the selected rules of `analysis` in `format`
pub fn render(analysis: &ExcludeAnalysis, format: OutputFormat) -> Result<String> {
    match format.document_format() {
        Some(document_format) => {
            ExcludesDocument::new(analysis.rules.clone()).render(document_format)
        }
        None => Ok(render_text(analysis)),
    }
}

fn render_text(analysis: &ExcludeAnalysis) -> String {
    if analysis.rules.is_empty() {
        return format!("{} No path excludes suggested", style("ℹ").blue());
    }

    analysis
        .rules
        .iter()
        .map(|rule| {
            let reason = match rule.reason {
                ExcludeReason::BuildToolOf => style(rule.reason.as_str()).yellow(),
                ExcludeReason::DocumentationOf => style(rule.reason.as_str()).cyan(),
                ExcludeReason::TestOf => style(rule.reason.as_str()).magenta(),
            };
            format!("{} {} {}", style(&rule.pattern).bold(), style("→").dim(), reason)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary of the analysis counts
pub fn summary(analysis: &ExcludeAnalysis) -> String {
    format!(
        "{} excludes cover {} of {} files ({} candidates)",
        analysis.rules.len(),
        analysis.files_covered,
        analysis.files_analyzed,
        analysis.candidates
    )
}
