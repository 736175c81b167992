use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::Output;
use crate::config::{ReviewscopeConfig, Settings};
use crate::excludes::{self, ExcludesDocument};
use crate::files::{self, SourceMode};
use crate::report::{self, OutputFormat};

#[derive(Args, Debug, Default)]
pub struct FindArgs {
    /// Root of the source tree to analyze
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Where to read file paths from
    #[arg(long, value_enum)]
    pub source: Option<SourceMode>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Additional paths to leave out of the analysis (glob patterns)
    #[arg(long, value_delimiter = ',')]
    pub ignore_paths: Vec<String>,

    /// Existing excludes file (.yml, .yaml, .json or .toml); files it already covers are skipped
    #[arg(long, value_name = "FILE")]
    pub existing: Option<PathBuf>,

    /// Include hidden files and directories when walking
    #[arg(long)]
    pub hidden: bool,

    /// Follow symbolic links when walking
    #[arg(long)]
    pub follow_symlinks: bool,
}

impl FindArgs {
    /// Apply command line flags on top of the configured settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(mode) = self.source {
            settings.source.mode = mode;
        }
        if let Some(format) = self.format {
            settings.output.format = format;
        }
        if self.hidden {
            settings.source.include_hidden = true;
        }
        if self.follow_symlinks {
            settings.source.follow_symlinks = true;
        }
        settings
            .source
            .ignore_paths
            .extend(self.ignore_paths.iter().cloned());
    }
}

pub fn execute(args: FindArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let mut settings = ReviewscopeConfig::load_with_custom_config(custom_config)?.settings()?;
    args.apply_to(&mut settings);

    output.verbose(&format!("Collecting files from {}", args.path.display()));
    let mut files = files::list_files(&args.path, &settings.source)?;

    if let Some(existing) = &args.existing {
        let document = ExcludesDocument::load(existing)?;
        output.info(&format!(
            "Skipping files covered by {} existing excludes from {}",
            document.rules().len(),
            existing.display()
        ));
        files = document.retain_unexcluded(files)?;
    }

    if files.is_empty() {
        output.warning("No files to analyze");
    }

    let analysis = excludes::analyze(&files);
    println!("{}", report::render(&analysis, settings.output.format)?);

    output.verbose_breakdown("files analyzed", analysis.files_analyzed);
    output.verbose_breakdown("candidate excludes", analysis.candidates);
    output.verbose_breakdown("files covered", analysis.files_covered);
    if settings.output.format == OutputFormat::Text && !analysis.rules.is_empty() {
        output.success(&report::summary(&analysis));
    }

    Ok(())
}
