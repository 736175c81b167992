use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use crate::config::ReviewscopeConfig;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format: json, toml, yaml
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
    /// Check that the merged configuration is valid
    Validate,
}

pub fn execute(args: ConfigArgs, custom_config: Option<&str>) -> Result<()> {
    let config = ReviewscopeConfig::load_with_custom_config(custom_config)?;

    match args.command {
        ConfigCommand::Show { format } => {
            // Round-trip through the typed settings so defaults are filled in
            let settings = config.settings()?;
            let rendered = match format.to_lowercase().as_str() {
                "json" => serde_json::to_string_pretty(&settings)?,
                "yaml" | "yml" => serde_yml::to_string(&settings)?,
                "toml" => toml::to_string(&settings)?,
                _ => bail!("Unsupported format: {}. Use json, toml, or yaml", format),
            };
            println!("{}", rendered.trim_end());
        }
        ConfigCommand::Validate => {
            config.settings()?;
            println!("Configuration is valid");
        }
    }

    Ok(())
}
