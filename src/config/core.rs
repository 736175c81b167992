use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::files::SourceConfig;
use crate::report::OutputFormat;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Typed view of the merged configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

pub struct ReviewscopeConfig {
    figment: Figment,
}

impl ReviewscopeConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG)); // Embedded defaults

        // A custom config replaces the user and repository layers
        if let Some(custom_path) = custom_config {
            if !std::path::Path::new(custom_path).is_file() {
                anyhow::bail!("Config file not found: {custom_path}");
            }
            tracing::debug!("Using custom config {}", custom_path);
            figment = match custom_path.rsplit('.').next() {
                Some("json") => figment.merge(Json::file(custom_path)),
                Some("yml") | Some("yaml") => figment.merge(Yaml::file(custom_path)),
                _ => figment.merge(Toml::file(custom_path)),
            };
        } else {
            let user_base = Self::user_config_base_path();
            figment = figment
                // User config - support multiple formats
                .merge(Toml::file(format!("{user_base}.toml")))
                .merge(Json::file(format!("{user_base}.json")))
                .merge(Yaml::file(format!("{user_base}.yaml")))
                .merge(Yaml::file(format!("{user_base}.yml")))
                // Repository config - support multiple formats
                .merge(Toml::file("reviewscope.toml"))
                .merge(Json::file("reviewscope.json"))
                .merge(Yaml::file("reviewscope.yaml"))
                .merge(Yaml::file("reviewscope.yml"));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("REVIEWSCOPE_").split("__"));

        Ok(ReviewscopeConfig { figment })
    }

    /// Extract the typed settings
    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .context("Invalid reviewscope configuration")
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/reviewscope/config"),
            Err(_) => "~/.config/reviewscope/config".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::SourceMode;
    use figment::Jail;

    /// Point HOME at the jail so a real user config is never merged
    fn isolate_home(jail: &mut Jail) {
        let home = jail.directory().display().to_string();
        jail.set_env("HOME", home);
    }

    #[test]
    fn test_config_loading() {
        Jail::expect_with(|jail| {
            isolate_home(jail);
            let config = ReviewscopeConfig::load();
            assert!(config.is_ok(), "Should load default config successfully");
            Ok(())
        });
    }

    #[test]
    fn test_config_loads_defaults() {
        Jail::expect_with(|jail| {
            isolate_home(jail);
            let settings = ReviewscopeConfig::load()
                .and_then(|c| c.settings())
                .map_err(|e| e.to_string())?;

            assert_eq!(settings.source.mode, SourceMode::Auto);
            assert!(!settings.source.include_hidden);
            assert!(settings.source.ignore_paths.is_empty());
            assert_eq!(settings.output.format, OutputFormat::Text);
            Ok(())
        });
    }

    #[test]
    fn test_repository_config_and_env_override() {
        Jail::expect_with(|jail| {
            isolate_home(jail);
            jail.create_file(
                "reviewscope.toml",
                r#"
                [source]
                mode = "walk"
                ignore_paths = ["vendor/"]

                [output]
                format = "yaml"
                "#,
            )?;
            jail.set_env("REVIEWSCOPE_OUTPUT__FORMAT", "json");

            let settings = ReviewscopeConfig::load()
                .and_then(|c| c.settings())
                .map_err(|e| e.to_string())?;

            assert_eq!(settings.source.mode, SourceMode::Walk);
            assert_eq!(settings.source.ignore_paths, vec!["vendor/".to_string()]);
            assert_eq!(settings.output.format, OutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_custom_config_replaces_repository_config() {
        Jail::expect_with(|jail| {
            isolate_home(jail);
            jail.create_file("reviewscope.toml", "[source]\nmode = \"walk\"\n")?;
            jail.create_file("custom.yml", "source:\n  include_hidden: true\n")?;

            let settings = ReviewscopeConfig::load_with_custom_config(Some("custom.yml"))
                .and_then(|c| c.settings())
                .map_err(|e| e.to_string())?;

            assert_eq!(settings.source.mode, SourceMode::Auto);
            assert!(settings.source.include_hidden);
            Ok(())
        });
    }

    #[test]
    fn test_missing_custom_config_is_an_error() {
        Jail::expect_with(|jail| {
            isolate_home(jail);
            assert!(ReviewscopeConfig::load_with_custom_config(Some("non_existent.toml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_user_config_is_overridden_by_repository_config() {
        Jail::expect_with(|jail| {
            isolate_home(jail);
            std::fs::create_dir_all(jail.directory().join(".config/reviewscope"))
                .map_err(|e| e.to_string())?;
            jail.create_file(
                ".config/reviewscope/config.toml",
                "[source]\ninclude_hidden = true\n\n[output]\nformat = \"yaml\"\n",
            )?;
            jail.create_file("reviewscope.json", r#"{"output": {"format": "toml"}}"#)?;

            let settings = ReviewscopeConfig::load()
                .and_then(|c| c.settings())
                .map_err(|e| e.to_string())?;

            assert!(settings.source.include_hidden);
            assert_eq!(settings.output.format, OutputFormat::Toml);
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_reported() {
        Jail::expect_with(|jail| {
            isolate_home(jail);
            jail.set_env("REVIEWSCOPE_SOURCE__MODE", "ftp");
            let config = ReviewscopeConfig::load().map_err(|e| e.to_string())?;
            assert!(config.settings().is_err());
            Ok(())
        });
    }
}
