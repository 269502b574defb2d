use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Configuration file structure that mirrors CLI arguments
/// All fields are optional to allow partial configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Address to bind the HTTP server to
    pub bind: Option<String>,

    /// Port to listen on
    pub port: Option<u16>,

    /// SQLite database URL for analysis history
    pub database_url: Option<String>,

    /// PageSpeed API endpoint base (overridable for self-hosted mirrors)
    pub pagespeed_endpoint: Option<String>,

    /// PageSpeed API key
    pub pagespeed_api_key: Option<String>,

    /// Page fetch timeout in seconds
    pub fetch_timeout: Option<u64>,

    /// Performance audit timeout in seconds
    pub audit_timeout: Option<u64>,

    /// Verbose logging
    pub verbose: Option<bool>,

    /// Bearer token to owner id table; tokens live only in config files,
    /// never on the command line
    pub auth_tokens: Option<HashMap<String, String>>,
}

/// Configuration file format based on file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                "toml" => Some(ConfigFormat::Toml),
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                _ => None,
            })
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Toml => &["toml"],
            ConfigFormat::Yaml => &["yaml", "yml"],
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };

        Ok(config)
    }

    /// Get the default configuration file paths to check (in order of priority)
    /// Returns paths in order: current directory, user config directory
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Check current directory first (highest priority)
        for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
            for ext in format.extensions() {
                paths.push(PathBuf::from(format!("sitegrade.{}", ext)));
            }
        }

        // Check user config directory (~/.config/sitegrade)
        // Use XDG_CONFIG_HOME if set, otherwise fall back to ~/.config
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .and_then(|p| {
                if p.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(p))
                }
            })
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(config_home) = config_home {
            let sitegrade_config_dir = config_home.join("sitegrade");
            for format in &[ConfigFormat::Json, ConfigFormat::Toml, ConfigFormat::Yaml] {
                for ext in format.extensions() {
                    paths.push(sitegrade_config_dir.join(format!("config.{}", ext)));
                }
            }
        }

        paths
    }

    /// Try to load configuration from default paths
    /// Returns the first configuration file found, or None if no config exists
    pub fn from_default_paths() -> Result<Option<Self>> {
        for path in Self::default_paths() {
            if path.exists() {
                return Ok(Some(Self::from_file(&path)?));
            }
        }
        Ok(None)
    }

    /// Merge this configuration with CLI arguments
    /// CLI arguments take precedence over config file values
    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            bind: if cli.bind != "127.0.0.1" {
                cli.bind.clone()
            } else {
                self.bind.clone().unwrap_or_else(|| cli.bind.clone())
            },
            port: if cli.port != 8080 {
                cli.port
            } else {
                self.port.unwrap_or(cli.port)
            },
            database_url: if cli.database_url != "sqlite:sitegrade.db" {
                cli.database_url.clone()
            } else {
                self.database_url
                    .clone()
                    .unwrap_or_else(|| cli.database_url.clone())
            },
            pagespeed_endpoint: cli
                .pagespeed_endpoint
                .clone()
                .or_else(|| self.pagespeed_endpoint.clone()),
            pagespeed_api_key: cli
                .pagespeed_api_key
                .clone()
                .or_else(|| self.pagespeed_api_key.clone()),
            fetch_timeout: if cli.fetch_timeout != 10 {
                cli.fetch_timeout
            } else {
                self.fetch_timeout.unwrap_or(cli.fetch_timeout)
            },
            audit_timeout: if cli.audit_timeout != 30 {
                cli.audit_timeout
            } else {
                self.audit_timeout.unwrap_or(cli.audit_timeout)
            },
            verbose: if cli.verbose {
                cli.verbose
            } else {
                self.verbose.unwrap_or(cli.verbose)
            },
            config: cli.config.clone(),
        }
    }
}
