//! Configuration handling for the form

use crate::state::BindingStrategy;
use anyhow::Result;
use clap::Parser;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// User configuration loaded from the platform config directory
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// How inputs are wired to the form
    pub binding_strategy: Option<BindingStrategy>,
    /// Open the inspection panel on start
    pub show_inspector: Option<bool>,
    /// Clear all answers after a successful submit
    pub reset_on_submit: Option<bool>,
    /// Log level for the file log (trace, debug, info, warn, error)
    pub log_level: Option<String>,
}

impl FormConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "star-form", "star-form")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for log files
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("logs"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Config that reproduces the given settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            binding_strategy: Some(settings.binding_strategy),
            show_inspector: Some(settings.show_inspector),
            reset_on_submit: Some(settings.reset_on_submit),
            log_level: Some(settings.log_level.clone()),
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

/// Command-line flags; each one overrides the config file
#[derive(Debug, Default, Parser)]
#[command(name = "star-form", version, about = "Answer reflective questions in the terminal")]
pub struct Cli {
    /// Input binding strategy
    #[arg(long, value_enum)]
    pub binding: Option<BindingStrategy>,

    /// Open the inspection panel on start
    #[arg(long)]
    pub inspector: bool,

    /// Clear all answers after a successful submit
    #[arg(long)]
    pub reset_on_submit: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    pub save_config: bool,
}

/// Effective settings after merging config file and CLI flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub binding_strategy: BindingStrategy,
    pub show_inspector: bool,
    pub reset_on_submit: bool,
    pub log_level: String,
}

impl Settings {
    pub fn resolve(config: &FormConfig, cli: &Cli) -> Self {
        Self {
            binding_strategy: cli
                .binding
                .or(config.binding_strategy)
                .unwrap_or_default(),
            show_inspector: cli.inspector || config.show_inspector.unwrap_or(false),
            reset_on_submit: cli.reset_on_submit || config.reset_on_submit.unwrap_or(false),
            log_level: config
                .log_level
                .clone()
                .unwrap_or_else(|| "info".to_string()),
        }
    }
}
