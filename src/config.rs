use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use validator::{Validate, ValidationError};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub generation: GenerationConfig,
    pub analysis: AnalysisConfig,
    pub display: DisplayConfig,
}

/// Per-request generation settings. Host and port are substituted verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Validate)]
#[serde(default)]
pub struct GenerationConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(custom = "validate_port")]
    pub port: String,
    pub format: ArchiveFormat,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "5000".to_string(),
            format: ArchiveFormat::Zip,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Zip => f.write_str("zip"),
            ArchiveFormat::TarGz => f.write_str("tar-gz"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Larger files are classified by extension only.
    pub max_file_bytes: u64,
    /// Glob patterns, relative to the project root.
    pub exclude: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024,
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_output: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color_output: true }
    }
}

fn validate_port(port: &str) -> Result<(), ValidationError> {
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(ValidationError::new("port must be a number between 1 and 65535")),
    }
}

impl Config {
    pub fn create_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.generation.validate()?;
        Ok(config)
    }

    /// Explicit path must exist; the default location falls back to defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match get_config_path() {
            Ok(path) if path.exists() => Self::load(&path),
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using defaults");
                Ok(Self::default())
            }
        }
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "dockerizer", "dockerizer")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
