use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::document::HeaderTemplate;
use crate::errors::ConfigError;
use crate::language_utils::{resolve_language, Language};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language tag used when a document does not carry one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Header template used when a document does not carry one
    #[serde(default)]
    pub default_header_template: HeaderTemplate,

    /// Directory rendered files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Document file settings
    #[serde(default)]
    pub docx: DocxConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Document file (docx) settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DocxConfig {
    // @field: Font applied to every run
    #[serde(default = "default_font_family")]
    pub font_family: String,

    // @field: Body size in half-points
    #[serde(default = "default_base_size_half_points")]
    pub base_size_half_points: u32,

    // @field: Title size in half-points
    #[serde(default = "default_title_size_half_points")]
    pub title_size_half_points: u32,

    // @field: Page margin on every side, in twips
    #[serde(default = "default_page_margin_twips")]
    pub page_margin_twips: u32,

    // @field: File name stem used when the subject is empty
    #[serde(default = "default_fallback_file_stem")]
    pub fallback_file_stem: String,
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self {
            font_family: default_font_family(),
            base_size_half_points: default_base_size_half_points(),
            title_size_half_points: default_title_size_half_points(),
            page_margin_twips: default_page_margin_twips(),
            fallback_file_stem: default_fallback_file_stem(),
        }
    }
}

/// Which renderer outputs to produce
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Layout tree as JSON
    Screen,
    /// Printable HTML page
    Html,
    /// Word-processor document
    Docx,
    #[default]
    All,
}

impl OutputFormat {
    pub fn includes_screen(self) -> bool {
        matches!(self, Self::Screen | Self::All)
    }

    pub fn includes_html(self) -> bool {
        matches!(self, Self::Html | Self::All)
    }

    pub fn includes_docx(self) -> bool {
        matches!(self, Self::Docx | Self::All)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Screen => "screen",
            Self::Html => "html",
            Self::Docx => "docx",
            Self::All => "all",
        };
        write!(f, "{}", name)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

// Word caps font sizes at 1638 points
const MAX_SIZE_HALF_POINTS: u32 = 3276;

// Half of the A4 width, in twips
const MAX_PAGE_MARGIN_TWIPS: u32 = 5953;

fn default_language() -> String {
    "EN".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_font_family() -> String {
    "Times New Roman".to_string()
}

fn default_base_size_half_points() -> u32 {
    24
}

fn default_title_size_half_points() -> u32 {
    40
}

fn default_page_margin_twips() -> u32 {
    1140
}

fn default_fallback_file_stem() -> String {
    "Exam_Paper".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if resolve_language(&self.default_language).is_none() {
            return Err(ConfigError::UnsupportedLanguage(self.default_language.clone()));
        }

        let docx = &self.docx;
        for (name, size) in [
            ("base_size_half_points", docx.base_size_half_points),
            ("title_size_half_points", docx.title_size_half_points),
        ] {
            if size == 0 || size > MAX_SIZE_HALF_POINTS {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be between 1 and {}, got {}",
                    name, MAX_SIZE_HALF_POINTS, size
                )));
            }
        }

        if docx.page_margin_twips >= MAX_PAGE_MARGIN_TWIPS {
            return Err(ConfigError::InvalidValue(format!(
                "page_margin_twips must be below {}, got {}",
                MAX_PAGE_MARGIN_TWIPS, docx.page_margin_twips
            )));
        }

        if docx.font_family.trim().is_empty() {
            return Err(ConfigError::InvalidValue("font_family must not be empty".to_string()));
        }

        if docx.fallback_file_stem.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "fallback_file_stem must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Language used for documents without a language tag
    pub fn language(&self) -> Language {
        Language::from_tag_or_default(&self.default_language)
    }

    /// Load a configuration file, creating it with defaults when missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save(path)?;
            log::info!("Created default configuration at {}", path.display());
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_language: default_language(),
            default_header_template: HeaderTemplate::default(),
            output_dir: default_output_dir(),
            docx: DocxConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
