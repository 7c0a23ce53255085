use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::presentation::{FontSpec, PresentationState, Rgb, Theme, Wrap, FONT_SIZE_RANGE};

/// Startup configuration.
///
/// Read once from an explicit file and never written back; every field has a
/// default so a partial file is fine.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// General editor settings
    #[serde(default)]
    pub editor: EditorConfig,

    /// UI settings
    #[serde(default)]
    pub ui: UiConfig,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Editor settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EditorConfig {
    /// Spaces inserted by the Tab key
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Show line numbers
    #[serde(default = "default_show_line_numbers")]
    pub show_line_numbers: bool,

    /// Word wrap
    #[serde(default = "default_word_wrap")]
    pub word_wrap: bool,
}

/// UI settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiConfig {
    /// Theme
    #[serde(default)]
    pub theme: Theme,

    /// Font family
    #[serde(default = "default_font")]
    pub font: String,

    /// Font size
    #[serde(default = "default_font_size")]
    pub font_size: i64,

    /// Text color; the theme's when absent
    #[serde(default)]
    pub font_color: Option<Rgb>,
}

/// Logging settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `jotpad=debug`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file; logging is off without one
    #[serde(default)]
    pub file: Option<PathBuf>,
}

// Default values
fn default_tab_size() -> usize {
    4
}
fn default_show_line_numbers() -> bool {
    true
}
fn default_word_wrap() -> bool {
    true
}
fn default_font() -> String {
    "Consolas".to_string()
}
fn default_font_size() -> i64 {
    11
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            show_line_numbers: default_show_line_numbers(),
            word_wrap: default_word_wrap(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            font: default_font(),
            font_size: default_font_size(),
            font_color: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Config {
    /// Load and validate the config at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_json(&config_str)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse and validate config JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config =
            serde_json::from_str(json).map_err(|e| anyhow!("Failed to parse config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !FONT_SIZE_RANGE.contains(&self.ui.font_size) {
            return Err(anyhow!(
                "ui.font_size must be between {} and {}, got {}",
                FONT_SIZE_RANGE.start(),
                FONT_SIZE_RANGE.end(),
                self.ui.font_size
            ));
        }
        if self.ui.font.trim().is_empty() {
            return Err(anyhow!("ui.font must not be empty"));
        }
        if self.editor.tab_size == 0 {
            return Err(anyhow!("editor.tab_size must be at least 1"));
        }
        Ok(())
    }

    /// Initial presentation state for a session
    pub fn presentation(&self) -> PresentationState {
        PresentationState {
            font: FontSpec {
                family: self.ui.font.trim().to_string(),
                size: self.ui.font_size as u16,
            },
            font_color: self.ui.font_color,
            wrap: if self.editor.word_wrap {
                Wrap::Word
            } else {
                Wrap::None
            },
            theme: self.ui.theme,
            show_line_numbers: self.editor.show_line_numbers,
        }
    }
}
