use crate::error::{Error, Result};
use crate::output::Grammar;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration, loadable from `codemap.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub diagrams: DiagramConfig,
}

/// Snapshot loading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Path substrings to exclude while loading a snapshot
    pub exclude: Vec<String>,
}

/// Diagram rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    pub grammar: Grammar,
    pub max_elements: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "__pycache__".to_string(),
                "target".to_string(),
                "venv".to_string(),
                ".venv".to_string(),
            ],
        }
    }
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            grammar: Grammar::default(),
            max_elements: 100,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        grammar: Option<&str>,
        max_elements: Option<usize>,
        exclude: Vec<String>,
    ) -> Result<()> {
        if let Some(name) = grammar {
            self.diagrams.grammar = name.parse()?;
        }
        if let Some(max) = max_elements {
            self.diagrams.max_elements = max;
        }
        if !exclude.is_empty() {
            self.analysis.exclude.extend(exclude);
        }
        self.validate()
    }

    /// Validate configuration; fails fast before any rendering occurs
    pub fn validate(&self) -> Result<()> {
        if self.diagrams.max_elements == 0 {
            return Err(Error::config_validation("max_elements must be at least 1"));
        }
        Ok(())
    }
}
