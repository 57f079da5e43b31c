//! Quiz configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{LevelFilter, MAX_LEVEL};

/// Top-level vocabquiz configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Deck to quiz on when none is given on the command line.
    #[serde(default)]
    pub deck: Option<PathBuf>,
    /// Level filter applied when a quiz starts.
    #[serde(default)]
    pub default_level: LevelFilter,
    /// Fixed RNG seed, for reproducible question order.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Show the item's mastery level next to each question.
    #[serde(default = "default_true")]
    pub show_levels: bool,
}

fn default_true() -> bool {
    true
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            deck: None,
            default_level: None,
            seed: None,
            show_levels: true,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again, so a value containing `${...}`
/// is kept as is.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `vocabquiz.toml` in the current directory
/// 2. `~/.config/vocabquiz/config.toml`
///
/// Environment variable override: `VOCABQUIZ_DECK`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("vocabquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    if let Ok(deck) = std::env::var("VOCABQUIZ_DECK") {
        config.deck = Some(PathBuf::from(deck));
    }

    config.deck = config
        .deck
        .map(|d| PathBuf::from(resolve_env_vars(&d.to_string_lossy())));

    Ok(config)
}

/// Parse and check a config TOML string.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    let config: QuizConfig = toml::from_str(content)?;
    if let Some(level) = config.default_level {
        anyhow::ensure!(
            level <= MAX_LEVEL,
            "default_level must be between 0 and {MAX_LEVEL}, got {level}"
        );
    }
    Ok(config)
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("vocabquiz"))
}
