use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Mirrors the engine's default ancestor search bound for selection mapping.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 8;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file mapping section keys to raw section text.
    pub content_path: PathBuf,
    /// Where confirmed annotations are saved; defaults next to the content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations_path: Option<PathBuf>,
    /// Start each session with no annotations even if some were saved.
    #[serde(default)]
    pub clear_on_load: bool,
    #[serde(default = "default_max_ancestor_depth")]
    pub max_ancestor_depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_max_ancestor_depth() -> usize {
    DEFAULT_MAX_ANCESTOR_DEPTH
}

impl Config {
    pub fn new(content_path: PathBuf) -> Self {
        Self {
            content_path,
            annotations_path: None,
            clear_on_load: false,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            log_file: None,
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in every configured path
        config.content_path =
            Self::expand_path(&config.content_path).unwrap_or(config.content_path);
        config.annotations_path = config
            .annotations_path
            .map(|p| Self::expand_path(&p).unwrap_or(p));
        config.log_file = config.log_file.map(|p| Self::expand_path(&p).unwrap_or(p));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/ramseyer");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The configured annotations file, or `<content stem>.annotations.json`
    /// beside the content file.
    pub fn resolved_annotations_path(&self) -> PathBuf {
        if let Some(path) = &self.annotations_path {
            return path.clone();
        }
        let stem = self
            .content_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sections".to_string());
        self.content_path
            .with_file_name(format!("{stem}.annotations.json"))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
