use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::{extract::DEFAULT_LOOKAHEAD, scanner::ScanOptions};

pub const CONFIG_FILE_NAME: &str = ".keyscanrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_lookahead")]
    pub lookahead: usize,
}

fn default_source_root() -> String {
    "./src".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["cc".to_string()]
}

fn default_lookahead() -> usize {
    DEFAULT_LOOKAHEAD
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            lookahead: default_lookahead(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores`, an empty
    /// `extensions` list or a zero `lookahead`.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        if self.extensions.is_empty() {
            bail!("'extensions' must list at least one file extension");
        }

        if self.lookahead == 0 {
            bail!("'lookahead' must be greater than 0");
        }

        Ok(())
    }

    /// Scan settings derived from this configuration.
    pub fn scan_options(&self, verbose: bool) -> ScanOptions {
        ScanOptions {
            extensions: self
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect(),
            ignores: self.ignores.clone(),
            lookahead: self.lookahead,
            verbose,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the config file, or None when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.path.is_some()
    }

    /// Resolve the configured source root.
    ///
    /// Relative roots are taken from the config file's directory, or
    /// `start_dir` when defaults are used. A root under `start_dir` is kept
    /// relative so reported paths stay short.
    pub fn source_root(&self, start_dir: &Path) -> PathBuf {
        let root = Path::new(&self.config.source_root);
        if root.is_absolute() {
            return root.to_path_buf();
        }

        match self.path.as_deref().and_then(Path::parent) {
            Some(config_dir) if config_dir != start_dir => config_dir.join(root),
            _ => root.to_path_buf(),
        }
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
