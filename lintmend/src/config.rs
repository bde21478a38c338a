use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    CONFIG_FILENAME, DEFAULT_MODULE_ROOT, DEFAULT_OUTPUT_SUFFIX, DEFAULT_SOURCE_EXTENSION,
    PYPROJECT_FILENAME,
};

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for lintmend.
    pub lintmend: LintmendConfig,
    /// The path to the configuration file this was loaded from.
    /// `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for lintmend.
pub struct LintmendConfig {
    /// Suffix inserted before the extension of the default output file.
    pub output_suffix: Option<String>,
    /// Extension of Python source files, without the dot.
    pub source_extension: Option<String>,
    /// Directory that wildcard-imported modules are resolved against.
    pub module_root: Option<PathBuf>,
    /// Require an identifier boundary on both sides of a rewritten usage.
    pub strict_boundaries: Option<bool>,
}

impl LintmendConfig {
    /// Output suffix, falling back to `_new`.
    #[must_use]
    pub fn output_suffix(&self) -> &str {
        self.output_suffix.as_deref().unwrap_or(DEFAULT_OUTPUT_SUFFIX)
    }

    /// Source extension, falling back to `py`.
    #[must_use]
    pub fn source_extension(&self) -> &str {
        self.source_extension
            .as_deref()
            .map_or(DEFAULT_SOURCE_EXTENSION, |ext| ext.trim_start_matches('.'))
    }

    /// Module root, falling back to the working directory.
    #[must_use]
    pub fn module_root(&self) -> PathBuf {
        self.module_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULE_ROOT))
    }
}

#[derive(Debug, Deserialize, Clone)]
struct PyProject {
    tool: ToolConfig,
}

#[derive(Debug, Deserialize, Clone)]
struct ToolConfig {
    lintmend: LintmendConfig,
}

impl Config {
    /// Module root, with a relative configured root taken relative to the
    /// configuration file that set it.
    #[must_use]
    pub fn module_root(&self) -> PathBuf {
        let root = self.lintmend.module_root();
        match (&self.lintmend.module_root, &self.config_file_path) {
            (Some(_), Some(file)) if root.is_relative() => file
                .parent()
                .map_or_else(|| root.clone(), |dir| dir.join(&root)),
            _ => root,
        }
    }

    /// Loads configuration from default locations (.lintmend.toml or pyproject.toml in current dir).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let lintmend_toml = current.join(CONFIG_FILENAME);
            if lintmend_toml.exists() {
                if let Ok(content) = fs::read_to_string(&lintmend_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        debug!(path = %lintmend_toml.display(), "loaded configuration");
                        config.config_file_path = Some(lintmend_toml);
                        return config;
                    }
                }
            }

            // 2. Try PYPROJECT_FILENAME
            let pyproject_toml = current.join(PYPROJECT_FILENAME);
            if pyproject_toml.exists() {
                if let Ok(content) = fs::read_to_string(&pyproject_toml) {
                    if let Ok(pyproject) = toml::from_str::<PyProject>(&content) {
                        debug!(path = %pyproject_toml.display(), "loaded configuration");
                        return Config {
                            lintmend: pyproject.tool.lintmend,
                            config_file_path: Some(pyproject_toml),
                        };
                    }
                }
            }

            // An empty relative path cannot be popped further but is not the root yet.
            if current.as_os_str().is_empty() || !current.pop() {
                break;
            }
        }

        Config::default()
    }
}
