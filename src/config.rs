//! Workspace configuration loaded from `.mdjanitor.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::ports::filesystem::FileSystem;

/// File name looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = ".mdjanitor.yaml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV_VAR: &str = "MDJANITOR_CONFIG";

/// Settings that shape how a workspace is janitored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JanitorConfig {
    /// Keep `.md` on generated reference targets.
    pub include_extensions: bool,
    /// Insert a `# Title` into notes without one.
    pub headings: bool,
    /// Directory or file names skipped while walking the workspace.
    pub ignore: Vec<String>,
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            include_extensions: false,
            headings: true,
            ignore: vec![".git".to_string(), "node_modules".to_string()],
        }
    }
}

impl JanitorConfig {
    /// Parses a YAML document. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the YAML is invalid or has unknown keys.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))
    }

    /// Loads the configuration for the workspace at `root`.
    ///
    /// Honors [`CONFIG_ENV_VAR`]; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, root: &Path) -> Result<Self> {
        let path = config_path(root, std::env::var(CONFIG_ENV_VAR).ok().as_deref());
        Self::load_from(fs, &path)
    }

    /// Loads the configuration stored at `path`, or the defaults if there is
    /// no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        if !fs.exists(path) {
            debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        let yaml = fs.read_to_string(path).map_err(|e| Error::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&yaml).map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Returns `true` if an entry with this name is skipped.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.iter().any(|ignored| ignored == name)
    }
}

/// Resolves the configuration file path, preferring an explicit override.
#[must_use]
pub fn config_path(root: &Path, override_path: Option<&str>) -> PathBuf {
    match override_path {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => root.join(CONFIG_FILE_NAME),
    }
}
