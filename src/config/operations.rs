//! Config loading, validation, and templates directory resolution.

use super::model::{CONFIG_FILE_NAME, Config};
use crate::error::{AutoserverError, Result};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            AutoserverError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content).map_err(|e| {
            AutoserverError::UserError(format!("config file '{}': {}", path.display(), e))
        })
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                AutoserverError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Find the config for a run.
    ///
    /// An explicit path must exist. Otherwise `autoserver.yaml` in
    /// `target_dir` is used when present, and the defaults when not.
    pub fn discover(explicit: Option<&Path>, target_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::load(path);
        }

        let candidate = target_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            Self::load(&candidate)
        } else {
            tracing::debug!("no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate config values.
    ///
    /// - `python` and `virtualenv` must be non-empty
    /// - link directories must be absolute
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("python", &self.python), ("virtualenv", &self.virtualenv)] {
            if value.trim().is_empty() {
                return Err(AutoserverError::UserError(format!(
                    "config validation failed: {} must not be empty",
                    field
                )));
            }
        }

        for (field, dir) in [
            ("nginx_sites_enabled", &self.nginx_sites_enabled),
            ("systemd_dir", &self.systemd_dir),
        ] {
            if !dir.is_absolute() {
                return Err(AutoserverError::UserError(format!(
                    "config validation failed: {} must be an absolute path (found '{}')",
                    field,
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    /// Resolve the templates directory: `--templates-dir`, then
    /// `templates_dir` from config, then `templates/` beside the resolved
    /// executable. The directory must exist.
    pub fn resolve_templates_dir(&self, cli_override: Option<&Path>) -> Result<PathBuf> {
        let dir = match cli_override.or(self.templates_dir.as_deref()) {
            Some(dir) => dir.to_path_buf(),
            None => executable_dir()?.join("templates"),
        };

        if !dir.is_dir() {
            return Err(AutoserverError::ConfigurationError(format!(
                "templates directory '{}' does not exist (use --templates-dir or set templates_dir in {})",
                dir.display(),
                CONFIG_FILE_NAME
            )));
        }

        Ok(dir)
    }
}

/// Directory of the running executable, following symlinks so a binary
/// linked into `/usr/local/bin` still finds its templates.
fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()
        .and_then(|p| p.canonicalize())
        .map_err(|e| {
            AutoserverError::ConfigurationError(format!(
                "cannot locate the autoserver executable: {}",
                e
            ))
        })?;

    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        AutoserverError::ConfigurationError(format!(
            "executable path '{}' has no parent directory",
            exe.display()
        ))
    })
}
