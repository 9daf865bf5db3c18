//! Config struct definition and default implementation.

use serde::Deserialize;
use std::path::PathBuf;

/// File name looked up in the target directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "autoserver.yaml";

/// Host-level settings for autoserver.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the artifact templates. Defaults to `templates/`
    /// next to the executable.
    pub templates_dir: Option<PathBuf>,

    /// Default for `--user`.
    pub user: Option<String>,

    /// Interpreter passed to `virtualenv -p`.
    pub python: String,

    /// virtualenv executable.
    pub virtualenv: String,

    // =========================================================================
    // Deploy link targets
    // =========================================================================
    /// Directory nginx reads enabled sites from.
    pub nginx_sites_enabled: PathBuf,

    /// Directory systemd reads unit files from.
    pub systemd_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            templates_dir: None,
            user: None,
            python: "python3".to_string(),
            virtualenv: "virtualenv".to_string(),
            nginx_sites_enabled: PathBuf::from("/etc/nginx/sites-enabled"),
            systemd_dir: PathBuf::from("/etc/systemd/system"),
        }
    }
}
