//! Project layout resolution.
//!
//! Every path a run touches is derived here from the target directory and
//! the two project names, so the setup and deploy commands agree on where
//! artifacts live. All paths are absolute when `target_dir` is.

use crate::error::{AutoserverError, Result};
use std::path::{Path, PathBuf};

/// Name of the shared static files directory inside the project.
pub const STATIC_DIR_NAME: &str = "global_static";

/// Name of the backups directory inside the project.
pub const BACKUPS_DIR_NAME: &str = "backups";

/// Name of the generated configuration directory inside the project.
pub const CONF_DIR_NAME: &str = "conf";

/// Name of the bare deployment repository inside the project.
pub const REPO_DIR_NAME: &str = "repo.git";

/// Resolved paths for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub proj: String,
    pub django_proj: String,

    /// Directory the project directory is created in.
    pub target_dir: PathBuf,
    /// `{target_dir}/{proj}`, also the working tree of the deployment hook.
    pub proj_dir: PathBuf,
    pub django_proj_dir: PathBuf,
    pub static_dir: PathBuf,
    pub backups_dir: PathBuf,
    pub conf_dir: PathBuf,

    pub repo_dir: PathBuf,
    pub git_hook: PathBuf,
    /// Virtualenv location: `{proj_dir}/env{proj}`.
    pub env_dir: PathBuf,

    pub nginx_conf: PathBuf,
    pub nginx_https: PathBuf,
    pub nginx_redirects: PathBuf,
    pub uwsgi_emperor: PathBuf,
    pub uwsgi_ini: PathBuf,
}

impl ProjectLayout {
    /// Compute the layout for `proj` under `target_dir`.
    ///
    /// Both names must be a single plain path component; anything else would
    /// let generated files escape the project directory.
    pub fn new<P: AsRef<Path>>(target_dir: P, proj: &str, django_proj: &str) -> Result<Self> {
        validate_component("--proj", proj)?;
        validate_component("--django-proj", django_proj)?;

        let target_dir = target_dir.as_ref().to_path_buf();
        let proj_dir = target_dir.join(proj);
        let conf_dir = proj_dir.join(CONF_DIR_NAME);
        let repo_dir = proj_dir.join(REPO_DIR_NAME);

        Ok(Self {
            proj: proj.to_string(),
            django_proj: django_proj.to_string(),
            django_proj_dir: proj_dir.join(django_proj),
            static_dir: proj_dir.join(STATIC_DIR_NAME),
            backups_dir: proj_dir.join(BACKUPS_DIR_NAME),
            git_hook: repo_dir.join("hooks").join("post-receive"),
            env_dir: proj_dir.join(format!("env{}", proj)),
            nginx_conf: conf_dir.join(format!("nginx_{}.conf", proj)),
            nginx_https: conf_dir.join(format!("nginx_{}_https.conf", proj)),
            nginx_redirects: conf_dir.join(format!("nginx_{}_redirects.conf", proj)),
            uwsgi_emperor: conf_dir.join(format!("uwsgi.emperor.{}.service", proj)),
            uwsgi_ini: conf_dir.join(format!("uwsgi_{}.ini", proj)),
            target_dir,
            proj_dir,
            conf_dir,
            repo_dir,
        })
    }

    /// Directory holding the bare repository's hooks.
    pub fn hooks_dir(&self) -> PathBuf {
        self.repo_dir.join("hooks")
    }
}

fn validate_component(flag: &str, value: &str) -> Result<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\');

    if invalid {
        return Err(AutoserverError::UserError(format!(
            "{} must be a plain directory name, got '{}'",
            flag, value
        )));
    }

    Ok(())
}
