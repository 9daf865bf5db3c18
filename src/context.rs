//! Run context resolution.
//!
//! Turns parsed CLI arguments into everything a command needs: the project
//! layout, the host identity, and the merged config. Both `setup` and
//! `deploy` resolve through here so they compute identical paths.

use crate::cli::ProjectArgs;
use crate::config::Config;
use crate::error::{AutoserverError, Result};
use crate::layout::ProjectLayout;
use crate::process::effective_user_name;
use crate::symbols::HostIdentity;
use std::env;
use std::path::Path;

/// Resolved inputs for one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub args: ProjectArgs,
    pub layout: ProjectLayout,
    pub host: HostIdentity,
    pub config: Config,
}

impl RunContext {
    /// Resolve from the current working directory.
    pub fn resolve(args: ProjectArgs) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            AutoserverError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(args, &cwd)
    }

    /// Resolve with `cwd` standing in for the current directory.
    pub fn resolve_from(args: ProjectArgs, cwd: &Path) -> Result<Self> {
        let target_dir = args.target_dir.clone().unwrap_or_else(|| cwd.to_path_buf());
        let config = Config::discover(args.config.as_deref(), &target_dir)?;
        let layout = ProjectLayout::new(&target_dir, &args.proj, &args.django_proj)?;

        let user = match args.user.clone().or_else(|| config.user.clone()) {
            Some(user) => user,
            None => invoking_user()?,
        };

        let host = HostIdentity {
            user,
            hostname: HostIdentity::local_hostname(),
            ip: args.ip.clone(),
            domain: args.domain.clone(),
        };

        tracing::debug!(
            proj_dir = %layout.proj_dir.display(),
            user = %host.user,
            "resolved run context"
        );

        Ok(Self {
            args,
            layout,
            host,
            config,
        })
    }
}

/// Environment variables consulted for the login name, in order.
const USER_ENV_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Login name of the invoking user: the first non-empty of
/// [`USER_ENV_VARS`], else the passwd entry of the effective uid.
fn invoking_user() -> Result<String> {
    if let Some(user) = USER_ENV_VARS
        .iter()
        .find_map(|var| env::var(var).ok().filter(|v| !v.is_empty()))
    {
        return Ok(user);
    }

    effective_user_name().map_err(|e| {
        AutoserverError::UserError(format!(
            "cannot determine the invoking user ({}); pass --user or set user in autoserver.yaml",
            e
        ))
    })
}
