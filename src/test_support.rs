use crate::cli::ProjectArgs;
use crate::config::Config;
use crate::context::RunContext;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

/// Switches the process working directory for the guard's lifetime.
pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // The working directory is process-global; hold the lock even under #[serial].
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// Templates shipped with the crate.
pub(crate) fn bundled_templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

/// Arguments for project `shop` / `shopsite` owned by `deploy` under
/// `target_dir`, with every optional step off.
pub(crate) fn project_args(target_dir: &Path) -> ProjectArgs {
    ProjectArgs {
        target_dir: Some(target_dir.to_path_buf()),
        proj: "shop".to_string(),
        django_proj: "shopsite".to_string(),
        ip: None,
        domain: None,
        user: Some("deploy".to_string()),
        skip_nginx: false,
        skip_uwsgi: false,
        skip_venv: true,
        skip_git: false,
        production: false,
        overwrite: false,
        force_reinit_git: false,
        templates_dir: Some(bundled_templates_dir()),
        config: None,
    }
}

/// Production arguments with ip and domain set, so every artifact is generated.
pub(crate) fn production_args(target_dir: &Path) -> ProjectArgs {
    ProjectArgs {
        ip: Some("10.0.0.5".to_string()),
        domain: Some("shop.example.com".to_string()),
        production: true,
        ..project_args(target_dir)
    }
}

/// Resolve a context, pointing deploy links at directories under `target_dir`.
pub(crate) fn context(args: ProjectArgs, target_dir: &Path) -> RunContext {
    let mut ctx = RunContext::resolve_from(args, target_dir).unwrap();
    ctx.config = Config {
        nginx_sites_enabled: target_dir.join("sites-enabled"),
        systemd_dir: target_dir.join("systemd"),
        ..ctx.config
    };
    ctx
}
