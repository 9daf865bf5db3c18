//! Tests for the setup command.

use super::*;
use crate::error::AutoserverError;
use crate::policy::WriteDecision;
use crate::test_support::{bundled_templates_dir, context, production_args, project_args};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_production_setup_generates_every_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(production_args(temp_dir.path()), temp_dir.path());
    let layout = &ctx.layout;

    let report = run_setup(&ctx).unwrap();

    assert_eq!(report.entries.len(), 6);
    assert_eq!(report.count(WriteDecision::Create), 6);

    for dir in [
        &layout.django_proj_dir,
        &layout.static_dir,
        &layout.backups_dir,
        &layout.conf_dir,
    ] {
        assert!(dir.is_dir(), "{} should exist", dir.display());
    }
    for file in [
        &layout.nginx_conf,
        &layout.nginx_https,
        &layout.nginx_redirects,
        &layout.uwsgi_emperor,
        &layout.uwsgi_ini,
        &layout.git_hook,
    ] {
        assert!(file.is_file(), "{} should exist", file.display());
    }
    assert!(layout.repo_dir.join("HEAD").is_file());
}

#[test]
fn test_rendered_nginx_conf_is_fully_resolved() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(production_args(temp_dir.path()), temp_dir.path());

    run_setup(&ctx).unwrap();

    let conf = fs::read_to_string(&ctx.layout.nginx_conf).unwrap();
    assert!(conf.contains("server_name shop.example.com 10.0.0.5;"));
    assert!(conf.contains(&format!("alias {};", ctx.layout.static_dir.display())));
    assert!(conf.contains("uwsgi_param Host $host;"));
    assert!(!conf.contains("${"), "no placeholder may survive:\n{}", conf);

    let ini = fs::read_to_string(&ctx.layout.uwsgi_ini).unwrap();
    assert!(ini.contains("module = shopsite.wsgi:application"));
    assert!(ini.contains("uid = deploy"));
}

#[test]
fn test_static_snippets_are_copied_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(production_args(temp_dir.path()), temp_dir.path());

    run_setup(&ctx).unwrap();

    let templates = bundled_templates_dir();
    assert_eq!(
        fs::read(&ctx.layout.nginx_https).unwrap(),
        fs::read(templates.join("nginx_proj_https.conf")).unwrap()
    );
    assert_eq!(
        fs::read(&ctx.layout.nginx_redirects).unwrap(),
        fs::read(templates.join("nginx_proj_redirects.conf")).unwrap()
    );
}

#[cfg(unix)]
#[test]
fn test_git_hook_is_executable() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let ctx = context(production_args(temp_dir.path()), temp_dir.path());

    run_setup(&ctx).unwrap();

    let mode = fs::metadata(&ctx.layout.git_hook).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);

    let hook = fs::read_to_string(&ctx.layout.git_hook).unwrap();
    assert!(hook.starts_with("#!/bin/sh\n"));
    assert!(hook.contains(&format!("GIT_WORK_TREE={}", ctx.layout.proj_dir.display())));
    assert!(hook.contains("echo \"deployed $(git"));
}

#[test]
fn test_rerun_without_overwrite_keeps_existing_files() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(production_args(temp_dir.path()), temp_dir.path());

    run_setup(&ctx).unwrap();
    fs::write(&ctx.layout.nginx_conf, "hand edited").unwrap();
    fs::write(&ctx.layout.git_hook, "#!/bin/sh\n# custom\n").unwrap();

    let report = run_setup(&ctx).unwrap();

    assert_eq!(report.count(WriteDecision::Skip), 6);
    assert_eq!(
        fs::read_to_string(&ctx.layout.nginx_conf).unwrap(),
        "hand edited"
    );
    assert_eq!(
        fs::read_to_string(&ctx.layout.git_hook).unwrap(),
        "#!/bin/sh\n# custom\n"
    );
}

#[test]
fn test_rerun_with_overwrite_regenerates_files() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(production_args(temp_dir.path()), temp_dir.path());
    run_setup(&ctx).unwrap();
    let original = fs::read_to_string(&ctx.layout.uwsgi_ini).unwrap();
    fs::write(&ctx.layout.uwsgi_ini, "stale").unwrap();

    let mut args = production_args(temp_dir.path());
    args.overwrite = true;
    let ctx = context(args, temp_dir.path());
    let report = run_setup(&ctx).unwrap();

    assert_eq!(report.count(WriteDecision::Overwrite), 6);
    assert_eq!(
        report.decision_for(&ctx.layout.uwsgi_ini),
        Some(WriteDecision::Overwrite)
    );
    assert_eq!(fs::read_to_string(&ctx.layout.uwsgi_ini).unwrap(), original);
}

#[test]
fn test_nginx_needs_ip_and_domain() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = production_args(temp_dir.path());
    args.domain = None;
    let ctx = context(args, temp_dir.path());

    let report = run_setup(&ctx).unwrap();

    assert!(!ctx.layout.nginx_conf.exists());
    assert!(ctx.layout.uwsgi_ini.exists());
    assert_eq!(report.decision_for(&ctx.layout.nginx_conf), None);
}

#[test]
fn test_local_mode_generates_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(project_args(temp_dir.path()), temp_dir.path());

    let report = run_setup(&ctx).unwrap();

    assert!(report.entries.is_empty());
    assert!(!ctx.layout.proj_dir.exists());
}

#[test]
fn test_skipping_every_service_needs_no_templates() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = production_args(temp_dir.path());
    args.skip_nginx = true;
    args.skip_uwsgi = true;
    args.skip_git = true;
    args.templates_dir = Some(temp_dir.path().join("no-templates-here"));
    let ctx = context(args, temp_dir.path());

    let report = run_setup(&ctx).unwrap();

    assert!(report.entries.is_empty());
    assert!(ctx.layout.static_dir.is_dir());
    assert!(!ctx.layout.conf_dir.exists());
    assert!(!ctx.layout.repo_dir.exists());
}

#[test]
fn test_missing_template_aborts_with_configuration_error() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("nginx_proj.conf"), "server_name ${domain};\n").unwrap();

    let mut args = production_args(temp_dir.path());
    args.templates_dir = Some(templates);
    let ctx = context(args, temp_dir.path());

    let err = run_setup(&ctx).unwrap_err();

    assert!(matches!(err, AutoserverError::ConfigurationError(_)));
    assert!(err.to_string().contains("nginx_proj_https.conf"));
    assert_eq!(
        fs::read_to_string(&ctx.layout.nginx_conf).unwrap(),
        "server_name shop.example.com;\n"
    );
    assert!(!ctx.layout.nginx_https.exists());
}

#[test]
fn test_unresolved_placeholder_aborts_run() {
    let temp_dir = TempDir::new().unwrap();
    let templates = temp_dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(templates.join("uwsgi.emperor.proj.service"), "User=${no_such_symbol}\n").unwrap();

    let mut args = production_args(temp_dir.path());
    args.skip_nginx = true;
    args.templates_dir = Some(templates);
    let ctx = context(args, temp_dir.path());

    let err = run_setup(&ctx).unwrap_err();

    assert!(matches!(err, AutoserverError::ConfigurationError(_)));
    assert!(err.to_string().contains("no_such_symbol"));
    assert!(!ctx.layout.uwsgi_emperor.exists());
    assert!(!ctx.layout.repo_dir.exists(), "later steps must not run");
}

#[test]
fn test_existing_repo_still_gets_hook_through_policy() {
    let temp_dir = TempDir::new().unwrap();
    let mut args = production_args(temp_dir.path());
    args.skip_nginx = true;
    args.skip_uwsgi = true;
    let ctx = context(args, temp_dir.path());

    crate::git::init_bare_repo(&ctx.layout.repo_dir).unwrap();
    assert!(!ctx.layout.git_hook.exists());

    let report = run_setup(&ctx).unwrap();

    assert_eq!(
        report.decision_for(&ctx.layout.git_hook),
        Some(WriteDecision::Create)
    );
    assert!(ctx.layout.git_hook.is_file());
}

#[cfg(unix)]
fn non_utf8_target(temp_dir: &TempDir) -> std::path::PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let target = temp_dir.path().join(OsStr::from_bytes(b"srv\xFF"));
    fs::create_dir(&target).unwrap();
    target
}

#[cfg(unix)]
#[test]
fn test_non_utf8_target_is_rejected_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let target = non_utf8_target(&temp_dir);
    let ctx = context(production_args(&target), &target);

    let err = run_setup(&ctx).unwrap_err();

    assert!(matches!(err, AutoserverError::UserError(_)));
    assert!(!ctx.layout.proj_dir.exists());
    assert!(!temp_dir.path().join("srv\u{FFFD}").exists());
}

#[cfg(unix)]
mod venv {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// A stand-in `virtualenv` that records its arguments and creates the target.
    fn fake_virtualenv(dir: &Path, exit_code: i32) -> PathBuf {
        let script = dir.join("fake-virtualenv");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$@\" > \"{}\"\nmkdir -p \"$3\"\nexit {}\n",
                dir.join("virtualenv-args").display(),
                exit_code
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    fn venv_context(temp_dir: &TempDir, exit_code: i32) -> RunContext {
        let mut args = project_args(temp_dir.path());
        args.skip_venv = false;
        let mut ctx = context(args, temp_dir.path());
        ctx.config.virtualenv = fake_virtualenv(temp_dir.path(), exit_code)
            .display()
            .to_string();
        ctx
    }

    #[test]
    fn test_virtualenv_is_created_with_configured_python() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = venv_context(&temp_dir, 0);

        run_setup(&ctx).unwrap();

        assert!(ctx.layout.env_dir.is_dir());
        let recorded = fs::read_to_string(temp_dir.path().join("virtualenv-args")).unwrap();
        assert_eq!(
            recorded.trim(),
            format!("-p python3 {}", ctx.layout.env_dir.display())
        );
    }

    #[test]
    fn test_virtualenv_receives_non_utf8_path_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let target = non_utf8_target(&temp_dir);
        let mut args = project_args(&target);
        args.skip_venv = false;
        let mut ctx = context(args, &target);
        ctx.config.virtualenv = fake_virtualenv(temp_dir.path(), 0)
            .display()
            .to_string();

        run_setup(&ctx).unwrap();

        assert!(ctx.layout.env_dir.is_dir());
        assert!(!temp_dir.path().join("srv\u{FFFD}").exists());
    }

    #[test]
    fn test_existing_virtualenv_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = venv_context(&temp_dir, 0);
        fs::create_dir_all(&ctx.layout.env_dir).unwrap();

        run_setup(&ctx).unwrap();

        assert!(!temp_dir.path().join("virtualenv-args").exists());
    }

    #[test]
    fn test_failing_virtualenv_is_command_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = venv_context(&temp_dir, 1);

        let err = run_setup(&ctx).unwrap_err();

        assert!(matches!(err, AutoserverError::CommandError(_)));
    }
}
