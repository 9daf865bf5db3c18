//! CLI argument parsing for autoserver.
//!
//! Uses clap derive macros for declarative argument definitions.
//! Implementations live in the `commands` module.

use crate::validators::{parse_existing_dir, parse_hostname, parse_ip};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Autoserver: scaffold a single-host web project.
///
/// Generates nginx and uWSGI emperor configuration from templates, a bare
/// git repository with a post-receive deployment hook, and a Python
/// virtualenv. Existing files are never replaced unless `--overwrite` is given.
#[derive(Parser, Debug)]
#[command(name = "autoserver")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for autoserver.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the project skeleton and generate configuration.
    ///
    /// Without `--production` only the virtualenv is bootstrapped.
    Setup(ProjectArgs),

    /// Link generated configuration into nginx and systemd.
    ///
    /// Requires root; re-executes itself through sudo when needed.
    Deploy(ProjectArgs),
}

/// Project arguments shared by `setup` and `deploy`.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Directory the project lives in (default: current directory).
    #[arg(short, long, value_parser = parse_existing_dir)]
    pub target_dir: Option<PathBuf>,

    /// Global project name.
    #[arg(short, long)]
    pub proj: String,

    /// Django project name.
    #[arg(short = 'j', long)]
    pub django_proj: String,

    /// Server IP address.
    #[arg(short, long, value_parser = parse_ip)]
    pub ip: Option<String>,

    /// Domain name.
    #[arg(short, long, value_parser = parse_hostname)]
    pub domain: Option<String>,

    /// Non-root user that has access to the project (default: invoking user).
    #[arg(short, long)]
    pub user: Option<String>,

    /// Do not generate or link nginx configuration.
    #[arg(long)]
    pub skip_nginx: bool,

    /// Do not generate or link uWSGI configuration.
    #[arg(long)]
    pub skip_uwsgi: bool,

    /// Do not create a virtualenv.
    #[arg(long)]
    pub skip_venv: bool,

    /// Do not create the bare git repository.
    #[arg(long)]
    pub skip_git: bool,

    /// Generate server configuration (otherwise only the virtualenv is set up).
    #[arg(long)]
    pub production: bool,

    /// Replace existing generated files and links.
    #[arg(short = 'w', long)]
    pub overwrite: bool,

    /// Re-run `git init --bare` on an existing repository.
    #[arg(long)]
    pub force_reinit_git: bool,

    /// Directory containing the artifact templates.
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// Config file (default: <target-dir>/autoserver.yaml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
