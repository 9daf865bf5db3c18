//! The fixed catalogue of generated artifacts.
//!
//! Each artifact pairs a template in the templates directory with a
//! destination from the project layout. Parameterized templates are
//! rendered through the symbol table; static ones are copied verbatim.

use crate::error::Result;
use crate::layout::ProjectLayout;
use crate::materialize;
use crate::policy::WriteDecision;
use crate::symbols::SymbolTable;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which service an artifact configures. Operators skip whole kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Nginx,
    Uwsgi,
    Git,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArtifactKind::Nginx => "nginx",
            ArtifactKind::Uwsgi => "uwsgi",
            ArtifactKind::Git => "git",
        };
        f.pad(s)
    }
}

/// Template file names, relative to the templates directory.
pub mod template_names {
    pub const NGINX_CONF: &str = "nginx_proj.conf";
    pub const NGINX_HTTPS: &str = "nginx_proj_https.conf";
    pub const NGINX_REDIRECTS: &str = "nginx_proj_redirects.conf";
    pub const UWSGI_EMPEROR: &str = "uwsgi.emperor.proj.service";
    pub const UWSGI_INI: &str = "uwsgi_proj.ini";
    pub const GIT_HOOK: &str = "post-receive";
}

/// One file to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub template: PathBuf,
    pub destination: PathBuf,
    pub parameterized: bool,
}

impl Artifact {
    /// Render or copy this artifact according to `parameterized`.
    pub fn materialize(&self, symbols: &SymbolTable, overwrite: bool) -> Result<WriteDecision> {
        if self.parameterized {
            materialize::render(&self.template, &self.destination, symbols, overwrite)
        } else {
            materialize::copy(&self.template, &self.destination, overwrite)
        }
    }
}

/// All artifacts of `kind`, in the order they are written.
pub fn catalogue(kind: ArtifactKind, layout: &ProjectLayout, templates_dir: &Path) -> Vec<Artifact> {
    use template_names::*;

    let entry = |template: &str, destination: &Path, parameterized: bool| Artifact {
        kind,
        template: templates_dir.join(template),
        destination: destination.to_path_buf(),
        parameterized,
    };

    match kind {
        ArtifactKind::Nginx => vec![
            entry(NGINX_CONF, &layout.nginx_conf, true),
            entry(NGINX_HTTPS, &layout.nginx_https, false),
            entry(NGINX_REDIRECTS, &layout.nginx_redirects, false),
        ],
        ArtifactKind::Uwsgi => vec![
            entry(UWSGI_EMPEROR, &layout.uwsgi_emperor, true),
            entry(UWSGI_INI, &layout.uwsgi_ini, true),
        ],
        ArtifactKind::Git => vec![entry(GIT_HOOK, &layout.git_hook, true)],
    }
}
