//! The symbol table substituted into parameterized templates.
//!
//! Built once per run from the project layout and host identity, then only
//! read. Optional values (IP, domain) are absent keys when not supplied, so a
//! template that needs them fails loudly instead of rendering a blank.

use crate::error::{AutoserverError, Result};
use crate::layout::ProjectLayout;
use std::collections::BTreeMap;
use std::path::Path;

/// Who and where the project is being provisioned for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    /// Non-root user that owns the project.
    pub user: String,
    /// Machine hostname, used when no domain is given.
    pub hostname: String,
    pub ip: Option<String>,
    pub domain: Option<String>,
}

impl HostIdentity {
    /// Hostname of the machine running autoserver, or `localhost` if it
    /// cannot be read.
    pub fn local_hostname() -> String {
        hostname::get()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string())
    }

    /// The name a workstation should use to reach this host over ssh.
    pub fn ssh_host(&self) -> &str {
        self.domain
            .as_deref()
            .or(self.ip.as_deref())
            .unwrap_or(&self.hostname)
    }
}

/// Immutable placeholder name -> value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    values: BTreeMap<String, String>,
}

impl SymbolTable {
    /// Populate every symbol the bundled templates may reference.
    ///
    /// Rendered files are text, so every project path must be valid UTF-8;
    /// a path that is not is a `UserError` naming it.
    pub fn for_project(layout: &ProjectLayout, host: &HostIdentity) -> Result<Self> {
        let mut values = BTreeMap::new();

        let mut set = |key: &str, value: String| {
            values.insert(key.to_string(), value);
        };

        set("proj", layout.proj.clone());
        set("django_proj", layout.django_proj.clone());
        set("user", host.user.clone());
        set("hostname", host.hostname.clone());

        let paths: [(&str, &Path); 14] = [
            ("target_dir", &layout.target_dir),
            ("proj_dir", &layout.proj_dir),
            ("django_proj_dir", &layout.django_proj_dir),
            ("static_dir", &layout.static_dir),
            ("backups_dir", &layout.backups_dir),
            ("conf_dir", &layout.conf_dir),
            ("repo_dir", &layout.repo_dir),
            ("env_dir", &layout.env_dir),
            ("git_hook", &layout.git_hook),
            ("nginx_conf", &layout.nginx_conf),
            ("nginx_https", &layout.nginx_https),
            ("nginx_redirects", &layout.nginx_redirects),
            ("uwsgi_emperor", &layout.uwsgi_emperor),
            ("uwsgi_ini", &layout.uwsgi_ini),
        ];
        for (key, path) in paths {
            let text = path.to_str().ok_or_else(|| {
                AutoserverError::UserError(format!(
                    "path '{}' is not valid UTF-8 and cannot be written into a config file",
                    path.display()
                ))
            })?;
            set(key, text.to_string());
        }

        if let Some(ip) = &host.ip {
            set("ip", ip.clone());
        }
        if let Some(domain) = &host.domain {
            set("domain", domain.clone());
        }

        Ok(Self { values })
    }

    /// Build a table from arbitrary pairs.
    #[cfg(test)]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Symbols in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
