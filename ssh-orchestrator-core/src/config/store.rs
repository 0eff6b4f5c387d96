//! On-disk config store
//!
//! Lives in `~/.ssh-ogm` with two files: `config` (servers) and
//! `proxies.conf` (proxies). Files are created with a commented syntax
//! header on first use; the header is re-prepended if a file lost it.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::parser::{parse_proxies, parse_servers};
use crate::error::{CoreError, CoreResult};
use crate::types::{ProxyEntry, ServerEntry};

const DIR_NAME: &str = ".ssh-ogm";
const CONFIG_NAME: &str = "config";
const PROXIES_NAME: &str = "proxies.conf";

const SERVER_HEADER: &str = "\
# SSH Orchestrator Server Configuration
# Syntax: Alias { host: ... user: ... }
# Example:
# myserver {
#    host: 1.2.3.4
#    user: root
#    port: 22
#    proxy: myproxy # Optional
# }

";

const PROXY_HEADER: &str = "\
# SSH Orchestrator Proxy Configuration
# Syntax: Alias { host: ... port: ... type: ... }
# Types: socks5, http
# Example:
# myproxy {
#    host: proxy.example.com
#    port: 1080
#    type: socks5
#    user: user # Optional
#    password: pass # Optional
# }

";

/// Handle to the config directory
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store under `~/.ssh-ogm`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir().ok_or(CoreError::HomeDirectory)?;
        Ok(Self {
            dir: home.join(DIR_NAME),
        })
    }

    /// Store under an explicit directory.
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_NAME)
    }

    #[must_use]
    pub fn proxies_path(&self) -> PathBuf {
        self.dir.join(PROXIES_NAME)
    }

    /// Create the directory and both files when missing.
    ///
    /// Returns `true` when the server config had to be created, i.e. this is
    /// the first run on this machine.
    pub fn initialize(&self) -> CoreResult<bool> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)?;
            restrict_permissions(&self.dir, 0o700)?;
        }

        let first_run = ensure_file(&self.config_path(), SERVER_HEADER)?;
        ensure_file(&self.proxies_path(), PROXY_HEADER)?;

        debug!(
            "[CONFIG] Store ready at {} (first_run={first_run})",
            self.dir.display()
        );
        Ok(first_run)
    }

    pub fn load_servers(&self) -> CoreResult<Vec<ServerEntry>> {
        let content = fs::read_to_string(self.config_path())?;
        Ok(parse_servers(&content)?)
    }

    pub fn load_proxies(&self) -> CoreResult<Vec<ProxyEntry>> {
        let content = fs::read_to_string(self.proxies_path())?;
        Ok(parse_proxies(&content)?)
    }

    /// Append a server block skeleton for the user to edit.
    pub fn append_server_template(&self, alias: &str) -> CoreResult<()> {
        let block = format!("\n{alias} {{\n    host: 1.2.3.4\n    user: root\n    port: 22\n}}\n");
        append(&self.config_path(), &block)
    }

    /// Append a proxy block skeleton for the user to edit.
    pub fn append_proxy_template(&self, alias: &str) -> CoreResult<()> {
        let block = format!(
            "\n{alias} {{\n    host: proxy.example.com\n    port: 1080\n    type: socks5\n}}\n"
        );
        append(&self.proxies_path(), &block)
    }
}

/// Create `path` with `header` when missing or empty; re-prepend the header
/// when the first line no longer matches. Returns `true` when created.
fn ensure_file(path: &Path, header: &str) -> CoreResult<bool> {
    if !path.is_file() {
        fs::write(path, header)?;
        restrict_permissions(path, 0o600)?;
        return Ok(true);
    }

    let content = fs::read_to_string(path)?;
    if content.is_empty() {
        fs::write(path, header)?;
        return Ok(true);
    }

    let expected = header.lines().next().unwrap_or_default();
    let actual = content.lines().next().unwrap_or_default();
    if expected != actual {
        debug!("[CONFIG] Restoring header of {}", path.display());
        fs::write(path, format!("{header}{content}"))?;
    }
    Ok(false)
}

fn append(path: &Path, block: &str) -> CoreResult<()> {
    let mut file = fs::OpenOptions::new().append(true).open(path)?;
    file.write_all(block.as_bytes())?;
    debug!("[CONFIG] Appended template to {}", path.display());
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path, mode: u32) -> CoreResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restrict_permissions(_path: &Path, _mode: u32) -> CoreResult<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::ProxyKind;

    fn temp_store() -> (tempfile::TempDir, ConfigStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = ConfigStore::with_dir(tmp.path().join(DIR_NAME));
        (tmp, store)
    }

    #[test]
    fn test_initialize_creates_files_and_reports_first_run() {
        let (_tmp, store) = temp_store();
        assert!(store.initialize().unwrap());

        let config = fs::read_to_string(store.config_path()).unwrap();
        assert!(config.starts_with("# SSH Orchestrator Server Configuration"));
        let proxies = fs::read_to_string(store.proxies_path()).unwrap();
        assert!(proxies.starts_with("# SSH Orchestrator Proxy Configuration"));

        // Second call sees the existing store
        assert!(!store.initialize().unwrap());
    }

    #[test]
    fn test_initialize_keeps_existing_content() {
        let (_tmp, store) = temp_store();
        store.initialize().unwrap();
        fs::write(store.config_path(), format!("{SERVER_HEADER}a {{ host: x }}\n")).unwrap();

        assert!(!store.initialize().unwrap());
        let servers = store.load_servers().unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].alias, "a");
    }

    #[test]
    fn test_initialize_restores_missing_header() {
        let (_tmp, store) = temp_store();
        store.initialize().unwrap();
        fs::write(store.config_path(), "a { host: x }\n").unwrap();

        store.initialize().unwrap();
        let content = fs::read_to_string(store.config_path()).unwrap();
        assert!(content.starts_with("# SSH Orchestrator Server Configuration"));
        assert!(content.contains("a { host: x }"));
    }

    #[test]
    fn test_headers_parse_to_no_entries() {
        let (_tmp, store) = temp_store();
        store.initialize().unwrap();
        assert!(store.load_servers().unwrap().is_empty());
        assert!(store.load_proxies().unwrap().is_empty());
    }

    #[test]
    fn test_append_server_template_parses_back() {
        let (_tmp, store) = temp_store();
        store.initialize().unwrap();
        store.append_server_template("new-server").unwrap();

        let servers = store.load_servers().unwrap();
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].alias, "new-server");
        assert_eq!(servers[0].host, "1.2.3.4");
        assert_eq!(servers[0].user.as_deref(), Some("root"));
        assert_eq!(servers[0].port, Some(22));
    }

    #[test]
    fn test_append_proxy_template_parses_back() {
        let (_tmp, store) = temp_store();
        store.initialize().unwrap();
        store.append_proxy_template("new-proxy").unwrap();

        let proxies = store.load_proxies().unwrap();
        assert_eq!(proxies.len(), 1);
        assert_eq!(proxies[0].alias, "new-proxy");
        assert_eq!(proxies[0].port, Some(1080));
        assert_eq!(proxies[0].kind, ProxyKind::Socks5);
    }

    #[test]
    fn test_load_without_initialize_is_an_error() {
        let (_tmp, store) = temp_store();
        assert!(store.load_servers().is_err());
    }
}
