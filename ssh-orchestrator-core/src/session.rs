//! Interactive SSH session launching
//!
//! Builds the `ssh` argument list from a server entry (optionally tunneled
//! through a configured proxy) and runs it, in a new terminal window where
//! the platform makes that practical, inline otherwise.

use std::process::Command;

use log::debug;

use crate::error::{CoreError, CoreResult};
use crate::types::{ProxyEntry, ProxyKind, ServerEntry};

/// Port substituted into the tunnel directive (and probed) when a proxy
/// block does not set one.
pub const DEFAULT_PROXY_PORT: u16 = 1080;

/// Look up the proxy entry a server references. `Ok(None)` when the server
/// has no proxy configured, an error when the alias is dangling.
pub fn resolve_proxy<'a>(
    server: &ServerEntry,
    proxies: &'a [ProxyEntry],
) -> CoreResult<Option<&'a ProxyEntry>> {
    let Some(alias) = &server.proxy else {
        return Ok(None);
    };
    proxies
        .iter()
        .find(|p| &p.alias == alias)
        .map(Some)
        .ok_or_else(|| CoreError::ProxyNotFound(alias.clone()))
}

/// Argument list for `ssh`: `-p`, `-i`, proxy directive, then `user@host`.
#[must_use]
pub fn build_ssh_args(server: &ServerEntry, proxy: Option<&ProxyEntry>) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(port) = server.port {
        args.push("-p".to_string());
        args.push(port.to_string());
    }
    if let Some(identity) = &server.identity {
        args.push("-i".to_string());
        args.push(identity.clone());
    }
    if let Some(proxy) = proxy {
        args.push("-o".to_string());
        args.push(proxy_directive(proxy));
    }

    let target = match &server.user {
        Some(user) => format!("{user}@{}", server.host),
        None => server.host.clone(),
    };
    args.push(target);
    args
}

/// Netcat tunneling directive. Socks5 is netcat's default mode, http needs
/// `-X connect`.
fn proxy_directive(proxy: &ProxyEntry) -> String {
    let port = proxy.port.unwrap_or(DEFAULT_PROXY_PORT);
    match proxy.kind {
        ProxyKind::Socks5 => format!("ProxyCommand=nc -x {}:{port} %h %p", proxy.host),
        ProxyKind::Http => format!("ProxyCommand=nc -X connect -x {}:{port} %h %p", proxy.host),
    }
}

/// Launch an interactive ssh session and wait for it to finish.
pub fn connect(server: &ServerEntry, proxy: Option<&ProxyEntry>) -> CoreResult<()> {
    which::which("ssh").map_err(|_| CoreError::BinaryNotFound("ssh".to_string()))?;

    let args = build_ssh_args(server, proxy);
    debug!("[SSH] Launching ssh {}", args.join(" "));

    let status = terminal_command(&args)
        .status()
        .map_err(|e| CoreError::LaunchFailed(format!("ssh: {e}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(CoreError::LaunchFailed(format!("ssh exited with {status}")))
    }
}

/// A new terminal window on windows and linux desktops, inline elsewhere.
fn terminal_command(args: &[String]) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", "ssh"]).args(args);
        return cmd;
    }

    if cfg!(target_os = "linux") {
        if let Ok(term) = which::which("gnome-terminal") {
            let mut cmd = Command::new(term);
            cmd.arg("--").arg("ssh").args(args);
            return cmd;
        }
        if let Ok(term) = which::which("x-terminal-emulator") {
            let mut cmd = Command::new(term);
            cmd.arg("-e").arg("ssh").args(args);
            return cmd;
        }
    }

    // macos and fallback: current terminal, inheriting stdio
    let mut cmd = Command::new("ssh");
    cmd.args(args);
    cmd
}
