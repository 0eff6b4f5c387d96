//! Proxy tunnel dependency: netcat detection and installation

use std::process::Stdio;

use async_trait::async_trait;
use log::{debug, warn};

use crate::error::{CoreError, CoreResult};

const NETCAT_BINARIES: [&str; 3] = ["nc", "ncat", "netcat"];
const NMAP_DOWNLOAD_URL: &str = "https://nmap.org/download.html";

/// Capability the dashboard consults before proxy add/edit actions.
///
/// Injected rather than called as a free function so the dashboard logic can
/// be exercised with a stub implementation.
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    /// Whether the tunnel helper is usable right now
    fn is_available(&self) -> bool;

    /// Try to install the tunnel helper through a platform package manager
    async fn install(&self) -> CoreResult<()>;
}

/// Real implementation backed by PATH lookups and the platform's package
/// manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNetcat;

#[async_trait]
impl DependencyCheck for SystemNetcat {
    fn is_available(&self) -> bool {
        NETCAT_BINARIES.iter().any(|bin| which::which(bin).is_ok())
    }

    async fn install(&self) -> CoreResult<()> {
        if cfg!(target_os = "windows") {
            install_windows().await
        } else if cfg!(target_os = "macos") {
            install_macos().await
        } else if cfg!(target_os = "linux") {
            install_linux().await
        } else {
            Err(CoreError::UnsupportedPlatform(
                "automatic netcat installation is not supported here".to_string(),
            ))
        }
    }
}

async fn install_windows() -> CoreResult<()> {
    // Insecure.Nmap ships ncat
    if which::which("winget").is_ok() {
        return run_installer(
            "winget",
            &[
                "install",
                "Insecure.Nmap",
                "--accept-source-agreements",
                "--accept-package-agreements",
            ],
        )
        .await;
    }
    if which::which("scoop").is_ok() {
        return run_installer("scoop", &["install", "ncat"]).await;
    }

    // No package manager: point the browser at the download page and make
    // the user finish the job
    warn!("[DEPS] No winget/scoop, opening the nmap download page");
    open_browser(NMAP_DOWNLOAD_URL).await;
    Err(CoreError::InstallFailed(
        "no package manager found, please install ncat manually".to_string(),
    ))
}

async fn install_macos() -> CoreResult<()> {
    if which::which("brew").is_ok() {
        return run_installer("brew", &["install", "netcat"]).await;
    }
    Err(CoreError::InstallFailed("homebrew not found".to_string()))
}

async fn install_linux() -> CoreResult<()> {
    if which::which("apt-get").is_ok() {
        return run_installer("sudo", &["apt-get", "install", "-y", "netcat"]).await;
    }
    if which::which("dnf").is_ok() {
        return run_installer("sudo", &["dnf", "install", "-y", "nmap-ncat"]).await;
    }
    if which::which("pacman").is_ok() {
        return run_installer("sudo", &["pacman", "-S", "--noconfirm", "gnu-netcat"]).await;
    }
    Err(CoreError::InstallFailed(
        "no supported package manager found".to_string(),
    ))
}

async fn run_installer(program: &str, args: &[&str]) -> CoreResult<()> {
    debug!("[DEPS] Running {program} {}", args.join(" "));
    // The dashboard owns the terminal while this runs, keep the installer off it
    let status = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| CoreError::InstallFailed(format!("{program}: {e}")))?;
    if status.success() {
        debug!("[DEPS] {program} finished successfully");
        Ok(())
    } else {
        Err(CoreError::InstallFailed(format!(
            "{program} exited with {status}"
        )))
    }
}

async fn open_browser(url: &str) {
    let (program, args): (&str, Vec<&str>) = if cfg!(target_os = "windows") {
        ("rundll32", vec!["url.dll,FileProtocolHandler", url])
    } else if cfg!(target_os = "macos") {
        ("open", vec![url])
    } else {
        ("xdg-open", vec![url])
    };

    let result = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;
    if let Err(e) = result {
        warn!("[DEPS] Could not open browser: {e}");
    }
}
