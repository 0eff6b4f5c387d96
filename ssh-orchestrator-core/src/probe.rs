//! Staged reachability probe
//!
//! Classifies a host as online/offline via three fallback stages, each with
//! its own timeout:
//!
//! 1. SSH handshake, the gold standard: anything that completes (or rejects)
//!    an SSH exchange is a live host,
//! 2. bare TCP connect, for listeners that never finish a handshake,
//! 3. system `ping`, for hosts with the port closed or filtered.
//!
//! A probe never fails: every network condition maps to a [`HostStatus`].

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, trace};
use russh::client;
use russh::keys::PublicKey;
use russh::Disconnect;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::types::HostStatus;

// Timeout configuration constants
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(4);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const ECHO_TIMEOUT: Duration = Duration::from_secs(2);

const DEFAULT_SSH_PORT: u16 = 22;

// Throwaway credentials: the handshake is what we are after, an auth
// rejection still proves a live sshd.
const PROBE_USER: &str = "test";
const PROBE_PASSWORD: &str = "test";

/// Per-stage time budgets, injectable for tests
#[derive(Debug, Clone, Copy)]
pub struct ProbeTiming {
    pub handshake: Duration,
    pub connect: Duration,
    pub echo: Duration,
}

impl Default for ProbeTiming {
    fn default() -> Self {
        Self {
            handshake: HANDSHAKE_TIMEOUT,
            connect: CONNECT_TIMEOUT,
            echo: ECHO_TIMEOUT,
        }
    }
}

impl ProbeTiming {
    /// Upper bound on the latency of a full probe.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.handshake + self.connect + self.echo
    }
}

/// Probe `host` with the default stage budgets.
pub async fn check_host(host: &str, port: Option<u16>) -> HostStatus {
    check_host_with(host, port, ProbeTiming::default()).await
}

/// Probe `host`, classifying it as [`HostStatus::Online`] or
/// [`HostStatus::Offline`]. The port defaults to 22.
pub async fn check_host_with(host: &str, port: Option<u16>, timing: ProbeTiming) -> HostStatus {
    let port = port.unwrap_or(DEFAULT_SSH_PORT);
    let start = std::time::Instant::now();
    debug!("[PROBE] Starting check for {host}:{port}");

    // 1. SSH handshake
    if check_ssh(host, port, timing.handshake).await {
        debug!("[PROBE] {host}:{port} online via SSH, took {:?}", start.elapsed());
        return HostStatus::Online;
    }

    // 2. Bare TCP connect
    if check_tcp(host, port, timing.connect).await {
        debug!("[PROBE] {host}:{port} online via TCP, took {:?}", start.elapsed());
        return HostStatus::Online;
    }

    // 3. ICMP echo through the system ping binary
    if check_echo(host, timing.echo).await {
        debug!("[PROBE] {host} online via ping, took {:?}", start.elapsed());
        return HostStatus::Online;
    }

    debug!("[PROBE] {host}:{port} offline, took {:?}", start.elapsed());
    HostStatus::Offline
}

/// Accepts every host key: the probe checks reachability, not identity.
struct ProbeHandler;

impl client::Handler for ProbeHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        _server_public_key: &PublicKey,
    ) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

async fn check_ssh(host: &str, port: u16, budget: Duration) -> bool {
    let config = Arc::new(client::Config::default());

    match timeout(budget, client::connect(config, (host, port), ProbeHandler)).await {
        Ok(Ok(mut handle)) => {
            // Auth outcome is irrelevant, the transport already came up
            let _ = handle.authenticate_password(PROBE_USER, PROBE_PASSWORD).await;
            let _ = handle
                .disconnect(Disconnect::ByApplication, "", "en")
                .await;
            true
        }
        Ok(Err(russh::Error::IO(e))) => {
            trace!("[PROBE] SSH transport to {host}:{port} failed: {e}");
            false
        }
        Ok(Err(e)) => {
            // Protocol-level rejection still means something answered
            trace!("[PROBE] SSH endpoint at {host}:{port} answered with: {e}");
            true
        }
        Err(_) => {
            trace!("[PROBE] SSH handshake to {host}:{port} timed out ({budget:?})");
            false
        }
    }
}

async fn check_tcp(host: &str, port: u16, budget: Duration) -> bool {
    match timeout(budget, TcpStream::connect((host, port))).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            trace!("[PROBE] TCP connect to {host}:{port} failed: {e}");
            false
        }
        Err(_) => {
            trace!("[PROBE] TCP connect to {host}:{port} timed out ({budget:?})");
            false
        }
    }
}

async fn check_echo(host: &str, budget: Duration) -> bool {
    let mut cmd = tokio::process::Command::new("ping");
    if cfg!(target_os = "windows") {
        cmd.args(["-n", "1", "-w", "1000"]);
    } else {
        cmd.args(["-c", "1"]);
    }
    cmd.arg(host)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    match timeout(budget, cmd.status()).await {
        Ok(Ok(status)) => status.success(),
        Ok(Err(e)) => {
            trace!("[PROBE] ping {host} could not run: {e}");
            false
        }
        Err(_) => {
            trace!("[PROBE] ping {host} timed out ({budget:?})");
            false
        }
    }
}
