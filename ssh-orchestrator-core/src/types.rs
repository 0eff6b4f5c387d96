//! Shared data model: configured entries and probe status

/// A server block from the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub alias: String,
    pub host: String,
    pub user: Option<String>,
    pub port: Option<u16>,
    /// Path to the identity file, passed through to `ssh -i` verbatim
    pub identity: Option<String>,
    /// Alias of the proxy entry to tunnel through
    pub proxy: Option<String>,
}

/// A proxy block from the proxies file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEntry {
    pub alias: String,
    pub host: String,
    pub port: Option<u16>,
    pub kind: ProxyKind,
    pub user: Option<String>,
    pub password: Option<String>,
}

/// Tunnel protocol spoken by a proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProxyKind {
    #[default]
    Socks5,
    Http,
}

impl ProxyKind {
    /// Parse a config `type` value, case-insensitively. `None` for unknown values.
    #[must_use]
    pub fn from_config_value(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "socks5" => Some(Self::Socks5),
            "http" => Some(Self::Http),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Socks5 => "socks5",
            Self::Http => "http",
        }
    }
}

/// Reachability of a single configured host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    /// Probe dispatched, no result yet
    Checking,
    Online,
    Offline,
}

impl HostStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::Online => "Online",
            Self::Offline => "Offline",
        }
    }
}
