//! Unified error type definition

use thiserror::Error;

// Re-export the parser error type
pub use crate::config::parser::ParseError;

/// Core layer error type
#[derive(Error, Debug)]
pub enum CoreError {
    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    Parse(#[from] ParseError),

    /// Filesystem error while reading or writing the config store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Home directory could not be located
    #[error("Could not locate the home directory")]
    HomeDirectory,

    /// A server references a proxy alias that is not configured
    #[error("Proxy not found: {0}")]
    ProxyNotFound(String),

    /// A required binary is missing from PATH
    #[error("Binary not found in PATH: {0}")]
    BinaryNotFound(String),

    /// No usable terminal editor could be located
    #[error("No terminal editor found (set $EDITOR or install vim/nano)")]
    EditorNotFound,

    /// A spawned command failed to start or exited unsuccessfully
    #[error("Launch failed: {0}")]
    LaunchFailed(String),

    /// Dependency installation did not complete
    #[error("Install failed: {0}")]
    InstallFailed(String),

    /// The current platform has no supported handler for the operation
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

impl CoreError {
    /// Whether it is expected behavior (user config, missing tools, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::Parse(_)
                | Self::ProxyNotFound(_)
                | Self::BinaryNotFound(_)
                | Self::EditorNotFound
                | Self::InstallFailed(_)
                | Self::UnsupportedPlatform(_)
        )
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
