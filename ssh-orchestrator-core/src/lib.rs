//! SSH Orchestrator Core Library
//!
//! Provides the non-visual logic for the SSH Orchestrator dashboard:
//! - Host configuration store (block-grammar parser, on-disk layout, editor launch)
//! - Staged reachability probing (SSH handshake, TCP connect, ICMP echo)
//! - Interactive session launching with optional proxy tunneling
//! - Dependency checking/installation for the proxy tunnel helper
//!
//! This library is UI-independent; the terminal dashboard consumes it through
//! plain functions and the [`deps::DependencyCheck`] capability trait.

pub mod config;
pub mod deps;
pub mod error;
pub mod probe;
pub mod session;
pub mod types;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use types::{HostStatus, ProxyEntry, ProxyKind, ServerEntry};
