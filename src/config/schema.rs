//! Configuration schema definitions.
//!
//! This module defines the configuration the proxy runs with. It is built
//! once at startup and never changes afterwards.

use std::fmt;
use std::str::FromStr;

use axum::http::uri::{Authority, InvalidUri};

use crate::routing::{BlockRules, DelayRules};

/// Default local listen port.
pub const DEFAULT_LISTEN_PORT: u16 = 5050;

/// Default backend `host:port`.
pub const DEFAULT_BACKEND: &str = "127.0.0.1:8080";

/// Root configuration for the proxy.
#[derive(Debug, Clone, Default)]
pub struct ProxyConfig {
    /// Listener configuration.
    pub listener: ListenerConfig,

    /// The single upstream every non-blocked request is forwarded to.
    pub backend: BackendAuthority,

    /// Pattern → seconds to sleep before handling.
    pub delay_rules: DelayRules,

    /// Pattern → status code returned without contacting the backend.
    pub block_rules: BlockRules,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    /// Port bound on all interfaces.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_LISTEN_PORT,
        }
    }
}

/// Backend `host:port`, validated as a URI authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendAuthority(Authority);

impl BackendAuthority {
    pub fn as_authority(&self) -> &Authority {
        &self.0
    }
}

impl Default for BackendAuthority {
    fn default() -> Self {
        Self(Authority::from_static(DEFAULT_BACKEND))
    }
}

impl FromStr for BackendAuthority {
    type Err = InvalidUri;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Authority::from_str(s).map(Self)
    }
}

impl fmt::Display for BackendAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
