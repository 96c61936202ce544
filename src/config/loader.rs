//! Configuration loading from the command line.

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::cli::Cli;
use crate::config::schema::{BackendAuthority, ListenerConfig, ProxyConfig};
use crate::routing::{BlockRules, DelayRules, RuleTable};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rule table could not be decoded or holds an unusable value.
    #[error("invalid {table} table: {reason}")]
    RuleTable { table: &'static str, reason: String },

    /// The backend `host:port` is not a valid URI authority.
    #[error("invalid backend address {value:?}: {source}")]
    InvalidBackend {
        value: String,
        #[source]
        source: axum::http::uri::InvalidUri,
    },
}

/// Decode the delay table: pattern → whole seconds.
///
/// A negative delay is kept as a zero-second delay so the remaining rules
/// still apply.
pub fn parse_delay_rules(raw: &str) -> Result<DelayRules, ConfigError> {
    let secs: RuleTable<i64> = serde_json::from_str(raw).map_err(|e| ConfigError::RuleTable {
        table: "delay",
        reason: e.to_string(),
    })?;

    secs.try_map(|pattern, secs| {
        Ok(u64::try_from(secs).unwrap_or_else(|_| {
            tracing::warn!(pattern = %pattern, delay_secs = secs, "Negative delay treated as zero");
            0
        }))
    })
}

/// Decode the block table: pattern → HTTP status code.
pub fn parse_block_rules(raw: &str) -> Result<BlockRules, ConfigError> {
    let codes: RuleTable<u16> = serde_json::from_str(raw).map_err(|e| ConfigError::RuleTable {
        table: "block",
        reason: e.to_string(),
    })?;

    codes.try_map(|pattern, code| {
        StatusCode::from_u16(code).map_err(|_| ConfigError::RuleTable {
            table: "block",
            reason: format!("status code {} for pattern {:?} is out of range", code, pattern),
        })
    })
}

/// Decode a rule table, falling back to an empty table on error.
///
/// A bad table never stops the proxy; the error is logged and the table
/// behaves as if nothing had been configured.
pub fn load_rules<E, F>(raw: &str, parse: F) -> RuleTable<E>
where
    F: FnOnce(&str) -> Result<RuleTable<E>, ConfigError>,
{
    match parse(raw) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = %e, raw = %raw, "Ignoring rule table");
            RuleTable::new()
        }
    }
}

/// Build the runtime configuration from parsed command line arguments.
pub fn load_config(cli: &Cli) -> Result<ProxyConfig, ConfigError> {
    let backend: BackendAuthority =
        cli.backend_url
            .parse()
            .map_err(|source| ConfigError::InvalidBackend {
                value: cli.backend_url.clone(),
                source,
            })?;

    Ok(ProxyConfig {
        listener: ListenerConfig {
            port: cli.local_port,
        },
        backend,
        delay_rules: load_rules(&cli.delay_config, parse_delay_rules),
        block_rules: load_rules(&cli.block_config, parse_block_rules),
    })
}
