//! Command line interface.
//!
//! The legacy flag names (`--localPort`, `--backendURL`,
//! `--delay_config`, `--block_config`) are accepted as aliases.

use clap::{Parser, ValueEnum};

use crate::config::schema::{DEFAULT_BACKEND, DEFAULT_LISTEN_PORT};

#[derive(Parser, Debug, Clone)]
#[command(name = "rest-proxy")]
#[command(about = "HTTP forwarding proxy with per-path delay and block rules", long_about = None)]
pub struct Cli {
    /// Local port to listen on
    #[arg(long, alias = "localPort", default_value_t = DEFAULT_LISTEN_PORT)]
    pub local_port: u16,

    /// Backend host:port every request is forwarded to
    #[arg(long, alias = "backendURL", default_value = DEFAULT_BACKEND)]
    pub backend_url: String,

    /// JSON object mapping path patterns to delays in seconds,
    /// for instance: '{"profile": 35}'
    #[arg(long, alias = "delay_config", default_value = "{}")]
    pub delay_config: String,

    /// JSON object mapping path patterns to response status codes,
    /// for instance: '{"profile": 404}'
    #[arg(long, alias = "block_config", default_value = "{}")]
    pub block_config: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Output format of the log subscriber.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable lines
    Pretty,
    /// One JSON object per line
    Json,
}
