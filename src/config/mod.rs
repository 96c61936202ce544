//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command line flags
//!     → cli.rs (clap parse, defaults)
//!     → loader.rs (decode JSON rule tables, validate backend)
//!     → ProxyConfig (immutable)
//!     → handed to the HTTP server at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All flags have defaults so the proxy starts with no arguments
//! - A bad rule table degrades to an empty table, a bad backend is fatal

pub mod cli;
pub mod loader;
pub mod schema;

pub use cli::{Cli, LogFormat};
pub use loader::{load_config, ConfigError};
pub use schema::{BackendAuthority, ListenerConfig, ProxyConfig};
