//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → dispatcher.rs (log, delay, block)
//!     → forwarder.rs (rewrite to backend, relay response)
//!     → Send to client
//! ```

pub mod dispatcher;
pub mod forwarder;
pub mod headers;
pub mod server;

pub use dispatcher::{Decision, Dispatcher};
pub use forwarder::{ForwardError, Forwarder};
pub use server::HttpServer;
