//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     ListenerConfig (port)
//!     → listener.rs (bind on all interfaces)
//!     → TcpListener handed to the HTTP server
//! ```
//!
//! # Design Decisions
//! - Plain TCP only; no TLS termination
//! - A bind failure is fatal and surfaces to main

pub mod listener;

pub use listener::{bind, ListenerError};
