//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → logging.rs subscriber (pretty or JSON lines on stdout)
//! ```
//!
//! # Design Decisions
//! - Structured fields, not formatted strings, for request data
//! - Level filtering via RUST_LOG, sensible default otherwise

pub mod logging;
