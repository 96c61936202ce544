//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     JSON rule table (delay / block)
//!     → rules.rs (ordered pattern → effect entries)
//!     → Freeze as immutable RuleTable, shared via Arc
//!
//! Per request:
//!     request path (percent-decoded)
//!     → matcher.rs (substring scan in configured order)
//!     → Return: effect of first match, or no match
//! ```
//!
//! # Design Decisions
//! - Tables loaded at startup, immutable at runtime (no locks)
//! - No regex in hot path (literal substring only)
//! - Deterministic: same path always matches the same rule
//! - First match wins (configured order)

pub mod matcher;
pub mod rules;

pub use matcher::{decoded_path, BlockRules, DelayRules};
pub use rules::{Rule, RuleTable};
