//! Path matching against rule tables.
//!
//! # Responsibilities
//! - Find the rule whose pattern occurs anywhere in the request path
//! - Return that rule's effect, or nothing
//!
//! # Design Decisions
//! - Literal, case-sensitive substring search over the percent-decoded path
//! - Rules are tried in configured order; the first hit wins
//! - Empty table short-circuits without scanning

use std::time::Duration;

use axum::http::StatusCode;

use crate::routing::rules::{Rule, RuleTable};

/// Delay rules: pattern → whole seconds to sleep.
pub type DelayRules = RuleTable<u64>;

/// Block rules: pattern → status code to answer with.
pub type BlockRules = RuleTable<StatusCode>;

/// Percent-decode a raw request path for matching.
///
/// Invalid UTF-8 after decoding is replaced rather than rejected, so every
/// request still gets a matchable path.
pub fn decoded_path(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}

impl<E> RuleTable<E> {
    /// Return the first rule whose pattern is a substring of `path`.
    pub fn find_rule(&self, path: &str) -> Option<&Rule<E>> {
        if self.rules.is_empty() {
            return None;
        }
        self.rules
            .iter()
            .find(|rule| path.contains(rule.pattern.as_str()))
    }

    /// Return the effect of the first matching rule.
    pub fn match_path(&self, path: &str) -> Option<&E> {
        self.find_rule(path).map(|rule| &rule.effect)
    }
}

impl RuleTable<u64> {
    /// Delay to inject for `path`, if any rule matches.
    pub fn delay_for(&self, path: &str) -> Option<Duration> {
        self.match_path(path).map(|secs| Duration::from_secs(*secs))
    }
}

impl RuleTable<StatusCode> {
    /// Status to short-circuit `path` with, if any rule matches.
    pub fn status_for(&self, path: &str) -> Option<StatusCode> {
        self.match_path(path).copied()
    }
}
