//! Rule table definitions.
//!
//! A rule table maps a path pattern to an effect value: seconds to sleep for
//! the delay table, the status code to answer with for the block table.
//!
//! # Design Decisions
//! - Rules are stored as an ordered sequence, in configured order
//! - A repeated pattern keeps its first position and takes the last value
//! - `null` deserializes to an empty table
//! - Immutable once loaded; shared read-only across requests

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single `pattern → effect` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<E> {
    /// Literal substring searched for in the request path.
    pub pattern: String,
    /// Value applied when the pattern matches.
    pub effect: E,
}

/// Ordered collection of rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable<E> {
    pub(crate) rules: Vec<Rule<E>>,
}

impl<E> Default for RuleTable<E> {
    fn default() -> Self {
        Self { rules: Vec::new() }
    }
}

impl<E> RuleTable<E> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule at the end of the table.
    ///
    /// If the pattern is already present its effect is replaced in place.
    pub fn insert(&mut self, pattern: impl Into<String>, effect: E) {
        let pattern = pattern.into();
        match self.rules.iter_mut().find(|r| r.pattern == pattern) {
            Some(existing) => existing.effect = effect,
            None => self.rules.push(Rule { pattern, effect }),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over the rules in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule<E>> {
        self.rules.iter()
    }

    /// Convert every effect, stopping at the first conversion error.
    pub fn try_map<T, Err, F>(self, mut f: F) -> Result<RuleTable<T>, Err>
    where
        F: FnMut(&str, E) -> Result<T, Err>,
    {
        let mut rules = Vec::with_capacity(self.rules.len());
        for Rule { pattern, effect } in self.rules {
            let effect = f(&pattern, effect)?;
            rules.push(Rule { pattern, effect });
        }
        Ok(RuleTable { rules })
    }
}

impl<P, E> FromIterator<(P, E)> for RuleTable<E>
where
    P: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, E)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (pattern, effect) in iter {
            table.insert(pattern, effect);
        }
        table
    }
}

impl<E: Serialize> Serialize for RuleTable<E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rules.len()))?;
        for rule in &self.rules {
            map.serialize_entry(&rule.pattern, &rule.effect)?;
        }
        map.end()
    }
}

struct RuleTableVisitor<E> {
    marker: PhantomData<fn() -> RuleTable<E>>,
}

impl<'de, E: Deserialize<'de>> Visitor<'de> for RuleTableVisitor<E> {
    type Value = RuleTable<E>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object mapping path patterns to integers")
    }

    fn visit_unit<Err: de::Error>(self) -> Result<Self::Value, Err> {
        Ok(RuleTable::new())
    }

    fn visit_none<Err: de::Error>(self) -> Result<Self::Value, Err> {
        Ok(RuleTable::new())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut table = RuleTable {
            rules: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        // Map access yields entries in document order.
        while let Some((pattern, effect)) = access.next_entry::<String, E>()? {
            table.insert(pattern, effect);
        }
        Ok(table)
    }
}

impl<'de, E: Deserialize<'de>> Deserialize<'de> for RuleTable<E> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(RuleTableVisitor {
            marker: PhantomData,
        })
    }
}
