//! Multi-valued name/value maps and their form encoding.
//!
//! # Design
//! `Values` backs every map-shaped request option (headers, query
//! parameters, form bodies). Names are kept in a `BTreeMap` so the encoded
//! form is stable: names come out sorted, and values under one name keep
//! the order they were added in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// An ordered multi-map from name to one or more string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(BTreeMap<String, Vec<String>>);

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` under `name`, keeping any values already present.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    /// First value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    /// All values stored under `name`, in insertion order.
    pub fn get_all(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Every `(name, value)` pair, names sorted, values in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.as_str(), v.as_str())))
    }

    /// Encode as `application/x-www-form-urlencoded` (space becomes `+`).
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.pairs() {
            serializer.append_pair(name, value);
        }
        serializer.finish()
    }

    /// Parse an `application/x-www-form-urlencoded` string.
    ///
    /// Malformed escapes are decoded leniently rather than rejected.
    pub fn parse(input: &str) -> Self {
        form_urlencoded::parse(input.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Values
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Values::new();
        for (k, v) in iter {
            values.add(k, v);
        }
        values
    }
}
