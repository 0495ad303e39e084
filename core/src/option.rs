//! Typed request options.
//!
//! # Design
//! Each kind of extra request configuration is its own wrapper type so a
//! caller states intent (`Params` vs `DataForm`) rather than passing a bare
//! map. The wrappers are unified in [`RequestOption`], a closed enum the
//! request builder matches exhaustively. There is no "unknown option"
//! case: anything that is not one of these kinds does not type-check.
//!
//! Nothing here validates names or values. Bad header names surface when
//! the request is dispatched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ureq::http::HeaderMap;

use crate::values::Values;

/// One piece of request configuration passed to [`crate::Session`] verbs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOption {
    Headers(Headers),
    Params(Params),
    DataForm(DataForm),
    Data(Data),
    Cookies(Cookies),
}

macro_rules! values_option {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name(pub Values);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Append a value under `name`; chainable.
            pub fn add(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                self.0.add(name, value);
                self
            }
        }

        impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl From<Values> for $name {
            fn from(values: Values) -> Self {
                Self(values)
            }
        }

        impl From<$name> for RequestOption {
            fn from(option: $name) -> Self {
                RequestOption::$name(option)
            }
        }
    };
}

values_option! {
    /// Request headers. Applying this option replaces any headers set by
    /// an earlier `Headers` option.
    Headers
}

values_option! {
    /// Query parameters, encoded and appended to the URL as `?<encoded>`.
    Params
}

values_option! {
    /// An `application/x-www-form-urlencoded` request body.
    DataForm
}

/// Take headers straight from a transport-level `HeaderMap`.
///
/// Names come out lowercase, as `HeaderMap` stores them, and repeated
/// values keep their order. Values that are not valid UTF-8 are decoded
/// lossily, the same way response headers are.
impl From<HeaderMap> for Headers {
    fn from(map: HeaderMap) -> Self {
        map.iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect()
    }
}

impl From<HeaderMap> for RequestOption {
    fn from(map: HeaderMap) -> Self {
        RequestOption::Headers(map.into())
    }
}

/// A raw request body, sent verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Data(pub Vec<u8>);

impl Data {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Data {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

impl From<String> for Data {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&[u8]> for Data {
    fn from(b: &[u8]) -> Self {
        Self(b.to_vec())
    }
}

impl From<Vec<u8>> for Data {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

impl From<Data> for RequestOption {
    fn from(option: Data) -> Self {
        RequestOption::Data(option)
    }
}

/// Cookies to send, one value per name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies(pub BTreeMap<String, String>);

impl Cookies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cookie `name`, replacing a previous value; chainable.
    pub fn add(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Cookies {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<Cookies> for RequestOption {
    fn from(option: Cookies) -> Self {
        RequestOption::Cookies(option)
    }
}

/// A single cookie as it will be written into the `Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
