//! Query parameters attached to a navigation.
//!
//! [`QueryParams`] is a flat, ordered `key → value` mapping. It is what the
//! dispatcher serializes into the `?key=value&...` part of the url handed to
//! the host. Values are [`ParamValue`] primitives; nested data is not
//! supported.
//!
//! # Example
//!
//! ```
//! use miniapp_navigator::QueryParams;
//!
//! let params = QueryParams::new()
//!     .with("id", 1)
//!     .with("q", "tea & cake");
//! assert_eq!(params.to_query_string(), "id=1&q=tea%20%26%20cake");
//!
//! let parsed = QueryParams::from_query_string("page=2&sort=name");
//! assert_eq!(parsed.get_as::<u32>("page"), Some(2));
//! ```

use std::fmt;

// ============================================================================
// ParamValue
// ============================================================================

/// A primitive query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Float(n) => write!(f, "{}", n),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

macro_rules! int_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    ParamValue::Int(i64::from(value))
                }
            }
        )*
    };
}

int_param!(i8, i16, i32, i64, u8, u16, u32);

// ============================================================================
// QueryParams
// ============================================================================

/// Ordered flat mapping serialized into a url query string.
///
/// Insertion order is kept. Inserting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    entries: Vec<(String, ParamValue)>,
}

impl QueryParams {
    /// Create empty parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a parameter value by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Get a parameter and parse its string form as `T`.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.to_string().parse().ok()
    }

    /// Return `true` if the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: &QueryParams) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// Serialize as `key=value` pairs joined by `&`, percent-encoding both
    /// sides. Empty parameters give an empty string.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&value.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a query string (with or without the leading `?`).
    ///
    /// Every value is kept as [`ParamValue::String`]. Malformed percent
    /// escapes are kept verbatim.
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(decode(key), decode(value));
        }

        params
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |s| s.into_owned())
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
