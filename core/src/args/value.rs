use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

use super::byte_size::ByteSize;

/// Closed set of field kinds. Translation and inclusion rules are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Integer,
    Decimal,
    Date,
    ByteSize,
    Flag,
    Map,
    Path,
}

/// Ordered key/value pairs rendered as one repeated flag per entry.
///
/// The separator is the map's own token form (`key=value` by default,
/// `key:value` for HTTP headers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueMap {
    entries: BTreeMap<String, String>,
    separator: char,
}

impl KeyValueMap {
    pub fn new() -> Self {
        Self::with_separator('=')
    }

    pub fn with_separator(separator: char) -> Self {
        Self {
            entries: BTreeMap::new(),
            separator,
        }
    }

    /// Same entries, joined with `separator` instead.
    pub fn separated_by(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// One `key<sep>value` token per entry, in key order.
    pub fn entry_tokens(&self) -> Vec<String> {
        self.iter()
            .map(|(k, v)| format!("{k}{}{v}", self.separator))
            .collect()
    }
}

impl Default for KeyValueMap {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for KeyValueMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A typed option value, before translation into a command-line token.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Date(NaiveDate),
    ByteSize(ByteSize),
    Flag(bool),
    Map(KeyValueMap),
    Path(PathBuf),
}

impl ArgValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Integer(_) => ValueKind::Integer,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::Date(_) => ValueKind::Date,
            Self::ByteSize(_) => ValueKind::ByteSize,
            Self::Flag(_) => ValueKind::Flag,
            Self::Map(_) => ValueKind::Map,
            Self::Path(_) => ValueKind::Path,
        }
    }
}

/// Natural textual form, used whenever no rule is registered for a kind.
impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Decimal(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::ByteSize(b) => write!(f, "{b}"),
            Self::Flag(b) => write!(f, "{b}"),
            Self::Map(m) => f.write_str(&m.entry_tokens().join(",")),
            Self::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<u32> for ArgValue {
    fn from(v: u32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        Self::Decimal(v)
    }
}

impl From<NaiveDate> for ArgValue {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<ByteSize> for ArgValue {
    fn from(v: ByteSize) -> Self {
        Self::ByteSize(v)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<KeyValueMap> for ArgValue {
    fn from(v: KeyValueMap) -> Self {
        Self::Map(v)
    }
}

impl From<PathBuf> for ArgValue {
    fn from(v: PathBuf) -> Self {
        Self::Path(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_tokens_use_own_separator_in_key_order() {
        let mut headers = KeyValueMap::with_separator(':');
        headers.insert("Referer", "https://example.com");
        headers.insert("Accept", "*/*");

        assert_eq!(
            headers.entry_tokens(),
            vec!["Accept:*/*", "Referer:https://example.com"]
        );
    }

    #[test]
    fn display_is_natural_form() {
        assert_eq!(ArgValue::Integer(-3).to_string(), "-3");
        assert_eq!(ArgValue::Decimal(2.5).to_string(), "2.5");
        assert_eq!(ArgValue::Flag(true).to_string(), "true");
        assert_eq!(ArgValue::from("best").to_string(), "best");
    }

    #[test]
    fn kind_matches_variant() {
        let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(ArgValue::from(d).kind(), ValueKind::Date);
        assert_eq!(ArgValue::from(KeyValueMap::new()).kind(), ValueKind::Map);
        assert_eq!(ArgValue::from(PathBuf::from("a")).kind(), ValueKind::Path);
    }
}
