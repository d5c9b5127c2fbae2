//! Ordered report summary (key → number | text).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A summary entry value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Number(f64),
    Text(String),
}

impl SummaryValue {
    /// Numeric content, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SummaryValue::Number(v) => Some(*v),
            SummaryValue::Text(_) => None,
        }
    }
}

impl std::fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryValue::Number(v) => write!(f, "{}", v),
            SummaryValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for SummaryValue {
    fn from(value: f64) -> Self {
        SummaryValue::Number(value)
    }
}

impl From<i64> for SummaryValue {
    fn from(value: i64) -> Self {
        SummaryValue::Number(value as f64)
    }
}

impl From<i32> for SummaryValue {
    fn from(value: i32) -> Self {
        SummaryValue::Number(value as f64)
    }
}

impl From<usize> for SummaryValue {
    fn from(value: usize) -> Self {
        SummaryValue::Number(value as f64)
    }
}

impl From<&str> for SummaryValue {
    fn from(value: &str) -> Self {
        SummaryValue::Text(value.to_string())
    }
}

impl From<String> for SummaryValue {
    fn from(value: String) -> Self {
        SummaryValue::Text(value)
    }
}

/// Insertion-ordered summary map with unique keys.
///
/// Re-inserting an existing key overwrites its value in place: the entry
/// keeps the display position of its first insertion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Summary {
    entries: IndexMap<String, SummaryValue>,
}

impl Summary {
    /// Create an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an entry; returns the previous value
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SummaryValue>,
    ) -> Option<SummaryValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Value stored under `key`
    pub fn get(&self, key: &str) -> Option<&SummaryValue> {
        self.entries.get(key)
    }

    /// Entries in display order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<K: Into<String>, V: Into<SummaryValue>> FromIterator<(K, V)> for Summary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut summary = Summary::new();
        for (key, value) in iter {
            summary.insert(key, value);
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order() {
        let mut summary = Summary::new();
        summary.insert("b", 1.0);
        summary.insert("a", "text");
        assert_eq!(summary.keys().collect::<Vec<_>>(), ["b", "a"]);
    }

    #[test]
    fn test_reinsert_overwrites_in_place() {
        let mut summary = Summary::new();
        summary.insert("first", 1.0);
        summary.insert("second", 2.0);
        let previous = summary.insert("first", 10.0);

        assert_eq!(previous, Some(SummaryValue::Number(1.0)));
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.keys().collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(summary.get("first"), Some(&SummaryValue::Number(10.0)));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(SummaryValue::Number(3.0).to_string(), "3");
        assert_eq!(SummaryValue::Number(0.5).to_string(), "0.5");
        assert_eq!(SummaryValue::from("n/a").to_string(), "n/a");
    }

    #[test]
    fn test_from_iter() {
        let summary: Summary = vec![("x", 1.0), ("y", 2.0)].into_iter().collect();
        assert_eq!(summary.len(), 2);
    }
}
