// src/row.rs
use std::collections::HashMap;

pub const COL_COORDINATES: &str = "Coordinates";
pub const COL_YEAR: &str = "Year";
pub const COL_MONTH: &str = "Month";
pub const COL_DAY: &str = "Day";
pub const COL_SWIM: &str = "Swim #";

/// One record from a row source: column name → cell text.
/// `line` is the 1-based line (TSV) or sheet row the record came from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    line: usize,
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new(line: usize) -> Self {
        Self { line, fields: HashMap::new() }
    }

    pub fn from_pairs<K, V, I>(line: usize, pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let fields = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { line, fields }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn line(&self) -> usize { self.line }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    /// Raw `Swim #` text for diagnostics, `?` when the column is absent.
    pub fn swim_label(&self) -> String {
        match self.get(COL_SWIM) {
            Some(v) if !v.trim().is_empty() => s!(v.trim()),
            _ => s!("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swim_label_falls_back_when_missing_or_blank() {
        let r = Row::from_pairs(3, [(COL_SWIM, " 12 ")]);
        assert_eq!(r.swim_label(), "12");

        let blank = Row::from_pairs(4, [(COL_SWIM, "  ")]);
        assert_eq!(blank.swim_label(), "?");
        assert_eq!(Row::new(5).swim_label(), "?");
    }

    #[test]
    fn insert_overwrites() {
        let mut r = Row::new(2);
        r.insert("Month", "June");
        r.insert("Month", "July");
        assert_eq!(r.get("Month"), Some("July"));
        assert_eq!(r.len(), 1);
        assert_eq!(r.line(), 2);
    }
}
