use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

pub const SHA1: &str = "sha1";
pub const ORIGINAL_LINE_NUMBER: &str = "original_line_number";
pub const FINAL_LINE_NUMBER: &str = "final_line_number";
pub const ACTUAL_LINE: &str = "actual_line";

/// Whether `key` is one of the three fields fixed by a record's header line.
pub fn is_header_key(key: &str) -> bool {
    matches!(key, SHA1 | ORIGINAL_LINE_NUMBER | FINAL_LINE_NUMBER)
}

/// One blamed source line from `git blame --porcelain` output.
///
/// Fields are kept in the order they were first set, so the header triple
/// always serializes first. Every value is the raw string from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlameRecord {
    fields: Vec<(String, String)>,
}

impl BlameRecord {
    /// Open a record from the three values captured on a header line.
    pub fn new(sha1: &str, original_line_number: &str, final_line_number: &str) -> Self {
        BlameRecord {
            fields: vec![
                (SHA1.to_string(), sha1.to_string()),
                (ORIGINAL_LINE_NUMBER.to_string(), original_line_number.to_string()),
                (FINAL_LINE_NUMBER.to_string(), final_line_number.to_string()),
            ],
        }
    }

    /// Bind `key` to `value`, replacing an earlier value for the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn sha1(&self) -> &str {
        self.get(SHA1).unwrap_or_default()
    }

    pub fn original_line_number(&self) -> &str {
        self.get(ORIGINAL_LINE_NUMBER).unwrap_or_default()
    }

    pub fn final_line_number(&self) -> &str {
        self.get(FINAL_LINE_NUMBER).unwrap_or_default()
    }

    pub fn actual_line(&self) -> Option<&str> {
        self.get(ACTUAL_LINE)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for BlameRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// All records of a blame run, in the order their headers appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlameDocument {
    pub blame_lines: Vec<BlameRecord>,
}

impl BlameDocument {
    pub fn len(&self) -> usize {
        self.blame_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blame_lines.is_empty()
    }
}
