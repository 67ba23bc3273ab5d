//! Placeholder normalization and the flat record view shared by all entities.

use serde::Serialize;

/// Marker substituted for an absent optional multi-valued group.
pub const PLACEHOLDER: &str = "None";

/// Insertion-ordered field map produced by [`ToRecord::to_record`].
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Maps an empty sequence to `["None"]` so consumers can assume non-emptiness.
#[must_use]
pub fn with_placeholder(values: Vec<String>) -> Vec<String> {
    if values.is_empty() {
        vec![PLACEHOLDER.to_string()]
    } else {
        values
    }
}

/// True when `values` is exactly the placeholder sequence.
#[must_use]
pub fn is_placeholder(values: &[String]) -> bool {
    matches!(values, [only] if only == PLACEHOLDER)
}

/// Iterates the real values of a possibly-placeholder sequence.
pub fn present(values: &[String]) -> impl Iterator<Item = &str> {
    let skip = is_placeholder(values);
    values
        .iter()
        .filter(move |_| !skip)
        .map(String::as_str)
}

pub trait ToRecord {
    fn to_record(&self) -> crate::Result<Record>;
}

impl<T: Serialize> ToRecord for T {
    fn to_record(&self) -> crate::Result<Record> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => {
                let mut map = Record::new();
                map.insert("value".into(), other);
                Ok(map)
            }
        }
    }
}
