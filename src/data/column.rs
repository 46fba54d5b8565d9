//! Column descriptors.

use serde::{Deserialize, Serialize};

use super::{Record, ID_KEY};

/// A table column: the record key it reads and its display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Key into the record.
    pub key: String,
    /// Header label.
    pub title: String,
}

impl Column {
    /// Create a new column.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }

    /// Parse a `key:Title` pair. A bare key gets a title derived from it.
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        match spec.split_once(':') {
            Some((key, title)) if !key.trim().is_empty() => {
                let title = title.trim();
                let title = if title.is_empty() {
                    humanize_key(key.trim())
                } else {
                    title.to_string()
                };
                Some(Self::new(key.trim(), title))
            }
            Some(_) => None,
            None => Some(Self::new(spec, humanize_key(spec))),
        }
    }
}

/// Turn a record key into a header title.
///
/// `firstName` becomes `First Name`, `zip_code` becomes `Zip Code`.
pub fn humanize_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for c in key.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive columns from the keys of the first record, skipping `id`.
pub fn infer_columns(records: &[Record]) -> Vec<Column> {
    let Some(first) = records.first() else {
        return Vec::new();
    };

    first
        .keys()
        .filter(|key| *key != ID_KEY)
        .map(|key| Column::new(key, humanize_key(key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records_from_json;
    use serde_json::json;

    #[test]
    fn test_parse_key_and_title() {
        let column = Column::parse("firstName:First Name").unwrap();
        assert_eq!(column.key, "firstName");
        assert_eq!(column.title, "First Name");
    }

    #[test]
    fn test_parse_bare_key() {
        let column = Column::parse("zipCode").unwrap();
        assert_eq!(column.key, "zipCode");
        assert_eq!(column.title, "Zip Code");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(Column::parse("").is_none());
        assert!(Column::parse(":Title").is_none());
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("firstName"), "First Name");
        assert_eq!(humanize_key("date_of_birth"), "Date Of Birth");
        assert_eq!(humanize_key("city"), "City");
    }

    #[test]
    fn test_infer_columns_skips_id() {
        let records = vec![Record::new("1").with("id", 1).with("name", "John").with("city", "Anytown")];
        let columns = infer_columns(&records);
        let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "city"]);
    }

    #[test]
    fn test_infer_columns_keeps_document_order() {
        let records = records_from_json(json!([
            {"id": 1, "name": "John", "city": "Anytown", "age": 30},
            {"id": 2, "age": 25, "city": "Springfield", "name": "Jane"}
        ]));
        let keys: Vec<String> = infer_columns(&records).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["name", "city", "age"]);
    }

    #[test]
    fn test_infer_columns_empty() {
        assert!(infer_columns(&[]).is_empty());
    }
}
