//! Catalog file parsing
//!
//! A catalog document is a mapping with optional `content`, `portfolio`
//! and `services` lists, written as JSON or YAML. Records are checked on
//! the untyped tree first so that a missing tag list is reported as
//! [`Error::InvalidRecordShape`] naming the record, rather than as a
//! generic deserialisation failure.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Tag-like field each collection must carry, as (collection, JSON pointer, display name)
const REQUIRED_LISTS: [(&str, &str, &str); 3] = [
    ("content", "/metadata/tags", "metadata.tags"),
    ("portfolio", "/technologies", "technologies"),
    ("services", "/features", "features"),
];

/// Catalog file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => Some(CatalogFormat::Json),
            "yaml" | "yml" => Some(CatalogFormat::Yaml),
            _ => None,
        }
    }
}

/// Parse a catalog file
pub fn parse_catalog(path: &Path, content: &[u8]) -> Result<Catalog> {
    let format = CatalogFormat::from_path(path).ok_or_else(|| {
        Error::ParseError(format!("Unsupported catalog format: {}", path.display()))
    })?;

    let text = std::str::from_utf8(content)
        .map_err(|e| Error::ParseError(format!("{} is not valid UTF-8: {}", path.display(), e)))?;

    parse_str(text, format)
}

/// Parse catalog text in a known format
pub fn parse_str(text: &str, format: CatalogFormat) -> Result<Catalog> {
    let value: Value = match format {
        CatalogFormat::Json => serde_json::from_str(text)?,
        CatalogFormat::Yaml => serde_yaml::from_str(text)?,
    };
    parse_value(value)
}

/// Validate and convert an untyped catalog tree
pub fn parse_value(mut value: Value) -> Result<Catalog> {
    match value {
        // An empty YAML document
        Value::Null => return Ok(Catalog::default()),
        Value::Object(_) => {}
        _ => {
            return Err(Error::ParseError(
                "Catalog document must be a mapping".to_string(),
            ))
        }
    }

    normalize(&mut value)?;
    Ok(serde_json::from_value(value)?)
}

/// Stringify numeric ids and check every record carries its tag list
fn normalize(value: &mut Value) -> Result<()> {
    for (collection, pointer, field) in REQUIRED_LISTS {
        let Some(records) = value.get_mut(collection) else {
            continue;
        };

        let records = match records {
            Value::Null => continue,
            Value::Array(records) => records,
            _ => {
                return Err(Error::ParseError(format!(
                    "'{}' must be a list of records",
                    collection
                )))
            }
        };

        for (index, record) in records.iter_mut().enumerate() {
            if let Some(id) = record.get_mut("id") {
                let numeric = match &*id {
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                };
                if let Some(n) = numeric {
                    *id = Value::String(n);
                }
            }

            let has_list = record.pointer(pointer).is_some_and(Value::is_array);
            if !has_list {
                let id = record
                    .get("id")
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| format!("#{}", index));

                return Err(Error::InvalidRecordShape {
                    collection: collection.to_string(),
                    id,
                    field: field.to_string(),
                });
            }
        }
    }

    Ok(())
}
