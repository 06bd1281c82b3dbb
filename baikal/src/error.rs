//! Error types for Baikal

use thiserror::Error;

/// Baikal error type
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A record is missing a field the search layer iterates over
    #[error("Invalid record shape in {collection} record '{id}': missing {field}")]
    InvalidRecordShape {
        collection: String,
        id: String,
        field: String,
    },

    /// Record not found
    #[error("{kind} record not found: {id}")]
    RecordNotFound { kind: String, id: String },

    /// Two records in the same collection share an id
    #[error("Duplicate {kind} record: {id}")]
    DuplicateRecord { kind: String, id: String },

    /// Invalid query or filter value
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Parse error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for Baikal operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::ConfigError(format!("Invalid glob pattern: {}", err))
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RecordNotFound {
            kind: "portfolio".to_string(),
            id: "p9".to_string(),
        };
        assert_eq!(err.to_string(), "portfolio record not found: p9");
    }

    #[test]
    fn test_invalid_record_shape_display() {
        let err = Error::InvalidRecordShape {
            collection: "services".to_string(),
            id: "s1".to_string(),
            field: "features".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid record shape in services record 's1': missing features"
        );
    }
}
