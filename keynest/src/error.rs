//! All error types for the keynest crate.
//!
//! These are returned from all fallible operations (path parsing, tree
//! reconstruction, tabular parsing, file I/O).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed path `{0}`: empty segment")]
    MalformedPath(String),

    #[error(
        "conflicting schema at `{prefix}`: `{first_path}` uses it as {first_kind}, `{second_path}` uses it as {second_kind}"
    )]
    ConflictingSchema {
        prefix: String,
        first_path: String,
        first_kind: String,
        second_path: String,
        second_kind: String,
    },

    #[error("unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("missing key column: no header matches `key`")]
    MissingKeyColumn,

    #[error("invalid data: {0}")]
    DataMismatch(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a conflicting-schema error, naming the path that established
    /// the prefix's kind and the path that disagrees with it.
    pub fn conflicting_schema(
        prefix: &str,
        first_path: impl Into<String>,
        first_kind: impl Into<String>,
        second_path: impl Into<String>,
        second_kind: impl Into<String>,
    ) -> Self {
        let prefix = if prefix.is_empty() {
            "(root)".to_string()
        } else {
            prefix.to_string()
        };
        Error::ConflictingSchema {
            prefix,
            first_path: first_path.into(),
            first_kind: first_kind.into(),
            second_path: second_path.into(),
            second_kind: second_kind.into(),
        }
    }

    /// Creates a new unsupported-value error
    pub fn unsupported_value(message: impl Into<String>) -> Self {
        Error::UnsupportedValue(message.into())
    }
}
