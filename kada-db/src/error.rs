//! Error types for kada-db

use thiserror::Error;

/// Result type alias for schema scanning operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading schema metadata
#[derive(Error, Debug)]
pub enum Error {
    /// MySQL driver error
    #[error("MySQL error: {0}")]
    MySql(#[from] mysql_async::Error),

    /// Connection could not be configured or established
    #[error("Connection error: {0}")]
    Connection(String),

    /// Metadata query returned something unusable
    #[error("Query error: {0}")]
    Query(String),

    /// DDL script could not be parsed
    #[error("Failed to parse SQL schema: {0}")]
    Parse(String),

    /// Reading a DDL script failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlparser::parser::ParserError> for Error {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        Error::Parse(err.to_string())
    }
}
