//! Error types for kada-codegen

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for kada-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Schema scan failed: {0}")]
    ScanError(#[from] kada_db::Error),

    #[error("Unsupported database type: {0}")]
    TypeResolutionError(String),

    #[error("Failed to render mapping file: {0}")]
    RenderError(String),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CodegenError {
    /// Whether this error aborts the whole run rather than a single table
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CodegenError::ConfigError(_)
                | CodegenError::ScanError(_)
                | CodegenError::ValidationError(_)
        )
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}
