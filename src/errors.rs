/*!
 * Error types for the exam-composer application.
 *
 * Text normalization and math formatting never fail; malformed input degrades
 * to plain text. The errors below cover what can: reading documents, writing
 * share payloads and assembling the document file.
 */

use thiserror::Error;

/// Errors that can occur while assembling a document file
#[derive(Error, Debug)]
pub enum ExportError {
    /// Writing a document part failed
    #[error("Failed to write document part: {0}")]
    Io(#[from] std::io::Error),

    /// The `.docx` container could not be produced
    #[error("Failed to package document: {0}")]
    Package(String),

    /// The background assembly task did not complete
    #[error("Document assembly task failed: {0}")]
    TaskFailed(String),
}

/// Errors that can occur when reading an exam document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input is not valid document JSON
    #[error("Failed to parse document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur when producing a share payload
#[derive(Error, Debug)]
pub enum ShareError {
    /// The document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors found while validating the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The language tag does not name a supported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// A setting is out of range or empty
    #[error("Invalid setting: {0}")]
    InvalidValue(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document parsing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Error from document export
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Error from share payload creation
    #[error("Share error: {0}")]
    Share(#[from] ShareError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
