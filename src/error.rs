//! Error types for the xmlstream library

use thiserror::Error;

/// Result type alias for xmlstream operations
pub type Result<T> = std::result::Result<T, XmlError>;

/// Main error type for all XML generation operations
#[derive(Error, Debug)]
pub enum XmlError {
    /// An element or attribute name referenced a namespace prefix that is
    /// not visible in the enclosing scope
    #[error("unknown namespace prefix: {prefix}")]
    UnknownPrefix { prefix: String },

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
