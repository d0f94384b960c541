use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Error variants for documentation extraction and generation.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to read or access a source file.
    #[error("failed to read source '{path}': {error}")]
    Io {
        /// Path to the source file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Parsing the source file with OXC failed.
    #[error("failed to parse source '{path}': {message}")]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// A declaration whose signature cannot be extracted.
    #[error("unsupported declaration `{name}` in '{path}': {details}")]
    UnsupportedDeclaration {
        /// Path to the source file.
        path: PathBuf,
        /// Declaration name, possibly empty.
        name: String,
        /// What made the declaration unsupported.
        details: String,
    },

    /// A `@param`/`@returns` header that does not follow `{type} name desc`.
    #[error("invalid @{tag}: {header}")]
    MalformedTagHeader {
        /// Tag name without the `@`.
        tag: String,
        /// The offending header text.
        header: String,
    },

    /// Invalid pipeline configuration.
    #[error(transparent)]
    Config(#[from] docket_config::ConfigError),
}

impl DocsError {
    /// Helper to create a parse error from a parser failure.
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn malformed(tag: &str, header: &str) -> Self {
        Self::MalformedTagHeader {
            tag: tag.to_string(),
            header: header.trim().to_string(),
        }
    }
}
