//! Error types for source parsing

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while turning source text into an AST
#[derive(Error, Debug, Diagnostic)]
pub enum ParseError {
    /// The parser reported one or more syntax errors
    #[error("Syntax error: {}", diagnostics.join("; "))]
    #[diagnostic(code(docket::parser::syntax))]
    Syntax { diagnostics: Vec<String> },

    /// The parser gave up before producing a usable program
    #[error("Parser aborted{}", reason.as_ref().map(|r| format!(" - {}", r)).unwrap_or_default())]
    #[diagnostic(code(docket::parser::aborted))]
    Aborted { reason: Option<String> },
}

impl ParseError {
    /// Create a Syntax error from diagnostic messages
    pub fn syntax(diagnostics: Vec<String>) -> Self {
        Self::Syntax { diagnostics }
    }

    /// Human readable summary without the variant prefix
    pub fn message(&self) -> String {
        match self {
            Self::Syntax { diagnostics } => diagnostics.join("; "),
            Self::Aborted { reason } => reason.clone().unwrap_or_else(|| "aborted".to_string()),
        }
    }
}

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, ParseError>;
