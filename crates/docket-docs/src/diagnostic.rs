use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::DocsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    Syntax,
    UnsupportedDeclaration,
    MalformedTagHeader,
    Io,
    Config,
}

/// A non-fatal problem met while documenting one file.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub path: PathBuf,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn from_error(path: &Path, error: &DocsError) -> Self {
        let kind = match error {
            DocsError::Io { .. } => DiagnosticKind::Io,
            DocsError::Parse { .. } => DiagnosticKind::Syntax,
            DocsError::UnsupportedDeclaration { .. } => DiagnosticKind::UnsupportedDeclaration,
            DocsError::MalformedTagHeader { .. } => DiagnosticKind::MalformedTagHeader,
            DocsError::Config(_) => DiagnosticKind::Config,
        };
        Self {
            path: path.to_path_buf(),
            kind,
            message: error.to_string(),
        }
    }
}
