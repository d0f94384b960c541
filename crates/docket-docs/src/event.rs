//! File events delivered by the host.

use std::path::PathBuf;

use crate::model::FileId;

/// One change to the set of source files.
///
/// Events for the same file must arrive in the order they happened; events
/// for different files may interleave freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEvent {
    /// A file seen for the first time (initial scan or creation).
    Discovered {
        id: FileId,
        absolute_path: PathBuf,
        /// Path relative to the host's content root, used for `match`.
        relative_path: String,
    },
    /// Contents of a known file changed.
    Changed { id: FileId, absolute_path: PathBuf },
    Deleted { id: FileId },
}

/// A file known at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub id: FileId,
    pub absolute_path: PathBuf,
    pub relative_path: String,
}

impl SourceFile {
    pub fn new(
        id: impl Into<FileId>,
        absolute_path: impl Into<PathBuf>,
        relative_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            absolute_path: absolute_path.into(),
            relative_path: relative_path.into(),
        }
    }
}

impl From<SourceFile> for FileEvent {
    fn from(file: SourceFile) -> Self {
        FileEvent::Discovered {
            id: file.id,
            absolute_path: file.absolute_path,
            relative_path: file.relative_path,
        }
    }
}
