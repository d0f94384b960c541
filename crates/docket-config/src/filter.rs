//! Decides which files are documented and which module they belong to.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::config::DocsConfig;
use crate::error::{ConfigError, Result};

/// Extensions the documentation pipeline accepts.
pub const SOURCE_EXTENSIONS: [&str; 4] = ["js", "jsx", "ts", "tsx"];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled form of the path related options of [`DocsConfig`].
#[derive(Debug, Clone)]
pub struct SourceFilter {
    source_dir: PathBuf,
    patterns: Vec<Pattern>,
}

impl SourceFilter {
    pub fn new(config: &DocsConfig) -> Result<Self> {
        let patterns = config
            .patterns()
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    message: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            source_dir: config.source_dir.clone(),
            patterns,
        })
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Extension and `match` check on a host relative path.
    pub fn qualifies(&self, relative_path: &str) -> bool {
        if !has_source_extension(relative_path) {
            return false;
        }
        self.patterns.is_empty()
            || self
                .patterns
                .iter()
                .any(|pattern| pattern.matches_with(relative_path, MATCH_OPTIONS))
    }

    /// Path of `absolute_path` relative to the source root, `None` when outside it.
    pub fn relative_path(&self, absolute_path: &Path) -> Option<PathBuf> {
        let relative = absolute_path.strip_prefix(&self.source_dir).ok()?;
        let mut components = relative.components();
        match components.next() {
            Some(Component::Normal(_)) => Some(relative.to_path_buf()),
            _ => None,
        }
    }

    /// First path segment below the source root.
    ///
    /// `<root>/forms/input/index.ts` belongs to module `forms`; a file directly
    /// under the root is its own module.
    pub fn module_name(&self, absolute_path: &Path) -> Option<String> {
        let relative = self.relative_path(absolute_path)?;
        match relative.components().next()? {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

pub fn has_source_extension(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}
