//! Top-level configuration for docket.
//!
//! Hosts either build a [`DocsConfig`] programmatically through
//! [`DocsConfig::from_value`] or load it from disk with
//! [`ConfigDiscovery`](crate::ConfigDiscovery).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::locale::{Locale, LocaleOverrides};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsConfig {
    /// Root used to compute relative paths and module names.
    #[serde(alias = "source_dir")]
    pub source_dir: PathBuf,

    /// Optional glob(s) a relative path must match to be processed.
    #[serde(default, rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_patterns: Option<MatchPatterns>,

    #[serde(default)]
    pub i18n: LocaleOverrides,
}

/// One glob or a list of globs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchPatterns {
    One(String),
    Many(Vec<String>),
}

impl MatchPatterns {
    pub fn as_slice(&self) -> &[String] {
        match self {
            MatchPatterns::One(pattern) => std::slice::from_ref(pattern),
            MatchPatterns::Many(patterns) => patterns,
        }
    }
}

impl DocsConfig {
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            match_patterns: None,
            i18n: LocaleOverrides::default(),
        }
    }

    /// Create from serde_json::Value (for programmatic config from a host)
    ///
    /// # Example
    ///
    /// ```
    /// use docket_config::DocsConfig;
    /// use serde_json::json;
    /// use std::path::PathBuf;
    ///
    /// let config = DocsConfig::from_value(json!({
    ///     "sourceDir": "/repo/src",
    ///     "match": "**/*.ts",
    ///     "i18n": { "Returns": "Result" }
    /// }))
    /// .unwrap();
    /// assert_eq!(config.source_dir, PathBuf::from("/repo/src"));
    /// assert_eq!(config.locale().returns, "Result");
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        let config: DocsConfig = serde_json::from_value(value).map_err(|e| {
            if e.to_string().contains("missing field `sourceDir`") {
                ConfigError::MissingSourceDir
            } else {
                ConfigError::InvalidValue(e.to_string())
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_match(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.match_patterns = match self.match_patterns.take() {
            None => Some(MatchPatterns::One(pattern)),
            Some(MatchPatterns::One(first)) => Some(MatchPatterns::Many(vec![first, pattern])),
            Some(MatchPatterns::Many(mut all)) => {
                all.push(pattern);
                Some(MatchPatterns::Many(all))
            }
        };
        self
    }

    /// Locale strings with the configured overrides applied.
    pub fn locale(&self) -> Locale {
        Locale::default().with_overrides(&self.i18n)
    }

    pub fn patterns(&self) -> &[String] {
        self.match_patterns
            .as_ref()
            .map(MatchPatterns::as_slice)
            .unwrap_or_default()
    }

    /// Anchor a relative `source_dir` at `root`.
    pub fn resolve_against(mut self, root: &Path) -> Self {
        if self.source_dir.is_relative() {
            self.source_dir = root.join(&self.source_dir);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingSourceDir);
        }
        for pattern in self.patterns() {
            glob::Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.msg.to_string(),
            })?;
        }
        Ok(())
    }
}
