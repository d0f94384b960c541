//! File-based config discovery
//!
//! Finds `docket.toml` under a root directory and layers `DOCKET_*` environment
//! variables on top of it. The file uses the host option names (`sourceDir`,
//! `match`, `i18n.Params`, ...); environment keys are snake case
//! (`DOCKET_SOURCE_DIR`, `DOCKET_I18N__DEFAULT_AS`), so the two layers are
//! extracted separately and overlaid field by field.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

use crate::config::{DocsConfig, MatchPatterns};
use crate::error::{ConfigError, Result};
use crate::locale::LocaleOverrides;

/// Name of the configuration file looked up in the discovery root.
pub const CONFIG_FILE: &str = "docket.toml";

/// Prefix of environment variables that override file values.
pub const ENV_PREFIX: &str = "DOCKET_";

/// File-based configuration discovery
///
/// # Example
///
/// ```no_run
/// use docket_config::ConfigDiscovery;
///
/// let config = ConfigDiscovery::new(".").load().unwrap();
/// println!("documenting {}", config.source_dir.display());
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

/// One configuration layer; every field may be absent.
#[derive(Debug, Default, Deserialize)]
struct Layer {
    #[serde(default, rename = "sourceDir", alias = "source_dir")]
    source_dir: Option<PathBuf>,
    #[serde(default, rename = "match")]
    match_patterns: Option<MatchPatterns>,
    #[serde(default)]
    i18n: LocaleOverrides,
}

impl Layer {
    fn overlay(mut self, top: Layer) -> Self {
        if top.source_dir.is_some() {
            self.source_dir = top.source_dir;
        }
        if top.match_patterns.is_some() {
            self.match_patterns = top.match_patterns;
        }
        self.i18n = self.i18n.overlay(top.i18n);
        self
    }
}

impl ConfigDiscovery {
    /// Create a new config discovery with a root directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find the config file in the root directory
    pub fn find(&self) -> Option<PathBuf> {
        let path = self.root.join(CONFIG_FILE);
        path.is_file().then_some(path)
    }

    /// Load config from the discovered file plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` when there is no config file and no
    /// `DOCKET_*` variable, and `ConfigError::MissingSourceDir` when neither
    /// layer names a source directory.
    pub fn load(&self) -> Result<DocsConfig> {
        let file_layer = match self.find() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading docket config");
                Figment::from(Toml::file(&path)).extract::<Layer>()?
            }
            None => Layer::default(),
        };

        let env = Figment::from(Env::prefixed(ENV_PREFIX).split("__"));
        let env_layer: Layer = env.extract()?;

        if self.find().is_none()
            && env_layer.source_dir.is_none()
            && env_layer.match_patterns.is_none()
            && env_layer.i18n == LocaleOverrides::default()
        {
            return Err(ConfigError::NotFound(self.root.clone()));
        }

        let merged = file_layer.overlay(env_layer);
        let source_dir = merged.source_dir.ok_or(ConfigError::MissingSourceDir)?;
        let config = DocsConfig {
            source_dir,
            match_patterns: merged.match_patterns,
            i18n: merged.i18n,
        }
        .resolve_against(&self.root);
        config.validate()?;
        Ok(config)
    }
}
