//! Section labels used by the Markdown renderer.

use serde::{Deserialize, Serialize};

/// Fully resolved locale strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    #[serde(rename = "Params")]
    pub params: String,
    #[serde(rename = "Returns")]
    pub returns: String,
    #[serde(rename = "Example")]
    pub example: String,
    #[serde(rename = "Optional")]
    pub optional: String,
    #[serde(rename = "DefaultAs")]
    pub default_as: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            params: "Params".to_string(),
            returns: "Returns".to_string(),
            example: "Examples".to_string(),
            optional: "optional".to_string(),
            default_as: "Default:".to_string(),
        }
    }
}

impl Locale {
    /// Apply every override that is set, keeping defaults for the rest.
    pub fn with_overrides(mut self, overrides: &LocaleOverrides) -> Self {
        let LocaleOverrides {
            params,
            returns,
            example,
            optional,
            default_as,
        } = overrides;
        for (slot, value) in [
            (&mut self.params, params),
            (&mut self.returns, returns),
            (&mut self.example, example),
            (&mut self.optional, optional),
            (&mut self.default_as, default_as),
        ] {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        self
    }
}

/// User supplied locale strings. Each key is independent.
///
/// File keys use the host names (`Params`, `DefaultAs`); the snake case aliases
/// exist for environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleOverrides {
    #[serde(default, rename = "Params", alias = "params")]
    pub params: Option<String>,
    #[serde(default, rename = "Returns", alias = "returns")]
    pub returns: Option<String>,
    #[serde(default, rename = "Example", alias = "example")]
    pub example: Option<String>,
    #[serde(default, rename = "Optional", alias = "optional")]
    pub optional: Option<String>,
    #[serde(default, rename = "DefaultAs", alias = "defaultas", alias = "default_as")]
    pub default_as: Option<String>,
}

impl LocaleOverrides {
    /// Values set in `top` replace the ones in `self`.
    pub fn overlay(self, top: LocaleOverrides) -> Self {
        Self {
            params: top.params.or(self.params),
            returns: top.returns.or(self.returns),
            example: top.example.or(self.example),
            optional: top.optional.or(self.optional),
            default_as: top.default_as.or(self.default_as),
        }
    }
}
