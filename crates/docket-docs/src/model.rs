use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a record documents the whole file or a single declaration.
///
/// `File` orders before `Block`, which is the order records are rendered in.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    File,
    #[default]
    Block,
}

/// One documentation unit parsed from a doc comment.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRecord {
    pub kind: DocKind,
    /// Declaration (or file) name.
    pub name: String,
    /// Display name override from `@alias`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Free text; separate runs are joined with a newline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub params: Vec<ParamItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub returns: Option<ParamItem>,
    /// Markdown ready example blocks, already fenced.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub examples: Vec<String>,
}

impl DocRecord {
    /// `alias` when set, else `name`.
    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn is_file(&self) -> bool {
        self.kind == DocKind::File
    }
}

/// A parameter or return value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamItem {
    pub name: String,
    /// Type alternatives, e.g. `{string|number}` becomes two entries. Source
    /// annotations are kept verbatim as a single entry.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

impl ParamItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.types = vec![ty.into()];
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self.optional = true;
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }
}

/// Facts known before the comment is read, usually derived from the AST.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocSeed {
    pub name: Option<String>,
    pub params: Vec<ParamItem>,
    pub returns: Option<ParamItem>,
}

impl DocSeed {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Host assigned identifier of a source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FileId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
