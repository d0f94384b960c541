//! What the pipeline needs from its host: somewhere to put documents and a
//! way to read sources.

use std::collections::BTreeMap;
use std::path::Path;

use docket_config::Locale;
use serde::Serialize;

use crate::error::{DocsError, Result};
use crate::generators::RenderedModule;
use crate::model::FileId;

pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

/// Identifier of the document rendered for `module`.
pub fn document_id(module: &str) -> String {
    format!("doc:{module}")
}

/// A rendered module, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub id: String,
    pub module: String,
    pub content: String,
    pub media_type: &'static str,
    pub fingerprint: String,
    /// Files that contributed records, in id order.
    pub sources: Vec<FileId>,
}

impl RenderedDocument {
    pub fn new(module: impl Into<String>, rendered: RenderedModule, sources: Vec<FileId>) -> Self {
        let module = module.into();
        Self {
            id: document_id(&module),
            module,
            content: rendered.content,
            media_type: MARKDOWN_MEDIA_TYPE,
            fingerprint: rendered.fingerprint,
            sources,
        }
    }
}

/// Document storage provided by the host.
pub trait DocumentSink {
    /// Create or replace the document with `document.id`.
    fn create_document(&mut self, document: RenderedDocument);

    fn delete_document(&mut self, id: &str);

    fn lookup_document(&self, id: &str) -> Option<&RenderedDocument>;

    /// Locale strings that take precedence over the configured ones.
    fn locale(&self) -> Option<Locale> {
        None
    }
}

/// In-memory [`DocumentSink`], mostly for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: BTreeMap<String, RenderedDocument>,
    locale: Option<Locale>,
    writes: usize,
    deletes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn documents(&self) -> impl Iterator<Item = &RenderedDocument> {
        self.documents.values()
    }

    pub fn get(&self, module: &str) -> Option<&RenderedDocument> {
        self.documents.get(&document_id(module))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Number of `create_document` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn deletes(&self) -> usize {
        self.deletes
    }
}

impl DocumentSink for MemorySink {
    fn create_document(&mut self, document: RenderedDocument) {
        self.writes += 1;
        self.documents.insert(document.id.clone(), document);
    }

    fn delete_document(&mut self, id: &str) {
        if self.documents.remove(id).is_some() {
            self.deletes += 1;
        }
    }

    fn lookup_document(&self, id: &str) -> Option<&RenderedDocument> {
        self.documents.get(id)
    }

    fn locale(&self) -> Option<Locale> {
        self.locale.clone()
    }
}

/// Reads source text. Called from worker threads.
pub trait SourceLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<String>;
}

/// [`SourceLoader`] backed by the file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|error| DocsError::Io {
            path: path.to_path_buf(),
            error,
        })
    }
}
