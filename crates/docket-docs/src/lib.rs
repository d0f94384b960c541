#![deny(clippy::all)]

//! Incremental documentation for JavaScript and TypeScript sources.
//!
//! This crate provides:
//! - A JSDoc style tag parser that merges comment text with facts read from the AST.
//! - A declaration binder built on OXC that turns a file into documentation records.
//! - A per-module aggregation store that tracks which modules need re-rendering.
//! - A deterministic Markdown renderer with content fingerprints.
//! - An event driven pipeline connecting a host's file events to a document sink.

pub mod diagnostic;
pub mod error;
pub mod event;
pub mod extractor;
pub mod generators;
pub mod host;
pub mod jsdoc;
pub mod merge;
pub mod model;
pub mod pipeline;
pub mod store;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::{DocsError, Result};
pub use event::{FileEvent, SourceFile};
pub use extractor::{AstExtractor, DocExtractor, ExtractOptions, FileDocs, Signature};
pub use generators::{MarkdownRenderer, RenderedModule};
pub use host::{
    document_id, DocumentSink, FsLoader, MemorySink, RenderedDocument, SourceLoader,
    MARKDOWN_MEDIA_TYPE,
};
pub use jsdoc::{parse_comment, parse_jsdoc, ParsedJsDoc, RawComment};
pub use model::{DocKind, DocRecord, DocSeed, FileId, ParamItem};
pub use pipeline::{DocsPipeline, FlushReport};
pub use store::{AggregationStore, ModuleBucket};

pub use docket_config::{DocsConfig, Locale};
