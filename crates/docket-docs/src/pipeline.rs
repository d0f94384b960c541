//! Event driven documentation pipeline.
//!
//! Files of a batch are read and parsed in parallel; their results are then
//! applied to the [`AggregationStore`] one at a time, in event order. Only
//! [`flush`](DocsPipeline::flush) talks to the sink, and it only renders the
//! modules the batch touched.

use std::path::Path;

use docket_config::{DocsConfig, SourceFilter};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::event::{FileEvent, SourceFile};
use crate::extractor::{AstExtractor, DocExtractor, FileDocs};
use crate::generators::MarkdownRenderer;
use crate::host::{document_id, DocumentSink, FsLoader, RenderedDocument, SourceLoader};
use crate::model::FileId;
use crate::store::AggregationStore;

/// Modules touched by one [`flush`](DocsPipeline::flush), by outcome.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlushReport {
    pub written: Vec<String>,
    /// Rendered to the exact document the sink already had.
    pub unchanged: Vec<String>,
    pub deleted: Vec<String>,
}

impl FlushReport {
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.unchanged.is_empty() && self.deleted.is_empty()
    }

    pub fn merge(&mut self, other: FlushReport) {
        self.written.extend(other.written);
        self.unchanged.extend(other.unchanged);
        self.deleted.extend(other.deleted);
    }
}

enum Outcome {
    Upsert {
        id: FileId,
        module: String,
        docs: FileDocs,
    },
    Remove {
        id: FileId,
        diagnostics: Vec<Diagnostic>,
    },
}

impl Outcome {
    fn remove(id: FileId) -> Self {
        Outcome::Remove {
            id,
            diagnostics: Vec::new(),
        }
    }
}

pub struct DocsPipeline<S> {
    filter: SourceFilter,
    renderer: MarkdownRenderer,
    extractor: Box<dyn DocExtractor>,
    loader: Box<dyn SourceLoader>,
    store: AggregationStore,
    /// Host relative path of every discovered file, reused for `Changed`.
    relative_paths: FxHashMap<FileId, String>,
    sink: S,
    diagnostics: Vec<Diagnostic>,
}

impl<S: DocumentSink> DocsPipeline<S> {
    /// Build a pipeline reading from disk with the AST extractor.
    ///
    /// Locale strings come from the sink when it provides them, else from
    /// `config`.
    pub fn new(config: &DocsConfig, sink: S) -> Result<Self> {
        let filter = SourceFilter::new(config)?;
        let locale = sink.locale().unwrap_or_else(|| config.locale());
        Ok(Self {
            filter,
            renderer: MarkdownRenderer::new(locale),
            extractor: Box::new(AstExtractor::default()),
            loader: Box::new(FsLoader),
            store: AggregationStore::new(),
            relative_paths: FxHashMap::default(),
            sink,
            diagnostics: Vec::new(),
        })
    }

    pub fn with_extractor(mut self, extractor: impl DocExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn with_loader(mut self, loader: impl SourceLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Initial scan: document every known file, then render every module.
    pub fn populate(&mut self, files: impl IntoIterator<Item = SourceFile>) -> FlushReport {
        let events = files.into_iter().map(FileEvent::from).collect();
        self.apply_batch(events);
        self.flush()
    }

    /// Apply a batch of events to the store without rendering.
    pub fn apply_batch(&mut self, events: Vec<FileEvent>) {
        self.diagnostics.clear();

        // Resolved in event order so a `Changed` sees the `Discovered` before it.
        let jobs: Vec<(FileEvent, Option<String>)> = events
            .into_iter()
            .map(|event| {
                let relative_path = match &event {
                    FileEvent::Discovered {
                        id, relative_path, ..
                    } => {
                        self.relative_paths.insert(id.clone(), relative_path.clone());
                        Some(relative_path.clone())
                    }
                    FileEvent::Changed { id, .. } => self.relative_paths.get(id).cloned(),
                    FileEvent::Deleted { id } => {
                        self.relative_paths.remove(id);
                        None
                    }
                };
                (event, relative_path)
            })
            .collect();

        let filter = &self.filter;
        let extractor = self.extractor.as_ref();
        let loader = self.loader.as_ref();
        let outcomes: Vec<Outcome> = jobs
            .into_par_iter()
            .map(|(event, relative_path)| {
                process(filter, extractor, loader, event, relative_path)
            })
            .collect();

        for outcome in outcomes {
            match outcome {
                Outcome::Upsert { id, module, docs } => {
                    debug!(
                        file = %id,
                        module = %module,
                        records = docs.records.len(),
                        "documented file"
                    );
                    self.diagnostics.extend(docs.diagnostics);
                    self.store.upsert(&id, &module, docs.records);
                }
                Outcome::Remove { id, diagnostics } => {
                    self.diagnostics.extend(diagnostics);
                    self.store.remove(&id);
                }
            }
        }
    }

    /// Render every dirty module and hand the result to the sink.
    pub fn flush(&mut self) -> FlushReport {
        let mut report = FlushReport::default();

        for module in self.store.take_dirty_modules() {
            let id = document_id(&module);
            let Some(bucket) = self.store.module(&module) else {
                if self.sink.lookup_document(&id).is_some() {
                    debug!(module = %module, "deleting document of empty module");
                    self.sink.delete_document(&id);
                    report.deleted.push(module);
                }
                continue;
            };

            let rendered = self.renderer.render(&module, &bucket.records());
            let sources = bucket.file_ids();
            let unchanged = self.sink.lookup_document(&id).is_some_and(|existing| {
                existing.fingerprint == rendered.fingerprint && existing.sources == sources
            });
            if unchanged {
                report.unchanged.push(module);
                continue;
            }

            debug!(module = %module, fingerprint = %rendered.fingerprint, "writing document");
            self.sink
                .create_document(RenderedDocument::new(module.clone(), rendered, sources));
            report.written.push(module);
        }

        report
    }

    /// Consume events until the sender side closes.
    ///
    /// Whatever is queued when a batch starts is applied together and
    /// flushed once.
    pub async fn run(&mut self, mut events: mpsc::Receiver<FileEvent>) -> FlushReport {
        let mut total = FlushReport::default();
        while let Some(first) = events.recv().await {
            let mut batch = vec![first];
            while let Ok(event) = events.try_recv() {
                batch.push(event);
            }
            debug!(events = batch.len(), "processing batch");
            self.apply_batch(batch);
            total.merge(self.flush());
        }
        total
    }

    /// Problems met while applying the last batch.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn store(&self) -> &AggregationStore {
        &self.store
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

fn process(
    filter: &SourceFilter,
    extractor: &dyn DocExtractor,
    loader: &dyn SourceLoader,
    event: FileEvent,
    relative_path: Option<String>,
) -> Outcome {
    match event {
        FileEvent::Deleted { id } => Outcome::remove(id),
        FileEvent::Discovered {
            id, absolute_path, ..
        }
        | FileEvent::Changed { id, absolute_path } => {
            document(filter, extractor, loader, id, &absolute_path, relative_path)
        }
    }
}

/// Parse one file. Files that do not qualify (anymore) are removed.
///
/// `relative_path` is the host relative path; files the host never
/// announced fall back to their path below the source root.
fn document(
    filter: &SourceFilter,
    extractor: &dyn DocExtractor,
    loader: &dyn SourceLoader,
    id: FileId,
    absolute_path: &Path,
    relative_path: Option<String>,
) -> Outcome {
    let relative_path = match relative_path {
        Some(relative_path) => relative_path,
        None => match filter.relative_path(absolute_path) {
            Some(relative) => relative.to_string_lossy().replace('\\', "/"),
            None => return Outcome::remove(id),
        },
    };
    if !filter.qualifies(&relative_path) {
        return Outcome::remove(id);
    }
    let Some(module) = filter.module_name(absolute_path) else {
        return Outcome::remove(id);
    };

    let source = match loader.load(absolute_path) {
        Ok(source) => source,
        Err(error) => {
            warn!(path = %absolute_path.display(), "{error}");
            return Outcome::Remove {
                id,
                diagnostics: vec![Diagnostic::from_error(absolute_path, &error)],
            };
        }
    };

    let docs = extractor.extract(absolute_path, &source);
    Outcome::Upsert { id, module, docs }
}
