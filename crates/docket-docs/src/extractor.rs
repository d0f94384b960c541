//! Binds doc comments to the top-level declarations of a file.
//!
//! Each top-level statement is unwrapped from `export`/`export default`, its
//! structure is read into a [`DocSeed`], and every doc comment in front of it
//! is parsed with that seed. Comments in front of the `export` keyword come
//! before comments in front of the declaration itself.

use std::path::Path;

use docket_parser::{parse, ParseOptions};
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, Class, Comment, Declaration,
    ExportDefaultDeclarationKind, Function, Program, Statement, TSTypeAnnotation,
    VariableDeclaration,
};
use oxc_span::{GetSpan, Span};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::error::DocsError;
use crate::jsdoc::{parse_comment, RawComment};
use crate::model::{DocRecord, DocSeed, ParamItem};

/// A strategy that turns one source file into documentation records.
///
/// Implementations must be pure: the pipeline runs them on many files at once.
pub trait DocExtractor: Send + Sync {
    fn extract(&self, path: &Path, source: &str) -> FileDocs;
}

/// Records and non-fatal problems produced for one file.
#[derive(Debug, Default, Clone)]
pub struct FileDocs {
    pub records: Vec<DocRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileDocs {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Options controlling documentation extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Document declarations whose signature cannot be read (destructured
    /// parameters) from their comments alone instead of skipping them.
    pub document_unsupported: bool,
}

/// Structure of a declaration, or why it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    Extracted(DocSeed),
    Skipped { name: String, reason: String },
}

fn named(name: impl Into<String>) -> Signature {
    Signature::Extracted(DocSeed::named(name))
}

/// Extracts documentation from JavaScript / TypeScript modules using OXC.
#[derive(Debug, Clone, Default)]
pub struct AstExtractor {
    options: ExtractOptions,
}

impl AstExtractor {
    /// Create a new extractor with the provided options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl DocExtractor for AstExtractor {
    fn extract(&self, path: &Path, source: &str) -> FileDocs {
        let allocator = Allocator::default();
        let parse_opts = ParseOptions::from_path(&path.to_string_lossy());

        let parsed = match parse(&allocator, source, parse_opts) {
            Ok(parsed) => parsed,
            Err(error) => {
                let error = DocsError::parse_error(path, error.message());
                warn!(path = %path.display(), "{error}");
                return FileDocs {
                    records: Vec::new(),
                    diagnostics: vec![Diagnostic::from_error(path, &error)],
                };
            }
        };

        let mut binder = Binder::new(path, parsed.source_text, &self.options);
        binder.bind_program(parsed.ast());
        binder.docs
    }
}

type CommentMap<'c> = FxHashMap<u32, Vec<&'c Comment>>;

struct Binder<'s> {
    path: &'s Path,
    source: &'s str,
    options: &'s ExtractOptions,
    /// Seed for file level comments: the base file name.
    file_seed: DocSeed,
    docs: FileDocs,
}

impl<'s> Binder<'s> {
    fn new(path: &'s Path, source: &'s str, options: &'s ExtractOptions) -> Self {
        let basename = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            source,
            options,
            file_seed: DocSeed::named(basename),
            docs: FileDocs::default(),
        }
    }

    fn bind_program(&mut self, program: &Program<'_>) {
        if program.body.is_empty() {
            for comment in program.comments.iter() {
                if let Some(record) = self.parse(comment, None) {
                    self.docs.records.push(record);
                }
            }
            return;
        }

        let mut leading: CommentMap<'_> = FxHashMap::default();
        for comment in program.comments.iter().filter(|comment| comment.is_leading()) {
            leading.entry(comment.attached_to).or_default().push(comment);
        }

        let mut anchors = FxHashSet::default();
        for statement in program.body.iter() {
            anchors.extend(self.bind_statement(statement, &leading));
        }

        // Whatever is left outside every statement acts as a trailing comment.
        let spans: Vec<Span> = program.body.iter().map(GetSpan::span).collect();
        for comment in program.comments.iter() {
            if comment.is_leading() && anchors.contains(&comment.attached_to) {
                continue;
            }
            let nested = spans
                .iter()
                .any(|span| span.start <= comment.span.start && comment.span.end <= span.end);
            if !nested {
                self.bind_file_comments(&[comment]);
            }
        }
    }

    /// Binds the comments of one statement and returns the offsets it used.
    fn bind_statement(
        &mut self,
        statement: &Statement<'_>,
        leading: &CommentMap<'_>,
    ) -> Vec<u32> {
        let outer = statement.span().start;
        let (inner, signature) = match statement {
            Statement::ExportNamedDeclaration(export) => match &export.declaration {
                Some(declaration) => (
                    Some(declaration.span().start),
                    self.declaration_signature(declaration),
                ),
                None => (None, named("")),
            },
            Statement::ExportDefaultDeclaration(export) => (
                Some(export.declaration.span().start),
                self.default_signature(&export.declaration),
            ),
            other => (None, self.statement_signature(other)),
        };

        let mut anchors = vec![outer];
        let mut comments: Vec<&Comment> = leading.get(&outer).cloned().unwrap_or_default();
        if let Some(inner) = inner.filter(|inner| *inner != outer) {
            anchors.push(inner);
            if let Some(more) = leading.get(&inner) {
                comments.extend(more.iter().copied());
            }
        }

        match signature {
            Signature::Extracted(seed) => self.bind_declaration_comments(&comments, &seed),
            Signature::Skipped { name, reason } => {
                let error = DocsError::UnsupportedDeclaration {
                    path: self.path.to_path_buf(),
                    name: name.clone(),
                    details: reason,
                };
                debug!(path = %self.path.display(), "{error}");
                self.docs
                    .diagnostics
                    .push(Diagnostic::from_error(self.path, &error));
                if self.options.document_unsupported {
                    self.bind_declaration_comments(&comments, &DocSeed::named(name));
                } else {
                    self.bind_file_comments(&comments);
                }
            }
        }
        anchors
    }

    fn bind_declaration_comments(&mut self, comments: &[&Comment], seed: &DocSeed) {
        for comment in comments {
            let Some(record) = self.parse(comment, Some(seed)) else {
                continue;
            };
            // `@file` blocks describe the file, not the declaration below them.
            let record = if record.is_file() {
                match self.parse(comment, None) {
                    Some(record) => record,
                    None => continue,
                }
            } else {
                record
            };
            self.docs.records.push(record);
        }
    }

    /// Keeps only comments that declare themselves `@file`.
    fn bind_file_comments(&mut self, comments: &[&Comment]) {
        for comment in comments {
            if let Some(record) = self.parse(comment, None) {
                if record.is_file() {
                    self.docs.records.push(record);
                }
            }
        }
    }

    /// `None` seed means the file seed.
    fn parse(&mut self, comment: &Comment, seed: Option<&DocSeed>) -> Option<DocRecord> {
        let raw = RawComment {
            text: comment.content_span().source_text(self.source),
            block: comment.is_block(),
        };
        let seed = seed.unwrap_or(&self.file_seed);
        match parse_comment(&raw, Some(seed)) {
            Ok(record) => record,
            Err(error) => {
                warn!(path = %self.path.display(), "{error}");
                self.docs
                    .diagnostics
                    .push(Diagnostic::from_error(self.path, &error));
                None
            }
        }
    }

    fn statement_signature(&self, statement: &Statement<'_>) -> Signature {
        match statement {
            Statement::FunctionDeclaration(function) => self.function_signature(function),
            Statement::VariableDeclaration(variable) => variable_signature(variable),
            Statement::ClassDeclaration(class) => named(class_name(class)),
            Statement::TSTypeAliasDeclaration(alias) => named(alias.id.name.to_string()),
            Statement::TSInterfaceDeclaration(interface) => named(interface.id.name.to_string()),
            Statement::TSEnumDeclaration(enumeration) => named(enumeration.id.name.to_string()),
            Statement::TSModuleDeclaration(module) => named(self.slice(module.id.span())),
            _ => named(""),
        }
    }

    fn declaration_signature(&self, declaration: &Declaration<'_>) -> Signature {
        match declaration {
            Declaration::FunctionDeclaration(function) => self.function_signature(function),
            Declaration::VariableDeclaration(variable) => variable_signature(variable),
            Declaration::ClassDeclaration(class) => named(class_name(class)),
            Declaration::TSTypeAliasDeclaration(alias) => named(alias.id.name.to_string()),
            Declaration::TSInterfaceDeclaration(interface) => {
                named(interface.id.name.to_string())
            }
            Declaration::TSEnumDeclaration(enumeration) => named(enumeration.id.name.to_string()),
            Declaration::TSModuleDeclaration(module) => named(self.slice(module.id.span())),
            _ => named(""),
        }
    }

    fn default_signature(&self, declaration: &ExportDefaultDeclarationKind<'_>) -> Signature {
        match declaration {
            ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                self.function_signature(function)
            }
            ExportDefaultDeclarationKind::ClassDeclaration(class) => named(class_name(class)),
            ExportDefaultDeclarationKind::TSInterfaceDeclaration(interface) => {
                named(interface.id.name.to_string())
            }
            ExportDefaultDeclarationKind::Identifier(ident) => named(ident.name.to_string()),
            _ => named(""),
        }
    }

    fn function_signature(&self, function: &Function<'_>) -> Signature {
        let name = function
            .id
            .as_ref()
            .map(|id| id.name.to_string())
            .unwrap_or_default();

        let mut params = Vec::with_capacity(function.params.items.len());
        for param in function.params.items.iter() {
            match self.param_item(&param.pattern) {
                Ok(item) => params.push(item),
                Err(reason) => return Signature::Skipped { name, reason },
            }
        }
        if let Some(rest) = &function.params.rest {
            match self.param_item(&rest.argument) {
                Ok(item) => params.push(item),
                Err(reason) => return Signature::Skipped { name, reason },
            }
        }

        let returns = function
            .return_type
            .as_deref()
            .map(|annotation| ParamItem::default().with_type(self.type_text(annotation)));

        Signature::Extracted(DocSeed {
            name: Some(name),
            params,
            returns,
        })
    }

    fn param_item(&self, pattern: &BindingPattern<'_>) -> Result<ParamItem, String> {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => Ok(ParamItem {
                name: ident.name.to_string(),
                types: self.annotation(pattern.type_annotation.as_deref()),
                optional: pattern.optional,
                ..ParamItem::default()
            }),
            BindingPatternKind::AssignmentPattern(assignment) => {
                let BindingPatternKind::BindingIdentifier(ident) = &assignment.left.kind else {
                    return Err(format!(
                        "destructured parameter `{}`",
                        self.slice(assignment.left.span())
                    ));
                };
                let annotation = pattern
                    .type_annotation
                    .as_deref()
                    .or(assignment.left.type_annotation.as_deref());
                Ok(ParamItem {
                    name: ident.name.to_string(),
                    types: self.annotation(annotation),
                    optional: true,
                    default: Some(self.slice(assignment.right.span()).to_string()),
                    desc: None,
                })
            }
            BindingPatternKind::ObjectPattern(object) => Err(format!(
                "destructured parameter `{}`",
                self.slice(object.span)
            )),
            BindingPatternKind::ArrayPattern(array) => Err(format!(
                "destructured parameter `{}`",
                self.slice(array.span)
            )),
        }
    }

    fn annotation(&self, annotation: Option<&TSTypeAnnotation<'_>>) -> Vec<String> {
        annotation
            .map(|annotation| vec![self.type_text(annotation)])
            .unwrap_or_default()
    }

    /// Annotation text without the leading colon.
    fn type_text(&self, annotation: &TSTypeAnnotation<'_>) -> String {
        self.slice(annotation.type_annotation.span()).to_string()
    }

    fn slice(&self, span: Span) -> &'s str {
        span.source_text(self.source)
    }
}

fn variable_signature(variable: &VariableDeclaration<'_>) -> Signature {
    if variable.declarations.len() != 1 {
        return named("");
    }
    let name = variable
        .declarations
        .first()
        .and_then(|declarator| match &declarator.id.kind {
            BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
            _ => None,
        })
        .unwrap_or_default();
    named(name)
}

fn class_name(class: &Class<'_>) -> String {
    class
        .id
        .as_ref()
        .map(|id| id.name.to_string())
        .unwrap_or_default()
}
