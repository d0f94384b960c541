//! Parser façade for reading JavaScript/TypeScript source
//!
//! Every node of the returned program carries a span into the original text and
//! `Program::comments` keeps each comment with its attachment offset, which is all
//! the documentation binder needs.

use crate::error::{ParseError, Result};
use oxc_allocator::Allocator;
use oxc_parser::{ParseOptions as OxcParseOptions, Parser};
use oxc_span::SourceType;

/// Parse options for reading source code
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Source type (JavaScript, TypeScript, JSX, TSX)
    pub source_type: SourceType,
    /// Allow parsing errors (returns partial AST)
    pub allow_errors: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::jsx().with_unambiguous(true),
            allow_errors: false,
        }
    }
}

impl ParseOptions {
    /// Create parse options from file path (auto-detects source type)
    ///
    /// Plain `.js` files keep JSX enabled, and the module kind is always left for
    /// the parser to infer from the presence of `import`/`export`.
    pub fn from_path(path: &str) -> Self {
        let source_type = SourceType::from_path(path)
            .map(|ty| if ty.is_typescript() { ty } else { ty.with_jsx(true) })
            .unwrap_or_else(|_| SourceType::jsx());
        Self {
            source_type: source_type.with_unambiguous(true),
            allow_errors: false,
        }
    }

    /// Keep the partial AST even when the parser reports errors
    pub fn allow_errors(mut self, allow: bool) -> Self {
        self.allow_errors = allow;
        self
    }
}

/// Parse diagnostic information
#[derive(Debug, Clone)]
pub struct ParseDiagnostic {
    /// Error message
    pub message: String,
}

/// Parsed program with AST and metadata
pub struct ParsedProgram<'a> {
    /// The parsed AST program
    pub program: oxc_ast::ast::Program<'a>,
    /// Parse diagnostics (errors/warnings)
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Original source text
    pub source_text: &'a str,
}

impl<'a> ParsedProgram<'a> {
    /// Get the program AST
    pub fn ast(&self) -> &oxc_ast::ast::Program<'a> {
        &self.program
    }

    /// Check if parsing had errors
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Slice the original text covered by `span`
    pub fn slice(&self, span: oxc_span::Span) -> &'a str {
        span.source_text(self.source_text)
    }
}

/// Parse source code into an AST
///
/// # Arguments
///
/// * `allocator` - Allocator for AST nodes (must outlive the returned program)
/// * `source` - Source code to parse
/// * `options` - Parse options
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when the parser reports errors and
/// `options.allow_errors` is false, and [`ParseError::Aborted`] when the parser
/// panicked and produced no usable program.
pub fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: ParseOptions,
) -> Result<ParsedProgram<'a>> {
    let parser_options = OxcParseOptions {
        allow_return_outside_function: true,
        ..OxcParseOptions::default()
    };
    let result = Parser::new(allocator, source, options.source_type)
        .with_options(parser_options)
        .parse();

    let diagnostics: Vec<ParseDiagnostic> = result
        .errors
        .iter()
        .map(|err| ParseDiagnostic {
            message: err.to_string(),
        })
        .collect();

    if result.panicked {
        return Err(ParseError::Aborted {
            reason: diagnostics.first().map(|d| d.message.clone()),
        });
    }

    if !options.allow_errors && !diagnostics.is_empty() {
        return Err(ParseError::syntax(
            diagnostics.into_iter().map(|d| d.message).collect(),
        ));
    }

    Ok(ParsedProgram {
        program: result.program,
        diagnostics,
        source_text: source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_typescript_from_extension() {
        assert!(ParseOptions::from_path("src/a.ts").source_type.is_typescript());
        assert!(ParseOptions::from_path("src/a.tsx").source_type.is_jsx());
        assert!(!ParseOptions::from_path("src/a.js").source_type.is_typescript());
    }

    #[test]
    fn plain_js_accepts_jsx() {
        let allocator = Allocator::default();
        let source = "export const App = () => <div className=\"x\" />;";
        let parsed = parse(&allocator, source, ParseOptions::from_path("App.js"));
        assert!(parsed.is_ok());
    }

    #[test]
    fn script_and_module_are_detected() {
        let allocator = Allocator::default();
        let script = "var a = 1; module.exports = a;";
        assert!(parse(&allocator, script, ParseOptions::from_path("a.js")).is_ok());

        let allocator = Allocator::default();
        let module = "import x from 'x';\nexport default x;";
        assert!(parse(&allocator, module, ParseOptions::from_path("b.js")).is_ok());
    }
}
