//! Parser façade for documentation extraction.
//!
//! Wraps `oxc_parser` with the settings a documentation pass needs: every
//! JavaScript/TypeScript dialect the extension allows, module/script auto
//! detection, and a program whose comments keep their spans so annotation
//! text can be sliced straight out of the source.
//!
//! ```rust
//! use docket_parser::{parse, ParseOptions};
//! use oxc_allocator::Allocator;
//!
//! let allocator = Allocator::default();
//! let source = "/** Adds. */\nexport function add(a: number) { return a; }";
//! let parsed = parse(&allocator, source, ParseOptions::from_path("math.ts"))?;
//! assert_eq!(parsed.ast().comments.len(), 1);
//! # Ok::<(), docket_parser::ParseError>(())
//! ```

pub mod error;
pub mod parser;

pub use error::{ParseError, Result};
pub use parser::{parse, ParseDiagnostic, ParseOptions, ParsedProgram};
