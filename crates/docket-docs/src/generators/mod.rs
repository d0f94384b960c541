//! Output generators for aggregated module documentation.

pub mod markdown;

pub use markdown::{MarkdownRenderer, RenderedModule};
