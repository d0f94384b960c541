pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod locale;

// Re-export main types
pub use config::*;
pub use error::*;
pub use locale::*;

pub use discovery::ConfigDiscovery;
pub use filter::SourceFilter;
