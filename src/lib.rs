pub mod config;
pub mod error;
pub mod logging;
pub mod parser;
pub mod analyzer {
    pub mod entrypoint;
    pub mod extract;
    pub mod manifest;
    pub mod matcher;
    pub mod walk;
}

// Re-export selected API for consumers
pub use analyzer::manifest::{analyze, Manifest, WatchSet};
pub use config::AnalyzeOptions;
pub use error::AnalyzeError;
pub use parser::{parse_file, parse_source, ParseError, SourceFile};
