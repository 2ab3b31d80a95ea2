use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

/// Every failure is fatal for the run: nothing is retried and no partial
/// manifest is produced.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("wrong number of args; usage is:\n  {program} file_name.go")]
    Usage { program: String },

    #[error("could not read \"{}\"", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not walk \"{}\"", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("could not parse Go file \"{}\"", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("no exported function found in \"{}\"", path.display())]
    NoHandlerFound { path: PathBuf },
}

pub type Result<T, E = AnalyzeError> = std::result::Result<T, E>;
