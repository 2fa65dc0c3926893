pub mod historical;

use crate::model::ElectionError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("Election error: {0}")]
    Election(#[from] ElectionError),
}

pub type Result<T> = std::result::Result<T, FormatError>;
