//! Fatal redirect table errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("redirect table not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("redirect table {} has no header row", .0.display())]
    MissingHeader(PathBuf),

    #[error("failed to read redirect table {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse redirect table {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to encode redirect table")]
    Encode(#[source] csv::Error),
}
