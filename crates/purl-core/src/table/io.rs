//! CSV load/save for the redirect table.

use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::{RedirectTable, TableError};
use crate::storage;

impl RedirectTable {
    /// Load the table at `path`. A missing or unparsable file is an error.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TableError::NotFound(path.to_path_buf()))
            }
            Err(source) => {
                return Err(TableError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_csv_str(&text, path)
    }

    /// Load the table at `path`, or start an empty `URL,File` table if it does not exist yet.
    pub fn load_or_init(path: &Path) -> Result<Self, TableError> {
        match Self::load(path) {
            Err(TableError::NotFound(_)) => {
                tracing::info!("no redirect table at {}, starting empty", path.display());
                Ok(Self::new())
            }
            other => other,
        }
    }

    /// Parse CSV text. `origin` is only used in error messages.
    pub fn from_csv_str(text: &str, origin: &Path) -> Result<Self, TableError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let parse_err = |source| TableError::Parse {
            path: origin.to_path_buf(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());
        let headers: Vec<String> = rdr
            .headers()
            .map_err(parse_err)?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(TableError::MissingHeader(origin.to_path_buf()));
        }

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(parse_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self::from_parts(headers, rows))
    }

    /// Encode as UTF-8 CSV with minimal quoting and `\n` line endings.
    pub fn to_csv_bytes(&self) -> Result<Vec<u8>, TableError> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        wtr.write_record(self.headers()).map_err(TableError::Encode)?;
        for row in self.rows() {
            wtr.write_record(row).map_err(TableError::Encode)?;
        }
        wtr.into_inner()
            .map_err(|e| TableError::Encode(csv::Error::from(e.into_error())))
    }

    /// Atomically replace the file at `path` with this table.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_csv_bytes()?;
        storage::replace_atomically(path, &bytes)
            .with_context(|| format!("save redirect table {}", path.display()))
    }
}
