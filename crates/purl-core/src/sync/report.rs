//! Structured result of one synchronizer pass.

use std::fmt;

use crate::storage::WriteOutcome;

/// What happened to a single table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Page written or confirmed; `assigned` is true when the name was generated in this pass.
    Written {
        file_name: String,
        outcome: WriteOutcome,
        assigned: bool,
    },
    /// The row has no URL; nothing was touched.
    SkippedNoUrl,
    /// The (normalized) file name was already used by an earlier row.
    SkippedDuplicateName { file_name: String },
    /// The file name would resolve outside the output directory.
    SkippedInvalidName { file_name: String },
    /// Writing the page failed; the remaining rows were still processed.
    Failed { file_name: String, error: String },
}

/// Per-row entry of a `SyncReport`. `row` is the 0-based data row index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub row: usize,
    pub url: String,
    pub outcome: RowOutcome,
}

/// Whether the redirect table itself was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableUpdate {
    /// No names were assigned, so the table was left as is.
    #[default]
    Untouched,
    /// The table was rewritten with this many newly assigned names.
    Rewritten { assigned: usize },
    /// Names were assigned but saving the table failed.
    Failed { assigned: usize, error: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub rows: Vec<RowReport>,
    pub table: TableUpdate,
}

impl SyncReport {
    fn count_written(&self, want: WriteOutcome) -> usize {
        self.rows
            .iter()
            .filter(|r| {
                matches!(&r.outcome, RowOutcome::Written { outcome, .. } if *outcome == want)
            })
            .count()
    }

    fn count(&self, pred: impl Fn(&RowOutcome) -> bool) -> usize {
        self.rows.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn created(&self) -> usize {
        self.count_written(WriteOutcome::Created)
    }

    pub fn updated(&self) -> usize {
        self.count_written(WriteOutcome::Updated)
    }

    pub fn unchanged(&self) -> usize {
        self.count_written(WriteOutcome::Unchanged)
    }

    pub fn skipped_no_url(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::SkippedNoUrl))
    }

    pub fn skipped_duplicate(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::SkippedDuplicateName { .. }))
    }

    pub fn skipped_invalid(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::SkippedInvalidName { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, RowOutcome::Failed { .. }))
    }

    /// Names generated in this pass, in row order.
    pub fn assigned(&self) -> impl Iterator<Item = (usize, &str)> {
        self.rows.iter().filter_map(|r| match &r.outcome {
            RowOutcome::Written {
                file_name,
                assigned: true,
                ..
            } => Some((r.row, file_name.as_str())),
            _ => None,
        })
    }

    /// True when nothing on disk was created or replaced.
    pub fn is_noop(&self) -> bool {
        self.created() == 0 && self.updated() == 0 && self.table == TableUpdate::Untouched
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Created files: {}", self.created())?;
        writeln!(f, "  Updated files: {}", self.updated())?;
        writeln!(f, "  Unchanged:     {}", self.unchanged())?;
        writeln!(f, "  Skipped (no URL):           {}", self.skipped_no_url())?;
        writeln!(f, "  Skipped (duplicate name):   {}", self.skipped_duplicate())?;
        writeln!(f, "  Skipped (invalid name):     {}", self.skipped_invalid())?;
        write!(f, "  Failed writes:              {}", self.failed())?;
        match &self.table {
            TableUpdate::Untouched => Ok(()),
            TableUpdate::Rewritten { assigned } => {
                write!(f, "\n  Table updated with {assigned} new file name(s)")
            }
            TableUpdate::Failed { assigned, error } => write!(
                f,
                "\n  Table NOT updated ({assigned} new file name(s) lost): {error}"
            ),
        }
    }
}
