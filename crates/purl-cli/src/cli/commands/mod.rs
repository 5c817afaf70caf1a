//! CLI command handlers, one file per command.
//!
//! Each handler prints a human-readable summary to stdout and returns the
//! process exit code.

mod check;
mod completions;
mod import;
mod readme;
mod sync;
mod utm;
mod verify;

pub use check::run_check;
pub use completions::{run_completions, run_man};
pub use import::run_import;
pub use readme::run_readme;
pub use sync::run_sync;
pub use utm::run_utm;
pub use verify::run_verify;
