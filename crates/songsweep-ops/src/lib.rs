//! File operations for songsweep.
//!
//! This crate applies resolution decisions to the filesystem, one file at a
//! time on the calling thread:
//!
//! - **Simulate** - nothing is touched, candidates are only counted
//! - **Backup** - candidates are moved into a fresh `<base>_<n>` folder
//! - **Permanent** - candidates are deleted
//!
//! A failure on one file is counted in [`RemovalStats::errors`] and the run
//! moves on. It also hosts the shuffle-prefix utilities and the run report
//! with its JSON and text writers.

mod backup;
mod executor;
mod mode;
mod operation;
mod prefix;
mod report;
mod stats;

pub use backup::{create_backup_folder, move_into};
pub use executor::{RemovalExecutor, RemovalRun};
pub use mode::RemovalMode;
pub use operation::{FileAction, FileOutcome, OperationError};
pub use prefix::{
    PrefixRun, PrefixStats, RenameOutcome, add_shuffle_prefixes, has_shuffle_prefix,
    strip_shuffle_prefix, strip_shuffle_prefixes,
};
pub use report::{
    DecisionEntry, FileEntry, LOG_FILE_PREFIX, RunReport, write_json_log, write_text_log,
};
pub use stats::RemovalStats;
