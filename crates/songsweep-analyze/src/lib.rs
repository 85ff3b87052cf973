//! Resolution of duplicate groups for songsweep.
//!
//! Given the groups produced by `songsweep-scan`, decides which copy of each
//! song to keep:
//!
//! 1. Files carrying any quality tag (`_eg`, `_hq`, ...) win
//! 2. Then the container format: FLAC > WAV > M4A > MP3 > everything else
//! 3. Then the larger file
//!
//! Exact ties keep discovery order, so the outcome is deterministic for a
//! given group.
//!
//! ```rust,ignore
//! use songsweep_analyze::{DuplicateReport, PriorityResolver};
//!
//! let decisions = PriorityResolver::new().resolve_all(groups);
//! let report = DuplicateReport::from_decisions(&decisions);
//! println!("{} files to remove", report.files_to_remove);
//! ```

mod resolver;
mod summary;

pub use resolver::{PriorityKey, PriorityResolver, ResolutionDecision, format_rank};
pub use summary::DuplicateReport;

// Re-export core types
pub use songsweep_core::{DuplicateGroup, SongFile, SongKey};
