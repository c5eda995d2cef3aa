//! Data model for parsed scrobbler logs
//!
//! These structures are independent of the on-disk log format;
//! the `scrobbler` module produces them.

mod header;
mod play;
mod scrobble_log;
mod stats;

pub use header::{DeclaredTimezone, LogHeader, LogVersion};
pub use play::PlayRecord;
pub use scrobble_log::ScrobbleLog;
pub use stats::ParseStats;
