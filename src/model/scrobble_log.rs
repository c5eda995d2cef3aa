use super::{LogHeader, LogVersion, ParseStats, PlayRecord};
use chrono_tz::Tz;
use serde::Serialize;

/// A fully parsed scrobbler log: header, records in file order, and totals
#[derive(Debug, Clone, Serialize)]
pub struct ScrobbleLog {
    /// Header metadata
    pub header: LogHeader,

    /// Timezone the listen times were resolved against
    pub timezone: Tz,

    /// Records in file order
    records: Vec<PlayRecord>,

    /// Totals over `records`
    stats: ParseStats,
}

impl ScrobbleLog {
    pub fn new(header: LogHeader, timezone: Tz, records: Vec<PlayRecord>, stats: ParseStats) -> Self {
        Self {
            header,
            timezone,
            records,
            stats,
        }
    }

    /// Name of the client that wrote the log
    pub fn client(&self) -> &str {
        &self.header.client
    }

    /// Log format version
    pub fn version(&self) -> LogVersion {
        self.header.version
    }

    /// All records, in file order
    pub fn records(&self) -> &[PlayRecord] {
        &self.records
    }

    /// Take ownership of the records
    pub fn into_records(self) -> Vec<PlayRecord> {
        self.records
    }

    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Records the listener let play through
    pub fn played(&self) -> impl Iterator<Item = &PlayRecord> {
        self.records.iter().filter(|r| r.played())
    }

    /// Records that were skipped
    pub fn skipped(&self) -> impl Iterator<Item = &PlayRecord> {
        self.records.iter().filter(|r| r.skipped)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
