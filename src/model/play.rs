use chrono::{DateTime, Utc};
use serde::Serialize;

/// One listening event from a scrobbler log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayRecord {
    /// Artist name (never empty)
    pub artist: String,

    /// Album name, absent when the field was empty
    pub album: Option<String>,

    /// Track title (never empty)
    pub track: String,

    /// Position of the track on its album
    pub album_position: Option<u32>,

    /// Track length in seconds
    pub duration_secs: u32,

    /// `S` in the log: the track was skipped rather than listened to
    pub skipped: bool,

    /// When playback started, normalized to UTC
    pub listened_at: DateTime<Utc>,

    /// MusicBrainz track ID (format 1.1 only)
    pub musicbrainz_id: Option<String>,
}

impl PlayRecord {
    /// `true` if the track was listened to (`L`)
    pub fn played(&self) -> bool {
        !self.skipped
    }
}
