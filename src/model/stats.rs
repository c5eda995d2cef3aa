use super::PlayRecord;
use serde::Serialize;

/// Running totals over the records of one log
///
/// `total_tracks == played + skipped` holds after every call to [`ParseStats::record`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub total_tracks: usize,
    pub played: usize,
    pub skipped: usize,
    pub total_duration_secs: u64,
}

impl ParseStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one accepted record into the totals
    pub fn record(&mut self, play: &PlayRecord) {
        self.total_tracks += 1;
        if play.skipped {
            self.skipped += 1;
        } else {
            self.played += 1;
        }
        self.total_duration_secs += u64::from(play.duration_secs);
    }

    /// Build totals from a finished sequence of records
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PlayRecord>) -> Self {
        records.into_iter().fold(Self::new(), |mut stats, play| {
            stats.record(play);
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn play(duration_secs: u32, skipped: bool) -> PlayRecord {
        PlayRecord {
            artist: "Artist".to_string(),
            album: None,
            track: "Track".to_string(),
            album_position: None,
            duration_secs,
            skipped,
            listened_at: DateTime::from_timestamp(0, 0).unwrap(),
            musicbrainz_id: None,
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = ParseStats::new();
        assert_eq!(stats.total_tracks, 0);
        assert_eq!(stats.total_duration_secs, 0);
    }

    #[test]
    fn test_record_counts_played_and_skipped() {
        let mut stats = ParseStats::new();
        stats.record(&play(180, false));
        stats.record(&play(200, true));
        stats.record(&play(20, false));

        assert_eq!(stats.total_tracks, 3);
        assert_eq!(stats.played, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.total_tracks, stats.played + stats.skipped);
        assert_eq!(stats.total_duration_secs, 400);
    }

    #[test]
    fn test_from_records_matches_incremental() {
        let plays = vec![play(u32::MAX, false), play(u32::MAX, true)];
        let stats = ParseStats::from_records(&plays);
        assert_eq!(stats.total_duration_secs, 2 * u64::from(u32::MAX));
        assert_eq!(stats.skipped, 1);
    }
}
