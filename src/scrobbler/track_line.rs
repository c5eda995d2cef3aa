//! Track line parsing
//!
//! Each body line is a tab-separated record:
//!
//! ```text
//! artist  album  track  position  duration  S|L  timestamp  [musicbrainz id]
//! ```
//!
//! The MusicBrainz ID column only exists in format 1.1.

use super::config::DurationPolicy;
use super::error::LineError;
use super::time::TimeResolver;
use crate::model::{LogVersion, PlayRecord};

/// Parses body lines for one log, given its version and resolved timezone
#[derive(Debug, Clone, Copy)]
pub struct TrackLineParser {
    version: LogVersion,
    resolver: TimeResolver,
    duration_policy: DurationPolicy,
}

impl TrackLineParser {
    pub fn new(version: LogVersion, resolver: TimeResolver, duration_policy: DurationPolicy) -> Self {
        Self {
            version,
            resolver,
            duration_policy,
        }
    }

    /// Parse one body line into a record
    pub fn parse_line(&self, raw: &str) -> Result<PlayRecord, LineError> {
        let line = raw.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = line.split('\t').collect();

        let expected = self.version.field_count();
        if fields.len() != expected {
            return Err(LineError::FieldCountMismatch {
                expected,
                found: fields.len(),
            });
        }

        // artist name - required
        let artist = non_empty(fields[0]).ok_or(LineError::MissingArtist)?;

        // album name - optional
        let album = non_empty(fields[1]);

        // track name - required
        let track = non_empty(fields[2]).ok_or(LineError::MissingTrack)?;

        // position on album - optional, unparseable values are dropped
        let album_position = parse_position(fields[3]);

        let duration_secs = self.parse_duration(fields[4])?;
        let skipped = parse_skip_flag(fields[5])?;
        let listened_at = self.resolver.resolve(fields[6])?;

        let musicbrainz_id = if self.version.has_musicbrainz_id() {
            non_empty(fields[7].trim_end())
        } else {
            None
        };

        Ok(PlayRecord {
            artist,
            album,
            track,
            album_position,
            duration_secs,
            skipped,
            listened_at,
            musicbrainz_id,
        })
    }

    fn parse_duration(&self, value: &str) -> Result<u32, LineError> {
        if value.is_empty() {
            return Err(LineError::MissingDuration);
        }

        let trimmed = value.trim_matches(|c: char| c.is_ascii_whitespace());
        if let Ok(secs) = trimmed.parse::<u32>() {
            return Ok(secs);
        }

        match self.duration_policy {
            DurationPolicy::Strict => Err(LineError::InvalidDuration {
                value: value.to_string(),
            }),
            DurationPolicy::Coerce => {
                let digits_end = trimmed
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(trimmed.len());
                let digits = &trimmed[..digits_end];
                let secs = if digits.is_empty() {
                    0
                } else {
                    digits.parse().unwrap_or(u32::MAX)
                };
                log::warn!("Coerced track duration {:?} to {} seconds", value, secs);
                Ok(secs)
            }
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_position(value: &str) -> Option<u32> {
    if value.is_empty() {
        return None;
    }

    let trimmed = value.trim_matches(|c: char| c.is_ascii_whitespace());
    let position = trimmed.parse::<u32>().ok().or_else(|| {
        // "3.0" and the like
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0 && *p <= f64::from(u32::MAX))
            .map(|p| p as u32)
    });
    if position.is_none() {
        log::debug!("Ignoring non-numeric album position {:?}", value);
    }
    position
}

fn parse_skip_flag(value: &str) -> Result<bool, LineError> {
    match value {
        "S" => Ok(true),
        "L" => Ok(false),
        _ => Err(LineError::InvalidSkipFlag {
            value: value.to_string(),
        }),
    }
}
