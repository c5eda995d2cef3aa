//! Conversion of raw track start times to UTC instants

use super::config::TimestampMode;
use super::error::LineError;
use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolves the start-time field of a track line against the effective timezone
#[derive(Debug, Clone, Copy)]
pub struct TimeResolver {
    timezone: Tz,
    mode: TimestampMode,
}

impl TimeResolver {
    pub fn new(timezone: Tz, mode: TimestampMode) -> Self {
        Self { timezone, mode }
    }

    /// Parse `raw` as whole seconds since the epoch and normalize to UTC
    pub fn resolve(&self, raw: &str) -> Result<DateTime<Utc>, LineError> {
        let invalid = || LineError::MissingOrInvalidTimestamp {
            value: raw.to_string(),
        };

        let secs: i64 = raw.parse().map_err(|_| invalid())?;
        let instant = DateTime::from_timestamp(secs, 0).ok_or_else(invalid)?;

        match self.mode {
            TimestampMode::Epoch => Ok(instant),
            TimestampMode::WallClock => self.wall_clock_to_utc(instant.naive_utc()).ok_or_else(invalid),
        }
    }

    /// Treat `wall` as a local time in the effective timezone
    fn wall_clock_to_utc(&self, wall: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.timezone.from_local_datetime(&wall) {
            LocalResult::Single(local) => Some(local.with_timezone(&Utc)),
            // Repeated hour when clocks go back: take the first occurrence
            LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
            // Skipped hour when clocks go forward: use the offset in force at that instant
            LocalResult::None => {
                let offset = self.timezone.offset_from_utc_datetime(&wall).fix();
                let utc = wall.checked_sub_signed(TimeDelta::seconds(i64::from(offset.local_minus_utc())))?;
                Some(Utc.from_utc_datetime(&utc))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_utc_wall_clock_is_epoch() {
        let resolver = TimeResolver::new(Tz::UTC, TimestampMode::WallClock);
        assert_eq!(resolver.resolve("1000000000").unwrap(), at(1_000_000_000));
    }

    #[test]
    fn test_wall_clock_shifts_by_offset() {
        // 2001-09-09 01:46:40 on a New York wall clock is 05:46:40 UTC (EDT, -4h)
        let resolver = TimeResolver::new(Tz::America__New_York, TimestampMode::WallClock);
        assert_eq!(resolver.resolve("1000000000").unwrap(), at(1_000_000_000 + 4 * 3600));

        // Tokyo is +9h with no DST
        let resolver = TimeResolver::new(Tz::Asia__Tokyo, TimestampMode::WallClock);
        assert_eq!(resolver.resolve("1000000000").unwrap(), at(1_000_000_000 - 9 * 3600));
    }

    #[test]
    fn test_epoch_mode_ignores_timezone() {
        let resolver = TimeResolver::new(Tz::Asia__Tokyo, TimestampMode::Epoch);
        assert_eq!(resolver.resolve("1000000000").unwrap(), at(1_000_000_000));
    }

    #[test]
    fn test_ambiguous_wall_clock_takes_earliest() {
        // 2023-11-05 01:30:00 happens twice in New York; the first is EDT (-4h)
        let wall = NaiveDateTime::parse_from_str("2023-11-05 01:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let raw = wall.and_utc().timestamp().to_string();
        let resolver = TimeResolver::new(Tz::America__New_York, TimestampMode::WallClock);

        let resolved = resolver.resolve(&raw).unwrap();
        assert_eq!(resolved, wall.and_utc() + TimeDelta::hours(4));
    }

    #[test]
    fn test_wall_clock_in_dst_gap_resolves() {
        // 2023-03-12 02:30:00 does not exist in New York
        let wall = NaiveDateTime::parse_from_str("2023-03-12 02:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let raw = wall.and_utc().timestamp().to_string();
        let resolver = TimeResolver::new(Tz::America__New_York, TimestampMode::WallClock);

        let resolved = resolver.resolve(&raw).unwrap();
        // 02:30 UTC on that day is still EST (-5h)
        assert_eq!(resolved, wall.and_utc() + TimeDelta::hours(5));
    }

    #[test]
    fn test_invalid_timestamps() {
        let resolver = TimeResolver::new(Tz::UTC, TimestampMode::WallClock);
        for raw in ["", "abc", "12.5", " 100", "99999999999999999999"] {
            assert_eq!(
                resolver.resolve(raw).unwrap_err(),
                LineError::MissingOrInvalidTimestamp {
                    value: raw.to_string()
                }
            );
        }
    }
}
