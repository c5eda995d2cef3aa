//! Parse configuration

use super::error::ParseError;
use chrono_tz::Tz;

/// How the raw start-time field of a track line is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampMode {
    /// Seconds since the epoch as read off the device's wall clock in the
    /// effective timezone, converted to UTC
    #[default]
    WallClock,

    /// A true UTC Unix timestamp, used as-is
    Epoch,
}

/// What to do with a duration field that is not a plain number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationPolicy {
    /// Keep the leading digits (or 0 if there are none)
    #[default]
    Coerce,

    /// Reject the line with `InvalidDuration`
    Strict,
}

/// Configuration for a single parse
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Device clock timezone, used only when the log header says `#TZ/UNKNOWN`
    pub timezone: Option<Tz>,

    pub timestamp_mode: TimestampMode,

    pub duration_policy: DurationPolicy,
}

impl ParseOptions {
    /// Default options: no timezone override, wall-clock timestamps, coerced durations
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timezone override
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = Some(timezone);
        self
    }

    /// Set the timezone override from an IANA name such as `Europe/London`
    pub fn with_timezone_name(self, name: &str) -> Result<Self, ParseError> {
        Ok(self.with_timezone(lookup_timezone(name)?))
    }

    pub fn with_timestamp_mode(mut self, mode: TimestampMode) -> Self {
        self.timestamp_mode = mode;
        self
    }

    pub fn with_duration_policy(mut self, policy: DurationPolicy) -> Self {
        self.duration_policy = policy;
        self
    }
}

/// Resolve an IANA timezone name against the bundled tz database
pub fn lookup_timezone(name: &str) -> Result<Tz, ParseError> {
    name.parse::<Tz>().map_err(|_| ParseError::UnknownTimezone {
        name: name.to_string(),
    })
}
