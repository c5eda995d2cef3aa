use serde::Serialize;
use std::fmt;

/// Log format version declared on the first header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogVersion {
    /// `#AUDIOSCROBBLER/1.0` - seven fields per track line
    #[serde(rename = "1.0")]
    V1_0,

    /// `#AUDIOSCROBBLER/1.1` - adds a trailing MusicBrainz track ID field
    #[serde(rename = "1.1")]
    V1_1,
}

impl LogVersion {
    /// Every version this crate knows how to read
    pub const SUPPORTED: [LogVersion; 2] = [LogVersion::V1_0, LogVersion::V1_1];

    /// Look up a version by its header token (e.g. "1.1")
    pub fn from_token(token: &str) -> Option<Self> {
        Self::SUPPORTED.into_iter().find(|v| v.as_str() == token)
    }

    /// Header token for this version
    pub fn as_str(&self) -> &'static str {
        match self {
            LogVersion::V1_0 => "1.0",
            LogVersion::V1_1 => "1.1",
        }
    }

    /// Exact number of tab-separated fields on a track line
    pub fn field_count(&self) -> usize {
        match self {
            LogVersion::V1_0 => 7,
            LogVersion::V1_1 => 8,
        }
    }

    /// Whether track lines carry a MusicBrainz ID as their last field
    pub fn has_musicbrainz_id(&self) -> bool {
        matches!(self, LogVersion::V1_1)
    }

    /// Comma-separated list of supported tokens, for diagnostics
    pub fn supported_list() -> String {
        Self::SUPPORTED
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for LogVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timezone declared on the second header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeclaredTimezone {
    /// `#TZ/UNKNOWN` - device clock zone must be supplied by the caller
    Unknown,

    /// `#TZ/UTC` - timestamps are UTC, caller overrides are ignored
    Utc,
}

impl DeclaredTimezone {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "UNKNOWN" => Some(DeclaredTimezone::Unknown),
            "UTC" => Some(DeclaredTimezone::Utc),
            _ => None,
        }
    }
}

/// The three header lines of a scrobbler log
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogHeader {
    /// Format version (controls field count and MusicBrainz ID handling)
    pub version: LogVersion,

    /// Declared timezone
    pub timezone: DeclaredTimezone,

    /// Name of the client that wrote the log (may be empty)
    pub client: String,
}

impl LogHeader {
    /// True when the log itself fixes the timezone
    pub fn timezone_known(&self) -> bool {
        self.timezone == DeclaredTimezone::Utc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_tokens() {
        assert_eq!(LogVersion::from_token("1.0"), Some(LogVersion::V1_0));
        assert_eq!(LogVersion::from_token("1.1"), Some(LogVersion::V1_1));
        assert_eq!(LogVersion::from_token("2.0"), None);
        assert_eq!(LogVersion::supported_list(), "1.0, 1.1");
    }

    #[test]
    fn test_version_rules() {
        assert_eq!(LogVersion::V1_0.field_count(), 7);
        assert_eq!(LogVersion::V1_1.field_count(), 8);
        assert!(!LogVersion::V1_0.has_musicbrainz_id());
        assert!(LogVersion::V1_1.has_musicbrainz_id());
    }

    #[test]
    fn test_timezone_known() {
        let header = LogHeader {
            version: LogVersion::V1_0,
            timezone: DeclaredTimezone::Unknown,
            client: String::new(),
        };
        assert!(!header.timezone_known());
        assert_eq!(DeclaredTimezone::from_token("UTC"), Some(DeclaredTimezone::Utc));
        assert_eq!(DeclaredTimezone::from_token("utc"), None);
    }
}
