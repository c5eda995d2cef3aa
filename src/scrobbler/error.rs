//! Typed failures for scrobbler log parsing

use super::parser::ParserState;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the three header lines an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLine {
    Version,
    Timezone,
    Client,
}

impl HeaderLine {
    /// 1-based line number of this header line
    pub fn line_number(&self) -> usize {
        match self {
            HeaderLine::Version => 1,
            HeaderLine::Timezone => 2,
            HeaderLine::Client => 3,
        }
    }

    /// Literal prefix the line must start with
    pub fn prefix(&self) -> &'static str {
        match self {
            HeaderLine::Version => "#AUDIOSCROBBLER/",
            HeaderLine::Timezone => "#TZ/",
            HeaderLine::Client => "#CLIENT/",
        }
    }
}

impl fmt::Display for HeaderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HeaderLine::Version => "version",
            HeaderLine::Timezone => "timezone",
            HeaderLine::Client => "client",
        };
        f.write_str(name)
    }
}

/// Any failure while opening, reading or validating a scrobbler log
///
/// Every variant is fatal to the parse that produced it; no records are
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("scrobbler log {path:?} can not be opened for reading")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line} of scrobbler log is not valid UTF-8")]
    InvalidEncoding {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to read line {line} of scrobbler log")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("{header} header (line {}) does not exist in log file", .header.line_number())]
    MissingHeaderLine { header: HeaderLine },

    #[error("malformed {header} header {value:?}, expected `{}...`", .header.prefix())]
    MalformedHeader { header: HeaderLine, value: String },

    #[error("log format version `{version}` is not in list of known versions, must be one of: {supported}")]
    UnsupportedVersion { version: String, supported: String },

    #[error("the log file does not specify a timezone, one must be supplied before parsing")]
    TimezoneRequired,

    #[error("the timezone `{name}` is not recognised")]
    UnknownTimezone { name: String },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: LineError,
    },

    #[error("the log file contains no track information")]
    EmptyLog,

    #[error("cannot {operation} while the parser is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: ParserState,
    },
}

impl ParseError {
    /// 1-based line number the error refers to, where there is one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Read { line, .. }
            | ParseError::InvalidEncoding { line, .. }
            | ParseError::Line { line, .. } => Some(*line),
            ParseError::MissingHeaderLine { header } | ParseError::MalformedHeader { header, .. } => {
                Some(header.line_number())
            }
            ParseError::UnsupportedVersion { .. } => Some(HeaderLine::Version.line_number()),
            _ => None,
        }
    }
}

/// Validation failure for a single track line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("expected {expected} tab-separated fields, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("entry must contain an artist name")]
    MissingArtist,

    #[error("entry must contain a track name")]
    MissingTrack,

    #[error("entry must contain the track duration")]
    MissingDuration,

    #[error("track duration {value:?} is not a whole number of seconds")]
    InvalidDuration { value: String },

    #[error("skip flag must be `S` or `L`, found {value:?}")]
    InvalidSkipFlag { value: String },

    #[error("start time {value:?} is missing or not a Unix timestamp")]
    MissingOrInvalidTimestamp { value: String },
}
