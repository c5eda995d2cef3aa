//! Scrobbler log parser: drives the header and body through validation

use super::config::{lookup_timezone, ParseOptions};
use super::error::ParseError;
use super::header::parse_header;
use super::time::TimeResolver;
use super::track_line::TrackLineParser;
use crate::model::{DeclaredTimezone, LogHeader, LogVersion, ParseStats, PlayRecord, ScrobbleLog};
use chrono_tz::Tz;
use std::io::{self, BufRead};

/// Lifecycle of a [`Parser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Nothing read yet
    Created,
    /// Header read, timezone not yet decided
    HeaderParsed,
    /// Header read and an effective timezone is known
    TimezoneResolved,
    /// Header says `#TZ/UNKNOWN` and no override has been supplied
    AwaitingTimezone,
    /// Reading body lines
    Parsing,
    /// All lines parsed successfully
    Done,
    /// A header or line error ended the parse
    Failed,
}

/// Single-pass parser over one scrobbler log stream
///
/// The reader is owned by the parser and released when the parser is dropped.
#[derive(Debug)]
pub struct Parser<R> {
    reader: R,
    options: ParseOptions,
    state: ParserState,
    header: Option<LogHeader>,
    timezone: Option<Tz>,
    stats: Option<ParseStats>,
    line_number: usize,
}

impl<R: BufRead> Parser<R> {
    /// Create a parser with default options
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParseOptions::default())
    }

    pub fn with_options(reader: R, options: ParseOptions) -> Self {
        Self {
            reader,
            options,
            state: ParserState::Created,
            header: None,
            timezone: None,
            stats: None,
            line_number: 0,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Supply the device timezone by IANA name (e.g. `Europe/Berlin`)
    ///
    /// Only used if the header declares `#TZ/UNKNOWN`; a `#TZ/UTC` header wins.
    pub fn set_timezone(&mut self, name: &str) -> Result<&mut Self, ParseError> {
        let timezone = lookup_timezone(name)?;
        self.set_tz(timezone)
    }

    /// Supply the device timezone
    pub fn set_tz(&mut self, timezone: Tz) -> Result<&mut Self, ParseError> {
        match self.state {
            ParserState::Created
            | ParserState::HeaderParsed
            | ParserState::TimezoneResolved
            | ParserState::AwaitingTimezone => {}
            state => {
                return Err(ParseError::InvalidState {
                    operation: "set the timezone",
                    state,
                })
            }
        }

        self.options.timezone = Some(timezone);
        if self.header.is_some() {
            self.resolve_timezone();
        }
        Ok(self)
    }

    /// Read and validate the three header lines
    ///
    /// Returns the already-parsed header on later calls.
    pub fn read_header(&mut self) -> Result<&LogHeader, ParseError> {
        if self.state == ParserState::Created {
            match self.parse_header_lines() {
                Ok(header) => {
                    log::debug!(
                        "Log header: version {}, timezone {:?}, client {:?}",
                        header.version,
                        header.timezone,
                        header.client
                    );
                    self.header = Some(header);
                    self.state = ParserState::HeaderParsed;
                    self.resolve_timezone();
                }
                Err(e) => {
                    self.state = ParserState::Failed;
                    return Err(e);
                }
            }
        }

        self.header.as_ref().ok_or(ParseError::InvalidState {
            operation: "read the header",
            state: self.state,
        })
    }

    /// Parse every remaining line, returning records in file order
    ///
    /// Fails with `TimezoneRequired` without reading any body line if the
    /// header declares `#TZ/UNKNOWN` and no timezone was supplied; the parser
    /// stays in `AwaitingTimezone` so a zone can be set and `parse` retried.
    pub fn parse(&mut self) -> Result<Vec<PlayRecord>, ParseError> {
        match self.state {
            ParserState::Created => {
                self.read_header()?;
            }
            ParserState::HeaderParsed | ParserState::TimezoneResolved | ParserState::AwaitingTimezone => {}
            state => {
                return Err(ParseError::InvalidState {
                    operation: "parse",
                    state,
                })
            }
        }

        let timezone = self.timezone.ok_or(ParseError::TimezoneRequired)?;
        let version = match &self.header {
            Some(header) => header.version,
            None => {
                return Err(ParseError::InvalidState {
                    operation: "parse",
                    state: self.state,
                })
            }
        };

        self.state = ParserState::Parsing;
        match self.parse_body(version, timezone) {
            Ok((records, stats)) => {
                log::info!(
                    "Parsed {} tracks ({} played, {} skipped, {}s total)",
                    stats.total_tracks,
                    stats.played,
                    stats.skipped,
                    stats.total_duration_secs
                );
                self.stats = Some(stats);
                self.state = ParserState::Done;
                Ok(records)
            }
            Err(e) => {
                self.state = ParserState::Failed;
                Err(e)
            }
        }
    }

    /// Parse the whole stream into a [`ScrobbleLog`]
    pub fn parse_log(mut self) -> Result<ScrobbleLog, ParseError> {
        let records = self.parse()?;

        match (self.header, self.timezone, self.stats) {
            (Some(header), Some(timezone), Some(stats)) => Ok(ScrobbleLog::new(header, timezone, records, stats)),
            _ => Err(ParseError::InvalidState {
                operation: "build the log",
                state: self.state,
            }),
        }
    }

    /// Header as read so far (available once the header is parsed)
    pub fn header(&self) -> Option<&LogHeader> {
        self.header.as_ref()
    }

    /// Client name; only available once parsing is done
    pub fn client(&self) -> Option<&str> {
        self.finished_header().map(|h| h.client.as_str())
    }

    /// Log format version; only available once parsing is done
    pub fn version(&self) -> Option<LogVersion> {
        self.finished_header().map(|h| h.version)
    }

    /// Totals over the parsed records; only available once parsing is done
    pub fn stats(&self) -> Option<&ParseStats> {
        self.stats.as_ref()
    }

    /// Effective timezone, once known
    pub fn timezone(&self) -> Option<Tz> {
        self.timezone
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    fn finished_header(&self) -> Option<&LogHeader> {
        match self.state {
            ParserState::Done => self.header.as_ref(),
            _ => None,
        }
    }

    fn parse_header_lines(&mut self) -> Result<LogHeader, ParseError> {
        let version = self.next_line()?;
        let timezone = self.next_line()?;
        let client = self.next_line()?;

        parse_header(version.as_deref(), timezone.as_deref(), client.as_deref())
    }

    /// The header's own `#TZ/UTC` wins over any caller-supplied zone
    fn resolve_timezone(&mut self) {
        let Some(header) = &self.header else {
            return;
        };

        self.timezone = match header.timezone {
            DeclaredTimezone::Utc => Some(Tz::UTC),
            DeclaredTimezone::Unknown => self.options.timezone,
        };

        self.state = match self.timezone {
            Some(timezone) => {
                log::debug!("Resolving listen times against {}", timezone);
                ParserState::TimezoneResolved
            }
            None => ParserState::AwaitingTimezone,
        };
    }

    fn parse_body(&mut self, version: LogVersion, timezone: Tz) -> Result<(Vec<PlayRecord>, ParseStats), ParseError> {
        let lines = TrackLineParser::new(
            version,
            TimeResolver::new(timezone, self.options.timestamp_mode),
            self.options.duration_policy,
        );

        let mut records = Vec::new();
        let mut stats = ParseStats::new();

        while let Some(raw) = self.next_line()? {
            let record = lines.parse_line(&raw).map_err(|source| ParseError::Line {
                line: self.line_number,
                source,
            })?;

            stats.record(&record);
            records.push(record);
        }

        if records.is_empty() {
            return Err(ParseError::EmptyLog);
        }

        Ok((records, stats))
    }

    /// Next line without its terminator, or `None` at end of stream
    fn next_line(&mut self) -> Result<Option<String>, ParseError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|source| {
            let line = self.line_number + 1;
            match source.kind() {
                io::ErrorKind::InvalidData => ParseError::InvalidEncoding { line, source },
                _ => ParseError::Read { line, source },
            }
        })?;

        if read == 0 {
            return Ok(None);
        }

        self.line_number += 1;
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}
