//! `.scrobbler.log` parsing
//!
//! Reads the Audioscrobbler portable player log written by Rockbox and
//! similar players: a three-line header followed by one tab-separated
//! line per played or skipped track.

mod config;
mod error;
mod header;
mod parser;
mod time;
mod track_line;

pub use config::{lookup_timezone, DurationPolicy, ParseOptions, TimestampMode};
pub use error::{HeaderLine, LineError, ParseError};
pub use header::parse_header;
pub use parser::{Parser, ParserState};
pub use time::TimeResolver;
pub use track_line::TrackLineParser;

use crate::model::ScrobbleLog;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open a log file for parsing with the given options
pub fn open_log(path: &Path, options: &ParseOptions) -> Result<Parser<BufReader<File>>, ParseError> {
    let file = File::open(path).map_err(|source| ParseError::ResourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Parser::with_options(BufReader::new(file), options.clone()))
}

/// Parse a complete scrobbler log file
///
/// # Arguments
/// * `path` - Path to the log (typically `.scrobbler.log` in the player's root)
/// * `options` - Timezone override and lenient-parse settings
pub fn parse_log_file(path: &Path, options: &ParseOptions) -> Result<ScrobbleLog, ParseError> {
    log::info!("Parsing scrobbler log from {:?}", path);
    let parser = open_log(path, options)?;
    finish(parser)
}

/// Parse a complete scrobbler log from any buffered reader
pub fn parse_log_reader<R: BufRead>(reader: R, options: &ParseOptions) -> Result<ScrobbleLog, ParseError> {
    finish(Parser::with_options(reader, options.clone()))
}

fn finish<R: BufRead>(parser: Parser<R>) -> Result<ScrobbleLog, ParseError> {
    let log = parser.parse_log()?;

    log::info!(
        "Loaded scrobbler log: {} tracks from {:?} (format {}, timezone {})",
        log.len(),
        log.client(),
        log.version(),
        log.timezone
    );

    Ok(log)
}
