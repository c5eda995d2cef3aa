//! Scrobbler Log - `.scrobbler.log` reader
//!
//! This library parses the Audioscrobbler portable player log format
//! into play records with UTC listen times and summary statistics.

pub mod model;
pub mod scrobbler;

pub use model::{LogHeader, LogVersion, ParseStats, PlayRecord, ScrobbleLog};
pub use scrobbler::{parse_log_file, parse_log_reader, ParseError, ParseOptions, Parser};
