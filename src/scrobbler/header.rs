//! Header parsing: the first three lines of a scrobbler log
//!
//! ```text
//! #AUDIOSCROBBLER/1.1
//! #TZ/UNKNOWN
//! #CLIENT/Rockbox sansae200 $Revision$
//! ```

use super::error::{HeaderLine, ParseError};
use crate::model::{DeclaredTimezone, LogHeader, LogVersion};

/// Parse the three header lines; `None` means the stream ended before that line
pub fn parse_header(
    version_line: Option<&str>,
    timezone_line: Option<&str>,
    client_line: Option<&str>,
) -> Result<LogHeader, ParseError> {
    let version = parse_version(version_line)?;
    let timezone = parse_timezone(timezone_line)?;
    let client = parse_client(client_line)?;

    Ok(LogHeader {
        version,
        timezone,
        client,
    })
}

/// `#AUDIOSCROBBLER/<major>.<minor>`
pub fn parse_version(line: Option<&str>) -> Result<LogVersion, ParseError> {
    let line = line.map(|l| l.trim_start_matches('\u{feff}'));
    let token = header_value(line, HeaderLine::Version)?.trim_end();

    if !is_version_token(token) {
        return Err(ParseError::MalformedHeader {
            header: HeaderLine::Version,
            value: line.unwrap_or_default().to_string(),
        });
    }

    LogVersion::from_token(token).ok_or_else(|| ParseError::UnsupportedVersion {
        version: token.to_string(),
        supported: LogVersion::supported_list(),
    })
}

/// `#TZ/UNKNOWN` or `#TZ/UTC`
pub fn parse_timezone(line: Option<&str>) -> Result<DeclaredTimezone, ParseError> {
    let token = header_value(line, HeaderLine::Timezone)?.trim_end();

    DeclaredTimezone::from_token(token).ok_or_else(|| ParseError::MalformedHeader {
        header: HeaderLine::Timezone,
        value: line.unwrap_or_default().to_string(),
    })
}

/// `#CLIENT/<name>`; the name may be empty
pub fn parse_client(line: Option<&str>) -> Result<String, ParseError> {
    header_value(line, HeaderLine::Client).map(str::to_string)
}

/// Strip the line terminator and the header prefix, returning what follows it
fn header_value(line: Option<&str>, header: HeaderLine) -> Result<&str, ParseError> {
    let line = line
        .ok_or(ParseError::MissingHeaderLine { header })?
        .trim_end_matches(['\r', '\n']);

    line.strip_prefix(header.prefix())
        .ok_or_else(|| ParseError::MalformedHeader {
            header,
            value: line.to_string(),
        })
}

/// `<digits>.<digits>`
fn is_version_token(token: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    token
        .split_once('.')
        .is_some_and(|(major, minor)| all_digits(major) && all_digits(minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_header() {
        let header = parse_header(
            Some("#AUDIOSCROBBLER/1.1"),
            Some("#TZ/UTC"),
            Some("#CLIENT/Rockbox sansae200 $Revision$"),
        )
        .unwrap();

        assert_eq!(header.version, LogVersion::V1_1);
        assert_eq!(header.timezone, DeclaredTimezone::Utc);
        assert_eq!(header.client, "Rockbox sansae200 $Revision$");
        assert!(header.timezone_known());
    }

    #[test]
    fn test_line_terminators_stripped() {
        let header = parse_header(
            Some("#AUDIOSCROBBLER/1.0\r\n"),
            Some("#TZ/UNKNOWN\n"),
            Some("#CLIENT/TestPlayer\r\n"),
        )
        .unwrap();

        assert_eq!(header.version, LogVersion::V1_0);
        assert_eq!(header.timezone, DeclaredTimezone::Unknown);
        assert_eq!(header.client, "TestPlayer");
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        assert_eq!(
            parse_version(Some("\u{feff}#AUDIOSCROBBLER/1.0")).unwrap(),
            LogVersion::V1_0
        );
    }

    #[test]
    fn test_empty_client_is_valid() {
        assert_eq!(parse_client(Some("#CLIENT/")).unwrap(), "");
    }

    #[test]
    fn test_missing_lines() {
        let err = parse_header(None, None, None).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingHeaderLine {
                header: HeaderLine::Version
            }
        ));

        let err = parse_header(Some("#AUDIOSCROBBLER/1.0"), Some("#TZ/UTC"), None).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingHeaderLine {
                header: HeaderLine::Client
            }
        ));
    }

    #[test]
    fn test_malformed_version() {
        for line in ["#AUDIOSCROBBLER/", "#AUDIOSCROBBLER/one", "#AUDIOSCROBBLER/1", "AUDIOSCROBBLER/1.0"] {
            let err = parse_version(Some(line)).unwrap_err();
            assert!(
                matches!(err, ParseError::MalformedHeader { header: HeaderLine::Version, .. }),
                "{line:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_unsupported_version() {
        let err = parse_version(Some("#AUDIOSCROBBLER/2.0")).unwrap_err();
        match err {
            ParseError::UnsupportedVersion { version, supported } => {
                assert_eq!(version, "2.0");
                assert_eq!(supported, "1.0, 1.1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_timezone() {
        for line in ["#TZ/PST", "#TZ/", "#TIMEZONE/UTC", "#TZ/utc"] {
            let err = parse_timezone(Some(line)).unwrap_err();
            assert!(matches!(
                err,
                ParseError::MalformedHeader {
                    header: HeaderLine::Timezone,
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_malformed_client() {
        let err = parse_client(Some("CLIENT/Rockbox")).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedHeader {
                header: HeaderLine::Client,
                ..
            }
        ));
    }
}
