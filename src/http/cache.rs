//! HTTP cache validation module
//!
//! Provides `Last-Modified` formatting and `If-Modified-Since` handling.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Format a timestamp as an HTTP-date
pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP-date; malformed values yield `None`
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Decide whether a conditional GET can be answered with 304
///
/// `If-None-Match` takes precedence: when it is present the date is ignored.
/// The modification time is compared at whole-second resolution.
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    if_none_match: Option<&str>,
    modified: SystemTime,
) -> bool {
    if if_none_match.is_some() {
        return false;
    }

    let Some(since) = if_modified_since.and_then(parse_http_date) else {
        return false;
    };

    DateTime::<Utc>::from(modified).timestamp() <= since.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_format_http_date() {
        assert_eq!(format_http_date(at(784_111_777)), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_http_date() {
        let date = parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(date.timestamp(), 784_111_777);
        assert!(parse_http_date("yesterday").is_none());
    }

    #[test]
    fn test_not_modified_when_unchanged() {
        let mtime = at(784_111_777) + Duration::from_millis(400);
        let header = format_http_date(mtime);
        assert!(is_not_modified(Some(&header), None, mtime));
        assert!(is_not_modified(Some("Mon, 07 Nov 1994 00:00:00 GMT"), None, mtime));
    }

    #[test]
    fn test_modified_after_date() {
        let mtime = at(784_111_777);
        assert!(!is_not_modified(Some("Sat, 05 Nov 1994 00:00:00 GMT"), None, mtime));
    }

    #[test]
    fn test_ignored_cases() {
        let mtime = at(784_111_777);
        let header = format_http_date(mtime);
        assert!(!is_not_modified(None, None, mtime));
        assert!(!is_not_modified(Some("garbage"), None, mtime));
        assert!(!is_not_modified(Some(&header), Some("\"etag\""), mtime));
    }
}
