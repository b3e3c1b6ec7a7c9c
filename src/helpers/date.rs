//! Date helper functions

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, ParseResult};
use serde::{Serialize, Serializer};
use std::fmt;

/// Timestamp layout after the weekday and before the zone has been normalised
const RFC1123_BODY: &str = "%d %b %Y %H:%M:%S %z";

/// A post timestamp together with the zone exactly as it was written
/// (`MST`, `UTC`, `+0200`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDate {
    pub at: DateTime<FixedOffset>,
    pub zone: String,
}

impl PostDate {
    /// Whether this is the timestamp of a post with no `date:` line
    pub fn is_zero(&self) -> bool {
        self.at == zero_date().at
    }
}

impl From<DateTime<FixedOffset>> for PostDate {
    fn from(at: DateTime<FixedOffset>) -> Self {
        let zone = if at.offset().local_minus_utc() == 0 {
            "UTC".to_string()
        } else {
            at.format("%z").to_string()
        };
        Self { at, zone }
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.at.format("%a, %d %b %Y %H:%M:%S"), self.zone)
    }
}

/// Serialized in its RFC 1123 form, which the date filters read back
impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse an RFC 1123 timestamp such as `Mon, 02 Jan 2006 15:04:05 MST`
///
/// Numeric offsets and the RFC 822 US zone names keep their offset, any other
/// zone abbreviation is read as a zero offset. The zone is kept as written.
/// The day of week must be present but is not checked against the date.
pub fn parse_rfc1123(s: &str) -> ParseResult<PostDate> {
    let (weekday, rest) = s.split_once(' ').unwrap_or((s, ""));
    format::parse(&mut Parsed::new(), weekday, StrftimeItems::new("%a,"))?;

    let (stamp, zone) = rest.rsplit_once(' ').unwrap_or((rest, ""));
    let offset = match zone_offset_hours(zone) {
        Some(hours) => format!("{:+03}00", hours),
        None => zone.to_string(),
    };

    let at = DateTime::parse_from_str(&format!("{} {}", stamp, offset), RFC1123_BODY)?;
    Ok(PostDate {
        at,
        zone: zone.to_string(),
    })
}

/// Offset in hours for an alphabetic zone abbreviation
fn zone_offset_hours(zone: &str) -> Option<i32> {
    if zone.is_empty() || !zone.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let hours = match zone.to_ascii_uppercase().as_str() {
        "EDT" => -4,
        "EST" | "CDT" => -5,
        "CST" | "MDT" => -6,
        "MST" | "PDT" => -7,
        "PST" => -8,
        _ => 0,
    };
    Some(hours)
}

/// Format a date as RFC 1123 with its zone as written
/// (`Mon, 02 Jan 2006 15:04:05 MST`)
pub fn format_rfc1123(date: &PostDate) -> String {
    date.to_string()
}

/// Format a date for listings (like "January  2, 2006")
pub fn short_date(date: &PostDate) -> String {
    date.at.format("%B %e, %Y").to_string()
}

/// The timestamp of a post with no `date:` line, `0001-01-01T00:00:00Z`
pub fn zero_date() -> PostDate {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
        .and_utc()
        .fixed_offset()
        .into()
}

/// Convert a `YYYY-MM-DD` date into an RFC 1123 timestamp at midnight UTC
pub fn date_to_rfc1123(s: &str) -> ParseResult<String> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?;
    let midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    Ok(format_rfc1123(&midnight.and_utc().fixed_offset().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_rfc1123_named_zone() {
        let date = parse_rfc1123("Mon, 02 Jan 2006 15:04:05 MST").unwrap();
        assert_eq!((date.at.year(), date.at.month(), date.at.day()), (2006, 1, 2));
        assert_eq!(date.at.hour(), 15);
        assert_eq!(date.at.offset().local_minus_utc(), -7 * 3600);
        assert_eq!(date.zone, "MST");
    }

    #[test]
    fn test_parse_rfc1123_unknown_zone_is_zero_offset() {
        let date = parse_rfc1123("Tue, 10 Oct 2017 08:00:00 UTC").unwrap();
        assert_eq!(date.at.offset().local_minus_utc(), 0);
        assert_eq!(date.at.day(), 10);
        assert_eq!(date.zone, "UTC");
    }

    #[test]
    fn test_parse_rfc1123_numeric_offset() {
        let date = parse_rfc1123("Tue, 10 Oct 2017 08:00:00 +0200").unwrap();
        assert_eq!(date.at.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_parse_rfc1123_rejects_other_layouts() {
        assert!(parse_rfc1123("2006-01-02").is_err());
        assert!(parse_rfc1123("").is_err());
        assert!(parse_rfc1123("Mon, 02 Foo 2006 15:04:05 GMT").is_err());
    }

    #[test]
    fn test_parse_rfc1123_requires_weekday() {
        assert!(parse_rfc1123("02 Jan 2006 15:04:05 GMT").is_err());
        assert!(parse_rfc1123("Xyz, 02 Jan 2006 15:04:05 GMT").is_err());
        assert!(parse_rfc1123(" Mon, 02 Jan 2006 15:04:05 GMT").is_err());
        assert!(parse_rfc1123("Mon, 02 Jan 2006 15:04:05 GMT ").is_err());
        // the day name is not checked against the date
        assert!(parse_rfc1123("Fri, 02 Jan 2006 15:04:05 GMT").is_ok());
    }

    #[test]
    fn test_format_rfc1123_round_trip() {
        for line in [
            "Mon, 02 Jan 2006 15:04:05 GMT",
            "Mon, 02 Jan 2006 15:04:05 MST",
            "Tue, 10 Oct 2017 08:00:00 UTC",
            "Wed, 15 Jul 2015 09:30:00 CET",
            "Tue, 10 Oct 2017 08:00:00 +0200",
        ] {
            let date = parse_rfc1123(line).unwrap();
            assert_eq!(format_rfc1123(&date), line);
        }
    }

    #[test]
    fn test_post_date_from_instant() {
        let at = DateTime::parse_from_rfc3339("2017-10-10T08:00:00+02:00").unwrap();
        assert_eq!(PostDate::from(at).to_string(), "Tue, 10 Oct 2017 08:00:00 +0200");
        let utc = DateTime::parse_from_rfc3339("2017-10-10T08:00:00Z").unwrap();
        assert_eq!(PostDate::from(utc).to_string(), "Tue, 10 Oct 2017 08:00:00 UTC");
    }

    #[test]
    fn test_short_date() {
        let date = parse_rfc1123("Mon, 02 Jan 2006 15:04:05 GMT").unwrap();
        assert_eq!(short_date(&date), "January  2, 2006");
    }

    #[test]
    fn test_zero_date() {
        let date = zero_date();
        assert_eq!((date.at.year(), date.at.month(), date.at.day()), (1, 1, 1));
        assert!(date.is_zero());
        assert!(!parse_rfc1123("Mon, 02 Jan 2006 15:04:05 GMT").unwrap().is_zero());
    }

    #[test]
    fn test_date_to_rfc1123() {
        assert_eq!(
            date_to_rfc1123("2006-01-02").unwrap(),
            "Mon, 02 Jan 2006 00:00:00 UTC"
        );
        assert!(date_to_rfc1123("01/02/2006").is_err());
    }
}
