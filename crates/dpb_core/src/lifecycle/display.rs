//! Viewer-facing labels for paste timestamps.

use chrono::{DateTime, FixedOffset, TimeZone};
use std::fmt::Display;

use crate::constants::PAGE_TITLE_SUFFIX;

/// `strftime` pattern used for every displayed timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format `timestamp` in the time zone `tz`.
pub fn format_in<Tz>(timestamp: &DateTime<FixedOffset>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    timestamp
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

pub fn created_label<Tz>(created_at: &DateTime<FixedOffset>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("Created at {}", format_in(created_at, tz))
}

/// "Never expires" when there is no expiration, otherwise the local expiry time.
pub fn expiry_label<Tz>(expire_at: Option<&DateTime<FixedOffset>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match expire_at {
        Some(expire_at) => format!("Will expire at {}", format_in(expire_at, tz)),
        None => "Never expires".to_string(),
    }
}

pub fn page_title(title: &str) -> String {
    format!("{}{}", title, PAGE_TITLE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ts(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).expect("timestamp")
    }

    #[test]
    fn format_in_converts_to_viewer_zone() {
        let created = ts("2026-10-14T09:30:00+02:00");
        assert_eq!(format_in(&created, &Utc), "2026-10-14 07:30:00");
        let tokyo = FixedOffset::east_opt(9 * 3600).expect("offset");
        assert_eq!(format_in(&created, &tokyo), "2026-10-14 16:30:00");
    }

    #[test]
    fn expiry_label_matrix() {
        let expire = ts("2026-10-15T00:00:00+00:00");
        let cases = [
            (Some(&expire), "Will expire at 2026-10-15 00:00:00"),
            (None, "Never expires"),
        ];
        for (input, expected) in cases {
            assert_eq!(expiry_label(input, &Utc), expected);
        }
    }

    #[test]
    fn created_label_and_page_title() {
        let created = ts("2026-01-02T03:04:05+00:00");
        assert_eq!(created_label(&created, &Utc), "Created at 2026-01-02 03:04:05");
        assert_eq!(page_title("notes"), "notes - DPB");
    }
}
