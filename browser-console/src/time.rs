//! Timestamp prefixes for dumped strings.
//!
//! [`show`][crate::show] can prepend the current date to string messages. The time is the
//! process-local wall clock, formatted with [`DATE_FORMAT`], e.g. `[2024-05-01 13:37:00] Hello`.

use chrono::{Local, NaiveDateTime};

/// `strftime` format of the date prefix.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefixes `message` with the current local time.
pub(crate) fn date_prefixed(message: &str) -> String {
    prefixed_at(message, Local::now().naive_local())
}

fn prefixed_at(message: &str, time: NaiveDateTime) -> String {
    format!("[{}] {message}", time.format(DATE_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_with_second_precision() {
        let time = NaiveDate::from_ymd_opt(2024, 2, 9)
            .and_then(|date| date.and_hms_milli_opt(7, 5, 3, 999))
            .unwrap();

        assert_eq!(prefixed_at("Hello", time), "[2024-02-09 07:05:03] Hello");
    }

    #[test]
    fn current_time_matches_format() {
        let prefixed = date_prefixed("Hello");
        let (date, message) = prefixed.split_at(22);

        assert_eq!(message, "Hello");
        assert!(date.starts_with('[') && date.ends_with("] "));
        assert!(NaiveDateTime::parse_from_str(&date[1..20], DATE_FORMAT).is_ok());
    }
}
