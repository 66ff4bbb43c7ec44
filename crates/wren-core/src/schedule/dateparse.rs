//! Lenient parsing for the leading date token of task names.
//!
//! Task names carry their schedule in the filename, so the grammar here
//! accepts the formats people actually type: ISO dates, slashed dates,
//! bare times, 12-hour times, bare day numbers, years, and month names.
//! Parsing is a pure function of the token; components the token leaves
//! out (today's date for a bare time, the current month for a bare day)
//! are filled in later from the caller's `now` snapshot, so the same
//! name always classifies the same way.

use jiff::civil::{Date, DateTime, Time};

const MONTH_ABBR: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const MONTH_FULL: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y"];
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];
const TWELVE_HOUR_FORMATS: &[&str] = &["%I:%M%p", "%I%p"];

/// A successfully parsed date token, before resolution against a
/// reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    /// A complete date, or date and time. Date-only forms mean midnight.
    Absolute(DateTime),
    /// A time of day, meaning today at that time.
    TimeOfDay(Time),
    /// A bare 1-31, meaning that day of the current month at midnight.
    DayOfMonth(i8),
    /// A bare four-digit year, keeping the current month and day.
    Year(i16),
    /// A month name, keeping the current year and day.
    Month(i8),
}

impl DateToken {
    /// Fills in the components the token left implicit. Days are clamped
    /// to the target month's length so a stored name never fails to
    /// resolve partway through a listing.
    pub fn resolve(self, now: DateTime) -> Option<DateTime> {
        match self {
            Self::Absolute(dt) => Some(dt),
            Self::TimeOfDay(t) => Some(now.date().to_datetime(t)),
            Self::DayOfMonth(day) => {
                let day = day.min(now.date().days_in_month());
                Date::new(now.year(), now.month(), day)
                    .ok()
                    .map(|d| d.at(0, 0, 0, 0))
            }
            Self::Year(year) => {
                let first = Date::new(year, now.month(), 1).ok()?;
                let day = now.day().min(first.days_in_month());
                Date::new(year, now.month(), day).ok().map(|d| d.at(0, 0, 0, 0))
            }
            Self::Month(month) => {
                let first = Date::new(now.year(), month, 1).ok()?;
                let day = now.day().min(first.days_in_month());
                Date::new(now.year(), month, day)
                    .ok()
                    .map(|d| d.at(0, 0, 0, 0))
            }
        }
    }
}

/// Parses a single whitespace-free token against the lenient grammar.
/// Returns None when the token is not a recognizable date form.
pub fn parse(token: &str) -> Option<DateToken> {
    if token.is_empty() {
        return None;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return parse_numeric(token);
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = DateTime::strptime(format, token) {
            return Some(DateToken::Absolute(dt));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = Date::strptime(format, token) {
            return Some(DateToken::Absolute(date.at(0, 0, 0, 0)));
        }
    }
    for format in TIME_FORMATS {
        if let Ok(time) = Time::strptime(format, token) {
            return Some(DateToken::TimeOfDay(time));
        }
    }
    let upper = token.to_ascii_uppercase();
    if upper.ends_with("AM") || upper.ends_with("PM") {
        for format in TWELVE_HOUR_FORMATS {
            if let Ok(time) = Time::strptime(format, &upper) {
                return Some(DateToken::TimeOfDay(time));
            }
        }
    }
    let lower = token.to_ascii_lowercase();
    if let Some(i) = MONTH_ABBR
        .iter()
        .position(|m| *m == lower)
        .or_else(|| MONTH_FULL.iter().position(|m| *m == lower))
    {
        return Some(DateToken::Month(i as i8 + 1));
    }
    None
}

/// All-digit tokens: 8 digits are a compact date, 4 digits a year, and
/// 1-2 digits a day of the current month.
fn parse_numeric(token: &str) -> Option<DateToken> {
    match token.len() {
        8 => {
            let year: i16 = token[..4].parse().ok()?;
            let month: i8 = token[4..6].parse().ok()?;
            let day: i8 = token[6..8].parse().ok()?;
            Date::new(year, month, day)
                .ok()
                .map(|d| DateToken::Absolute(d.at(0, 0, 0, 0)))
        }
        4 => token.parse().ok().map(DateToken::Year),
        1 | 2 => {
            let day: i8 = token.parse().ok()?;
            (1..=31).contains(&day).then_some(DateToken::DayOfMonth(day))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::{date, time};

    fn now() -> DateTime {
        date(2024, 1, 10).at(9, 0, 0, 0)
    }

    fn resolved(token: &str) -> DateTime {
        parse(token).unwrap().resolve(now()).unwrap()
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(resolved("2024-01-05"), date(2024, 1, 5).at(0, 0, 0, 0));
    }

    #[test]
    fn test_iso_datetime() {
        assert_eq!(resolved("2024-01-05T10:30"), date(2024, 1, 5).at(10, 30, 0, 0));
        assert_eq!(
            resolved("2024-01-05T10:30:45"),
            date(2024, 1, 5).at(10, 30, 45, 0)
        );
    }

    #[test]
    fn test_slashed_dates() {
        assert_eq!(resolved("2024/01/15"), date(2024, 1, 15).at(0, 0, 0, 0));
        assert_eq!(resolved("01/15/2024"), date(2024, 1, 15).at(0, 0, 0, 0));
        assert_eq!(resolved("01/15/24"), date(2024, 1, 15).at(0, 0, 0, 0));
    }

    #[test]
    fn test_compact_date() {
        assert_eq!(resolved("20240105"), date(2024, 1, 5).at(0, 0, 0, 0));
        assert!(parse("20241345").is_none());
    }

    #[test]
    fn test_bare_time_resolves_to_today() {
        assert_eq!(resolved("14:30"), date(2024, 1, 10).at(14, 30, 0, 0));
        assert_eq!(resolved("14:30:15"), date(2024, 1, 10).at(14, 30, 15, 0));
    }

    #[test]
    fn test_twelve_hour_times() {
        assert_eq!(parse("3pm"), Some(DateToken::TimeOfDay(time(15, 0, 0, 0))));
        assert_eq!(parse("3:30pm"), Some(DateToken::TimeOfDay(time(15, 30, 0, 0))));
        assert_eq!(parse("11AM"), Some(DateToken::TimeOfDay(time(11, 0, 0, 0))));
        assert_eq!(parse("12am"), Some(DateToken::TimeOfDay(time(0, 0, 0, 0))));
        assert_eq!(parse("13pm"), None);
    }

    #[test]
    fn test_bare_day_of_month() {
        assert_eq!(resolved("15"), date(2024, 1, 15).at(0, 0, 0, 0));
        assert_eq!(resolved("5"), date(2024, 1, 5).at(0, 0, 0, 0));
        assert!(parse("0").is_none());
        assert!(parse("32").is_none());
        assert!(parse("123").is_none());
    }

    #[test]
    fn test_bare_day_clamps_to_month_length() {
        let april = date(2024, 4, 10).at(9, 0, 0, 0);
        let resolved = parse("31").unwrap().resolve(april).unwrap();
        assert_eq!(resolved, date(2024, 4, 30).at(0, 0, 0, 0));
    }

    #[test]
    fn test_bare_year() {
        assert_eq!(resolved("2025"), date(2025, 1, 10).at(0, 0, 0, 0));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse("mar"), Some(DateToken::Month(3)));
        assert_eq!(parse("March"), Some(DateToken::Month(3)));
        assert_eq!(parse("DECEMBER"), Some(DateToken::Month(12)));
        assert_eq!(resolved("jun"), date(2024, 6, 10).at(0, 0, 0, 0));
    }

    #[test]
    fn test_month_resolution_clamps_day() {
        let jan_31 = date(2024, 1, 31).at(9, 0, 0, 0);
        let resolved = parse("feb").unwrap().resolve(jan_31).unwrap();
        assert_eq!(resolved, date(2024, 2, 29).at(0, 0, 0, 0));
    }

    #[test]
    fn test_rejects_non_dates() {
        assert!(parse("hello").is_none());
        assert!(parse("99:99").is_none());
        assert!(parse("2024-13-01").is_none());
        assert!(parse("janx").is_none());
        assert!(parse("").is_none());
    }
}
