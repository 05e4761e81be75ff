//! Date windows used to partition search queries

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LABEL_DATE_FORMAT: &str = "%Y%m%d";
const ISO_MILLIS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Inclusive pair of UTC instants with millisecond precision
///
/// A weekly window runs from Sunday 00:00:00.000 through the following
/// Saturday 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateWindow {
    /// Creates a window from two instants
    ///
    /// # Errors
    ///
    /// Returns an error if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, String> {
        if start > end {
            return Err(format!(
                "Window start {} is after end {}",
                start.format(ISO_MILLIS_FORMAT),
                end.format(ISO_MILLIS_FORMAT)
            ));
        }
        Ok(Self { start, end })
    }

    /// Whole-day window from the first millisecond of `first` to the last
    /// millisecond of `last`
    pub fn from_dates(first: NaiveDate, last: NaiveDate) -> Result<Self, String> {
        let start = start_of_day(first);
        let end = start_of_day(last) + Duration::days(1) - Duration::milliseconds(1);
        Self::new(start, end)
    }

    /// The Sunday-to-Saturday week `weeks_ago` weeks before the week that
    /// contains `reference`
    ///
    /// `weeks_ago = 1` is last week; `weeks_ago = 0` is the current week.
    ///
    /// # Errors
    ///
    /// Returns an error if the week falls outside the representable range.
    pub fn week_range(reference: DateTime<Utc>, weeks_ago: u32) -> Result<Self, String> {
        let date = reference.date_naive();
        let days_since_sunday = i64::from(date.weekday().num_days_from_sunday());
        let this_sunday = start_of_day(date) - Duration::days(days_since_sunday);

        let out_of_range = || format!("{weeks_ago} weeks ago is outside the supported date range");
        let start = Duration::try_days(7 * i64::from(weeks_ago))
            .and_then(|back| this_sunday.checked_sub_signed(back))
            .ok_or_else(out_of_range)?;
        let end = start
            .checked_add_signed(Duration::days(7) - Duration::milliseconds(1))
            .ok_or_else(out_of_range)?;
        Ok(Self { start, end })
    }

    /// Last week relative to `reference`
    pub fn last_week(reference: DateTime<Utc>) -> Result<Self, String> {
        Self::week_range(reference, 1)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// `start` as `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub fn start_iso(&self) -> String {
        self.start.format(ISO_MILLIS_FORMAT).to_string()
    }

    /// `end` as `YYYY-MM-DDTHH:MM:SS.mmmZ`
    pub fn end_iso(&self) -> String {
        self.end.format(ISO_MILLIS_FORMAT).to_string()
    }

    /// File-name label `YYYYMMDD-YYYYMMDD`
    pub fn label(&self) -> String {
        format!(
            "{}-{}",
            self.start.format(LABEL_DATE_FORMAT),
            self.end.format(LABEL_DATE_FORMAT)
        )
    }

    /// Parses a file-name label back into a whole-day window
    pub fn from_label(label: &str) -> Result<Self, String> {
        let (first, last) = label
            .split_once('-')
            .ok_or_else(|| format!("Invalid window label '{label}'"))?;
        let first = NaiveDate::parse_from_str(first, LABEL_DATE_FORMAT)
            .map_err(|e| format!("Invalid window label '{label}': {e}"))?;
        let last = NaiveDate::parse_from_str(last, LABEL_DATE_FORMAT)
            .map_err(|e| format!("Invalid window label '{label}': {e}"))?;
        Self::from_dates(first, last)
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.start_iso(), self.end_iso())
    }
}

/// Parses `YYYY-MM-DD..YYYY-MM-DD`
impl FromStr for DateWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, last) = s
            .trim()
            .split_once("..")
            .ok_or_else(|| format!("Invalid window '{s}'. Expected YYYY-MM-DD..YYYY-MM-DD"))?;
        let first = NaiveDate::parse_from_str(first.trim(), "%Y-%m-%d")
            .map_err(|e| format!("Invalid window start '{first}': {e}"))?;
        let last = NaiveDate::parse_from_str(last.trim(), "%Y-%m-%d")
            .map_err(|e| format!("Invalid window end '{last}': {e}"))?;
        Self::from_dates(first, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_last_week_from_monday() {
        let window = DateWindow::last_week(utc(2025, 6, 9, 14, 5)).unwrap();
        assert_eq!(window.start_iso(), "2025-06-01T00:00:00.000Z");
        assert_eq!(window.end_iso(), "2025-06-07T23:59:59.999Z");
    }

    #[test]
    fn test_last_week_from_sunday() {
        // Sunday starts a new week
        let window = DateWindow::last_week(utc(2025, 6, 8, 0, 0)).unwrap();
        assert_eq!(window.start_iso(), "2025-06-01T00:00:00.000Z");
        assert_eq!(window.end_iso(), "2025-06-07T23:59:59.999Z");
    }

    #[test]
    fn test_last_week_from_saturday() {
        let window = DateWindow::last_week(utc(2025, 6, 14, 23, 59)).unwrap();
        assert_eq!(window.start_iso(), "2025-06-01T00:00:00.000Z");
    }

    #[test]
    fn test_weeks_ago() {
        let window = DateWindow::week_range(utc(2025, 6, 9, 14, 5), 3).unwrap();
        assert_eq!(window.start_iso(), "2025-05-18T00:00:00.000Z");
        assert_eq!(window.end_iso(), "2025-05-24T23:59:59.999Z");

        let current = DateWindow::week_range(utc(2025, 6, 9, 14, 5), 0).unwrap();
        assert_eq!(current.start_iso(), "2025-06-08T00:00:00.000Z");
    }

    #[test]
    fn test_weeks_ago_out_of_range() {
        let err = DateWindow::week_range(utc(2025, 6, 9, 14, 5), 20_000_000).unwrap_err();
        assert!(err.contains("20000000 weeks ago"));

        assert!(DateWindow::week_range(utc(2025, 6, 9, 14, 5), u32::MAX).is_err());
    }

    #[test]
    fn test_label() {
        let window = DateWindow::last_week(utc(2025, 6, 9, 14, 5)).unwrap();
        assert_eq!(window.label(), "20250601-20250607");
        assert_eq!(DateWindow::from_label("20250601-20250607").unwrap(), window);
    }

    #[test]
    fn test_parse_explicit_window() {
        let window: DateWindow = "2025-03-30..2025-04-05".parse().unwrap();
        assert_eq!(window.start_iso(), "2025-03-30T00:00:00.000Z");
        assert_eq!(window.end_iso(), "2025-04-05T23:59:59.999Z");
    }

    #[test]
    fn test_parse_rejects_reversed_and_malformed() {
        assert!("2025-04-05..2025-03-30".parse::<DateWindow>().is_err());
        assert!("2025-04-05".parse::<DateWindow>().is_err());
        assert!("2025-13-01..2025-13-02".parse::<DateWindow>().is_err());
        assert!(DateWindow::from_label("garbage").is_err());
    }

    #[test]
    fn test_windows_sort_chronologically() {
        let mut windows = vec![
            DateWindow::from_label("20250413-20250419").unwrap(),
            DateWindow::from_label("20250330-20250405").unwrap(),
        ];
        windows.sort();
        assert_eq!(windows[0].label(), "20250330-20250405");
    }
}
