//! The UTC day used when listing "today's" events.

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// A whole UTC day, from 00:00:00.000000 to 23:59:59.999999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayWindow {
    pub fn today() -> Self {
        Self::for_date(Utc::now().date_naive())
    }

    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = date
            .and_hms_micro_opt(23, 59, 59, 999_999)
            .map(|dt| dt.and_utc())
            .unwrap_or(start);

        DayWindow { start, end }
    }

    /// `start` as the provider's `timeMin` parameter.
    pub fn time_min(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Micros, true)
    }

    /// `end` as the provider's `timeMax` parameter.
    pub fn time_max(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_the_whole_day() {
        let window = DayWindow::for_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert_eq!(window.time_min(), "2024-01-01T00:00:00.000000Z");
        assert_eq!(window.time_max(), "2024-01-01T23:59:59.999999Z");
    }

    #[test]
    fn today_contains_now() {
        let now = Utc::now();
        let window = DayWindow::today();

        // Allow for the clock ticking over midnight between the two calls.
        if window.start.date_naive() == now.date_naive() {
            assert!(window.start <= now && now <= window.end);
        }
    }
}
