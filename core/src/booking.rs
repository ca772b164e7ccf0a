//! Booking date window.
//!
//! Bookings must be made at least 24 hours and at most 90 days ahead. The
//! check here only saves the visitor a round trip; the booking backend
//! enforces the same bounds.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Format of a `datetime-local` input value
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Format of a `date` input value
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Why a selected booking date was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingRejection {
    #[error("Booking date must be at least 24 hours in advance.")]
    TooSoon,

    #[error("Bookings can only be made up to 90 days in advance.")]
    TooFar,
}

/// Lead-time bounds for bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub min_lead: Duration,
    pub max_ahead: Duration,
    /// Hours ahead used for the pre-filled suggestion
    pub default_lead: Duration,
    pub default_time: NaiveTime,
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self {
            min_lead: Duration::hours(24),
            max_ahead: Duration::days(90),
            default_lead: Duration::hours(48),
            default_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl BookingWindow {
    pub fn earliest(&self, now: NaiveDateTime) -> NaiveDateTime {
        now + self.min_lead
    }

    pub fn latest(&self, now: NaiveDateTime) -> NaiveDateTime {
        now + self.max_ahead
    }

    pub fn validate(
        &self,
        selected: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<(), BookingRejection> {
        if selected < self.earliest(now) {
            return Err(BookingRejection::TooSoon);
        }
        if selected > self.latest(now) {
            return Err(BookingRejection::TooFar);
        }
        Ok(())
    }

    /// Validates against the local clock.
    pub fn validate_now(&self, selected: NaiveDateTime) -> Result<(), BookingRejection> {
        self.validate(selected, Local::now().naive_local())
    }

    /// `min` attribute for a `datetime-local` input.
    pub fn min_input_value(&self, now: NaiveDateTime) -> String {
        self.earliest(now).format(DATETIME_INPUT_FORMAT).to_string()
    }

    /// Pre-filled suggestion: the date two days out at 10:00.
    pub fn default_selection(&self, now: NaiveDateTime) -> NaiveDateTime {
        (now + self.default_lead).date().and_time(self.default_time)
    }

    /// `min` attribute for a plain `date` input: tomorrow.
    pub fn min_date_input(&self, now: NaiveDateTime) -> String {
        (now.date() + Duration::days(1))
            .format(DATE_INPUT_FORMAT)
            .to_string()
    }

    /// Parses a `datetime-local` value such as `2026-10-21T10:00`.
    pub fn parse_input(value: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value.trim(), DATETIME_INPUT_FORMAT).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        BookingWindow::parse_input("2026-10-19T09:30").unwrap()
    }

    #[test]
    fn test_rejects_less_than_a_day() {
        let window = BookingWindow::default();
        let selected = BookingWindow::parse_input("2026-10-20T09:29").unwrap();
        assert_eq!(window.validate(selected, now()), Err(BookingRejection::TooSoon));
        assert_eq!(
            BookingRejection::TooSoon.to_string(),
            "Booking date must be at least 24 hours in advance."
        );
    }

    #[test]
    fn test_validate_now_uses_local_clock() {
        let window = BookingWindow::default();
        let today = Local::now().naive_local();
        assert_eq!(window.validate_now(today + Duration::days(3)), Ok(()));
        assert_eq!(
            window.validate_now(today + Duration::hours(1)),
            Err(BookingRejection::TooSoon)
        );
    }

    #[test]
    fn test_accepts_bounds_inclusive() {
        let window = BookingWindow::default();
        assert_eq!(window.validate(window.earliest(now()), now()), Ok(()));
        assert_eq!(window.validate(window.latest(now()), now()), Ok(()));
    }

    #[test]
    fn test_rejects_beyond_ninety_days() {
        let window = BookingWindow::default();
        let selected = window.latest(now()) + Duration::minutes(1);
        assert_eq!(window.validate(selected, now()), Err(BookingRejection::TooFar));
    }

    #[test]
    fn test_input_defaults() {
        let window = BookingWindow::default();
        assert_eq!(window.min_input_value(now()), "2026-10-20T09:30");
        assert_eq!(
            window.default_selection(now()),
            BookingWindow::parse_input("2026-10-21T10:00").unwrap()
        );
        assert_eq!(window.min_date_input(now()), "2026-10-20");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(BookingWindow::parse_input("next tuesday").is_none());
    }
}
