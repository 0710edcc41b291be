//! Booking time windows.
//!
//! A window is picked as a calendar date plus start and end clock labels.
//! When the end is not strictly after the start the end moves to the next
//! calendar day, so an overnight block (22:00 to 02:00) spans midnight and
//! an equal selection (10:00 to 10:00) covers a full 24 hours. The
//! resulting [`BookingInterval`] therefore always ends after it starts.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};
use crate::models::booking::{BookingStatus, NewBooking};
use crate::timestamp;

/// A clock label such as `22:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime {
    hour: u8,
    minute: u8,
}

impl SlotTime {
    pub fn new(hour: u8, minute: u8) -> BookingResult<Self> {
        if hour > 23 {
            return Err(BookingError::InvalidWindow(format!(
                "Invalid hour, value too high: {hour}"
            )));
        }
        if minute > 59 {
            return Err(BookingError::InvalidWindow(format!(
                "Invalid minute, value too high: {minute}"
            )));
        }
        Ok(Self { hour, minute })
    }

    /// Whole-hour label, as offered by the slot pickers.
    pub fn on_the_hour(hour: u8) -> BookingResult<Self> {
        Self::new(hour, 0)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    fn as_naive_time(&self) -> NaiveTime {
        // Range checked in `new`.
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }
}

impl FromStr for SlotTime {
    type Err = BookingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(BookingError::InvalidWindow("Time not selected".to_string()));
        }
        let (hour, minute) = value
            .split_once(':')
            .filter(|(hour, minute)| is_two_digits(hour) && is_two_digits(minute))
            .ok_or_else(|| BookingError::InvalidWindow(format!("Invalid time label: {value}")))?;
        let hour = hour
            .parse::<u8>()
            .map_err(|e| BookingError::InvalidWindow(format!("Invalid hour: {e}")))?;
        let minute = minute
            .parse::<u8>()
            .map_err(|e| BookingError::InvalidWindow(format!("Invalid minute: {e}")))?;
        Self::new(hour, minute)
    }
}

fn is_two_digits(part: &str) -> bool {
    part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A date with start and end labels, before rollover is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub date: NaiveDate,
    pub start: SlotTime,
    pub end: SlotTime,
}

impl TimeWindow {
    pub fn new(date: NaiveDate, start: SlotTime, end: SlotTime) -> Self {
        Self { date, start, end }
    }

    /// Builds a window from raw labels; any empty label is an error.
    pub fn from_labels(date: NaiveDate, start_label: &str, end_label: &str) -> BookingResult<Self> {
        if start_label.trim().is_empty() {
            return Err(BookingError::InvalidWindow(
                "Start time not selected".to_string(),
            ));
        }
        if end_label.trim().is_empty() {
            return Err(BookingError::InvalidWindow(
                "End time not selected".to_string(),
            ));
        }
        Ok(Self::new(date, start_label.parse()?, end_label.parse()?))
    }

    /// True when the end lands on the following day.
    ///
    /// Only the hours are compared, so `10:15 -> 10:45` spans into the next
    /// day like `10:00 -> 10:00` does.
    pub fn rolls_over(&self) -> bool {
        self.end.hour() <= self.start.hour()
    }

    pub fn interval(&self) -> BookingResult<BookingInterval> {
        let end_date = if self.rolls_over() {
            self.date.succ_opt().ok_or_else(|| {
                BookingError::InvalidWindow(format!("No day after {}", self.date))
            })?
        } else {
            self.date
        };

        Ok(BookingInterval {
            start_time: self.date.and_time(self.start.as_naive_time()),
            end_time: end_date.and_time(self.end.as_naive_time()),
        })
    }
}

/// Normalized start/end pair sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInterval {
    #[serde(with = "timestamp")]
    pub start_time: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_time: NaiveDateTime,
}

impl BookingInterval {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn start_timestamp(&self) -> String {
        timestamp::format(&self.start_time)
    }

    pub fn end_timestamp(&self) -> String {
        timestamp::format(&self.end_time)
    }

    pub fn booking(
        &self,
        user_id: i64,
        court_id: i64,
        venue_id: i64,
        amount: f64,
        status: BookingStatus,
    ) -> NewBooking {
        NewBooking {
            user_id,
            court_id,
            venue_id,
            start_time: self.start_time,
            end_time: self.end_time,
            amount,
            status,
        }
    }

    /// Zero-amount record marking the court unavailable for this interval.
    pub fn blocked(&self, user_id: i64, court_id: i64, venue_id: i64) -> NewBooking {
        self.booking(user_id, court_id, venue_id, 0.0, BookingStatus::Blocked)
    }
}

/// Computes the interval for a date and two clock labels.
///
/// Fails with [`BookingError::InvalidWindow`] when either label is empty or
/// malformed; no timestamp is produced in that case.
pub fn compute(date: NaiveDate, start_label: &str, end_label: &str) -> BookingResult<BookingInterval> {
    TimeWindow::from_labels(date, start_label, end_label)?.interval()
}

/// Same as [`compute`] with the date still in its `YYYY-MM-DD` form field.
pub fn compute_from_form(
    date_label: &str,
    start_label: &str,
    end_label: &str,
) -> BookingResult<BookingInterval> {
    let date_label = date_label.trim();
    if date_label.is_empty() {
        return Err(BookingError::InvalidWindow("Date not selected".to_string()));
    }
    let date = NaiveDate::parse_from_str(date_label, "%Y-%m-%d")
        .map_err(|e| BookingError::InvalidWindow(format!("Invalid date {date_label}: {e}")))?;
    compute(date, start_label, end_label)
}
