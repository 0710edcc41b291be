use chrono::NaiveDate;
use sportzone_core::{
    errors::{BookingError, BookingResult},
    models::booking::{Booking, BookingStatus, NewBooking},
    window::{compute_from_form, BookingInterval},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const CLOCK_FORMAT: &str = "%H:%M";

/// Edit form for an existing booking.
///
/// Fields hold what the form inputs hold. Saving recomputes both timestamps
/// from the date and clock labels, so an edited booking follows the same
/// next-day rule as a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingEditForm {
    pub date: String,
    pub start: String,
    pub end: String,
    pub status: BookingStatus,
    pub amount: String,
}

impl BookingEditForm {
    /// Prefills the form from the booking's start date and clock times.
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            date: booking.start_time.format(DATE_FORMAT).to_string(),
            start: booking.start_time.format(CLOCK_FORMAT).to_string(),
            end: booking.end_time.format(CLOCK_FORMAT).to_string(),
            status: booking.status,
            amount: booking.amount.to_string(),
        }
    }

    pub fn interval(&self) -> BookingResult<BookingInterval> {
        compute_from_form(&self.date, &self.start, &self.end)
    }

    /// Returns `booking` with the form's window, status and amount applied.
    pub fn apply(&self, booking: &Booking) -> BookingResult<Booking> {
        let interval = self.interval()?;
        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite() && *amount >= 0.0)
            .ok_or_else(|| BookingError::Validation(format!("Invalid amount: {}", self.amount)))?;

        Ok(Booking {
            start_time: interval.start_time,
            end_time: interval.end_time,
            amount,
            status: self.status,
            ..booking.clone()
        })
    }
}

/// Slot-blocking form on the venue manager screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockForm {
    pub court_id: Option<i64>,
    pub date: String,
    pub start: String,
    pub end: String,
}

impl BlockForm {
    pub fn new(court_id: i64, date: NaiveDate, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            court_id: Some(court_id),
            date: date.format(DATE_FORMAT).to_string(),
            start: start.into(),
            end: end.into(),
        }
    }

    /// Builds the blocked-slot record for `user_id` at `venue_id`.
    ///
    /// Nothing is produced unless a court, a date and both clock labels are
    /// present and well formed.
    pub fn to_record(&self, user_id: i64, venue_id: i64) -> BookingResult<NewBooking> {
        let court_id = self
            .court_id
            .ok_or_else(|| BookingError::Validation("Court not selected".to_string()))?;
        let interval = compute_from_form(&self.date, &self.start, &self.end)?;
        Ok(interval.blocked(user_id, court_id, venue_id))
    }

    /// Clears the clock labels, keeping the court and date for the next block.
    pub fn clear_times(&mut self) {
        self.start.clear();
        self.end.clear();
    }
}

/// Clock labels offered by the hour pickers, `00:00` through `23:00`.
pub fn hour_labels() -> Vec<String> {
    (0..24).map(|hour| format!("{hour:02}:00")).collect()
}
