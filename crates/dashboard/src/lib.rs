//! # SportZone Dashboard
//!
//! Screen state for the three management dashboards.
//!
//! - **Admin**: platform-wide users, venues and upcoming bookings
//! - **Owner**: an owner's venues and the bookings made against them
//! - **Venue**: one venue's settings, courts, gallery and slot blocking
//! - **Forms**: booking edits and slot blocks, both routed through the
//!   booking window computer
//!
//! Every screen is generic over [`SportzoneApi`](sportzone_client::SportzoneApi)
//! and owns its state. Actions send one request, then refetch whatever the
//! screen displays.

pub mod admin;
pub mod forms;
pub mod owner;
pub mod venue;

use sportzone_core::{
    errors::{user_message, BookingError, BookingResult},
    models::booking::Booking,
};
use tracing::warn;

pub use admin::AdminDashboard;
pub use forms::{BlockForm, BookingEditForm};
pub use owner::OwnerDashboard;
pub use venue::VenueDashboard;

/// Outcome of the last user action, as the screen shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Failure(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}

/// Records the notice for `result` and hands the result back.
pub(crate) fn settle<T>(
    notice: &mut Option<Notice>,
    action: &str,
    success: &str,
    result: BookingResult<T>,
) -> BookingResult<T> {
    match &result {
        Ok(_) => *notice = Some(Notice::Success(success.to_string())),
        Err(err) => {
            warn!("{} failed: {}", action, err);
            *notice = Some(Notice::Failure(user_message(action, err)));
        }
    }
    result
}

/// Rejects cancelling a loaded booking that is already cancelled.
/// Bookings not on the current page are left to the backend.
pub(crate) fn ensure_cancellable(bookings: &[Booking], booking_id: i64) -> BookingResult<()> {
    match bookings.iter().find(|b| b.id == booking_id) {
        Some(booking) if !booking.status.is_cancellable() => Err(BookingError::Validation(
            format!("Booking {} is already cancelled", booking_id),
        )),
        _ => Ok(()),
    }
}
