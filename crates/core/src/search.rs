//! Search and filter composition for the admin tables.
//!
//! Users and venues are searched by the backend, bookings are filtered
//! locally against the names already loaded for the other two tables.

use crate::models::booking::Booking;
use crate::models::user::User;
use crate::models::venue::Venue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DashboardTab {
    Users,
    Venues,
    Bookings,
}

/// Clicking the open tab closes it; any other click opens that tab.
pub fn toggle(active: Option<DashboardTab>, clicked: DashboardTab) -> Option<DashboardTab> {
    if active == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

/// Server-side search term for `table`: only the open tab is searched.
pub fn server_search<'a>(
    active: Option<DashboardTab>,
    table: DashboardTab,
    term: &'a str,
) -> Option<&'a str> {
    let term = term.trim();
    (active == Some(table) && table != DashboardTab::Bookings && !term.is_empty()).then_some(term)
}

/// True when `booking` matches `term` by venue name, user name or id.
pub fn booking_matches(booking: &Booking, venues: &[Venue], users: &[User], term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }

    let venue_name = venues
        .iter()
        .find(|v| v.id == booking.venue_id)
        .map(|v| v.name.to_lowercase())
        .unwrap_or_default();
    let user_name = users
        .iter()
        .find(|u| u.id == booking.user_id)
        .map(|u| u.name.to_lowercase())
        .unwrap_or_default();

    venue_name.contains(&term) || user_name.contains(&term) || booking.id.to_string().contains(&term)
}

/// Bookings shown in the bookings table. Unfiltered unless that tab is open.
pub fn filter_bookings<'a>(
    bookings: &'a [Booking],
    venues: &[Venue],
    users: &[User],
    term: &str,
    active: Option<DashboardTab>,
) -> Vec<&'a Booking> {
    if active != Some(DashboardTab::Bookings) {
        return bookings.iter().collect();
    }
    bookings
        .iter()
        .filter(|b| booking_matches(b, venues, users, term))
        .collect()
}

/// Venues a user owns, among those currently loaded.
pub fn venues_owned_by<'a>(venues: &'a [Venue], user_id: i64) -> Vec<&'a Venue> {
    venues.iter().filter(|v| v.owner_id == user_id).collect()
}
