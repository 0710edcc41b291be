use sportzone_client::SportzoneApi;
use sportzone_core::{
    errors::{user_message, BookingError, BookingResult},
    models::{
        booking::Booking,
        page::{PageCursor, PageRequest},
        user::Role,
        venue::{Venue, VenueDraft},
    },
    session::Session,
};
use tracing::{debug, info};

use crate::{ensure_cancellable, forms::BookingEditForm, settle, Notice};

/// Bookings shown per page for a single venue.
pub const OWNER_BOOKINGS_PAGE_SIZE: u32 = 5;

/// A venue owner's listings and the bookings made against them.
pub struct OwnerDashboard<A: SportzoneApi> {
    api: A,
    session: Session,
    pub venues: Vec<Venue>,
    selected_venue: Option<i64>,
    pub bookings: Vec<Booking>,
    bookings_page: PageCursor,
    pub notice: Option<Notice>,
}

impl<A: SportzoneApi> OwnerDashboard<A> {
    pub fn new(api: A, session: Session) -> BookingResult<Self> {
        session.require_role(Role::VenueOwner)?;
        Ok(Self {
            api,
            session,
            venues: Vec::new(),
            selected_venue: None,
            bookings: Vec::new(),
            bookings_page: PageCursor::default(),
            notice: None,
        })
    }

    pub fn selected_venue(&self) -> Option<i64> {
        self.selected_venue
    }

    pub fn bookings_cursor(&self) -> &PageCursor {
        &self.bookings_page
    }

    /// Fetches the venues owned by the signed-in user.
    pub async fn load(&mut self) -> BookingResult<()> {
        match self.api.venues_by_owner(self.session.user_id).await {
            Ok(venues) => {
                debug!("Owner {} has {} venues", self.session.user_id, venues.len());
                self.venues = venues;
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::Failure(user_message("Fetch venues", &err)));
                Err(err)
            }
        }
    }

    /// Opens the bookings of `venue_id` at the first page.
    pub async fn view_bookings(&mut self, venue_id: i64) -> BookingResult<()> {
        self.selected_venue = Some(venue_id);
        self.bookings_page.reset();
        self.fetch_bookings().await
    }

    pub async fn change_page(&mut self, page: u32) -> BookingResult<()> {
        self.bookings_page.select(page);
        self.fetch_bookings().await
    }

    async fn fetch_bookings(&mut self) -> BookingResult<()> {
        let venue_id = self
            .selected_venue
            .ok_or_else(|| BookingError::Validation("No venue selected".to_string()))?;
        let request = PageRequest::new(self.bookings_page.current(), OWNER_BOOKINGS_PAGE_SIZE);

        match self.api.venue_bookings(venue_id, request).await {
            Ok(page) => {
                self.bookings = page.content;
                self.bookings_page.update_total(page.total_pages);
                Ok(())
            }
            Err(err) => {
                self.notice = Some(Notice::Failure(user_message("Fetch bookings", &err)));
                Err(err)
            }
        }
    }

    pub async fn cancel_booking(&mut self, booking_id: i64) -> BookingResult<()> {
        info!("Owner {} cancelling booking {}", self.session.user_id, booking_id);
        let result = match ensure_cancellable(&self.bookings, booking_id) {
            Ok(()) => self.api.cancel_booking(booking_id).await,
            Err(err) => Err(err),
        };
        settle(&mut self.notice, "Cancel booking", "Booking Cancelled", result)?;
        self.fetch_bookings().await
    }

    pub async fn edit_booking(&mut self, booking_id: i64, form: &BookingEditForm) -> BookingResult<()> {
        let result = match self.bookings.iter().find(|b| b.id == booking_id) {
            Some(booking) => match form.apply(booking) {
                Ok(updated) => self.api.update_booking(updated).await,
                Err(err) => Err(err),
            },
            None => Err(BookingError::NotFound(format!(
                "Booking with ID {} is not loaded",
                booking_id
            ))),
        };
        settle(
            &mut self.notice,
            "Update booking",
            "Booking Updated Successfully",
            result,
        )?;
        self.fetch_bookings().await
    }

    /// Lists a new venue with its courts and images, then reloads the list.
    pub async fn add_venue(&mut self, draft: &VenueDraft) -> BookingResult<()> {
        let result = match draft.to_new_venue(self.session.user_id) {
            Ok(venue) => {
                info!("Owner {} listing venue {}", self.session.user_id, venue.name);
                self.api.create_venue(venue, draft.images.clone()).await
            }
            Err(err) => Err(err),
        };
        settle(&mut self.notice, "Add venue", "Venue Added Successfully!", result)?;
        self.load().await
    }

    /// Deletes a venue and drops it from the loaded list.
    pub async fn delete_venue(&mut self, venue_id: i64) -> BookingResult<()> {
        info!("Owner {} deleting venue {}", self.session.user_id, venue_id);
        let result = self.api.delete_venue(venue_id).await;
        settle(&mut self.notice, "Delete venue", "Venue deleted", result)?;

        self.venues.retain(|v| v.id != venue_id);
        if self.selected_venue == Some(venue_id) {
            self.selected_venue = None;
            self.bookings.clear();
            self.bookings_page = PageCursor::default();
        }
        Ok(())
    }
}
