use sportzone_client::SportzoneApi;
use sportzone_core::{
    errors::{user_message, BookingError, BookingResult},
    models::{
        booking::Booking,
        page::{PageCursor, PageRequest},
        user::{Role, User},
        venue::{Venue, VenueStatus},
    },
    search::{self, DashboardTab},
    session::Session,
};
use tracing::{debug, info};

use crate::{ensure_cancellable, forms::BookingEditForm, settle, Notice};

/// Rows per table on the admin screen.
pub const ADMIN_PAGE_SIZE: u32 = 10;

/// Platform overview for administrators.
///
/// Holds one page each of users, venues and upcoming bookings. The search
/// term applies to whichever tab is open: users and venues are searched by
/// the backend, bookings are filtered over the loaded page.
pub struct AdminDashboard<A: SportzoneApi> {
    api: A,
    session: Session,
    pub users: Vec<User>,
    pub venues: Vec<Venue>,
    pub bookings: Vec<Booking>,
    pub total_users: u64,
    pub total_venues: u64,
    pub total_bookings: u64,
    users_page: PageCursor,
    venues_page: PageCursor,
    bookings_page: PageCursor,
    active_tab: Option<DashboardTab>,
    search: String,
    pub notice: Option<Notice>,
}

impl<A: SportzoneApi> AdminDashboard<A> {
    pub fn new(api: A, session: Session) -> BookingResult<Self> {
        session.require_role(Role::Admin)?;
        Ok(Self {
            api,
            session,
            users: Vec::new(),
            venues: Vec::new(),
            bookings: Vec::new(),
            total_users: 0,
            total_venues: 0,
            total_bookings: 0,
            users_page: PageCursor::default(),
            venues_page: PageCursor::default(),
            bookings_page: PageCursor::default(),
            active_tab: None,
            search: String::new(),
            notice: None,
        })
    }

    pub fn active_tab(&self) -> Option<DashboardTab> {
        self.active_tab
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn cursor(&self, tab: DashboardTab) -> &PageCursor {
        match tab {
            DashboardTab::Users => &self.users_page,
            DashboardTab::Venues => &self.venues_page,
            DashboardTab::Bookings => &self.bookings_page,
        }
    }

    fn cursor_mut(&mut self, tab: DashboardTab) -> &mut PageCursor {
        match tab {
            DashboardTab::Users => &mut self.users_page,
            DashboardTab::Venues => &mut self.venues_page,
            DashboardTab::Bookings => &mut self.bookings_page,
        }
    }

    fn request(&self, tab: DashboardTab) -> PageRequest {
        PageRequest::new(self.cursor(tab).current(), ADMIN_PAGE_SIZE)
            .with_search(search::server_search(self.active_tab, tab, &self.search))
    }

    /// Fetches all three tables for the current pages and search.
    pub async fn refresh(&mut self) -> BookingResult<()> {
        let result = self.fetch_all().await;
        if let Err(err) = &result {
            self.notice = Some(Notice::Failure(user_message("Fetch dashboard data", err)));
        }
        result
    }

    async fn fetch_all(&mut self) -> BookingResult<()> {
        let users = self.api.list_users(self.request(DashboardTab::Users)).await?;
        let venues = self
            .api
            .list_venues_admin(self.request(DashboardTab::Venues))
            .await?;
        let bookings = self
            .api
            .list_bookings(self.request(DashboardTab::Bookings), true)
            .await?;

        debug!(
            "Loaded {} users, {} venues, {} bookings",
            users.content.len(),
            venues.content.len(),
            bookings.content.len()
        );

        self.users = users.content;
        self.total_users = users.total_elements;
        self.users_page.update_total(users.total_pages);

        self.venues = venues.content;
        self.total_venues = venues.total_elements;
        self.venues_page.update_total(venues.total_pages);

        self.bookings = bookings.content;
        self.total_bookings = bookings.total_elements;
        self.bookings_page.update_total(bookings.total_pages);

        Ok(())
    }

    /// Opens `tab`, or closes it when it is already open, then refetches.
    pub async fn toggle_tab(&mut self, tab: DashboardTab) -> BookingResult<()> {
        self.active_tab = search::toggle(self.active_tab, tab);
        self.refresh().await
    }

    /// Sets the search term and returns the open table to its first page.
    pub async fn set_search(&mut self, term: impl Into<String>) -> BookingResult<()> {
        self.search = term.into();
        if let Some(tab) = self.active_tab {
            self.cursor_mut(tab).reset();
        }
        self.refresh().await
    }

    pub async fn go_to_page(&mut self, tab: DashboardTab, page: u32) -> BookingResult<()> {
        self.cursor_mut(tab).select(page);
        self.refresh().await
    }

    pub async fn previous_page(&mut self, tab: DashboardTab) -> BookingResult<()> {
        self.cursor_mut(tab).previous();
        self.refresh().await
    }

    pub async fn next_page(&mut self, tab: DashboardTab) -> BookingResult<()> {
        self.cursor_mut(tab).next();
        self.refresh().await
    }

    pub async fn cancel_booking(&mut self, booking_id: i64) -> BookingResult<()> {
        info!("Admin {} cancelling booking {}", self.session.user_id, booking_id);
        let result = match ensure_cancellable(&self.bookings, booking_id) {
            Ok(()) => self.api.cancel_booking(booking_id).await,
            Err(err) => Err(err),
        };
        settle(
            &mut self.notice,
            "Cancel booking",
            "Booking cancelled successfully",
            result,
        )?;
        self.refresh().await
    }

    /// Approves a venue. The loaded row flips to approved without a refetch.
    pub async fn approve_venue(&mut self, venue_id: i64) -> BookingResult<()> {
        info!("Admin {} approving venue {}", self.session.user_id, venue_id);
        let result = self.api.approve_venue(venue_id).await;
        settle(&mut self.notice, "Approve venue", "Venue Approved!", result)?;

        if let Some(venue) = self.venues.iter_mut().find(|v| v.id == venue_id) {
            venue.status = VenueStatus::Approved;
        }
        Ok(())
    }

    pub async fn update_role(&mut self, user_id: i64, role: Role) -> BookingResult<()> {
        info!("Admin {} changing role of user {} to {}", self.session.user_id, user_id, role);
        let result = self.api.update_user_role(user_id, role).await;
        settle(&mut self.notice, "Update role", "Role updated", result)?;
        self.refresh().await
    }

    /// Saves an edit to one of the loaded bookings.
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
            "Booking updated successfully",
            result,
        )?;
        self.refresh().await
    }

    /// Bookings to display, narrowed by the search term on the bookings tab.
    pub fn filtered_bookings(&self) -> Vec<&Booking> {
        search::filter_bookings(
            &self.bookings,
            &self.venues,
            &self.users,
            &self.search,
            self.active_tab,
        )
    }

    pub fn venues_owned_by(&self, user_id: i64) -> Vec<&Venue> {
        search::venues_owned_by(&self.venues, user_id)
    }
}
