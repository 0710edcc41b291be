use async_trait::async_trait;
use sportzone_core::{
    errors::BookingResult,
    models::{
        booking::{Booking, NewBooking},
        page::{Page, PageRequest},
        user::{Role, User},
        venue::{ImageUpload, NewVenue, Venue, VenueUpdate},
    },
};

/// Operations the dashboards need from the booking backend.
///
/// Reads decode into typed records. Mutations only report success, screens
/// refetch whatever they display afterwards.
#[async_trait]
pub trait SportzoneApi: Send + Sync {
    async fn list_users(&self, request: PageRequest) -> BookingResult<Page<User>>;

    async fn update_user_role(&self, user_id: i64, role: Role) -> BookingResult<()>;

    async fn list_venues_admin(&self, request: PageRequest) -> BookingResult<Page<Venue>>;

    async fn venues_by_owner(&self, owner_id: i64) -> BookingResult<Vec<Venue>>;

    async fn get_venue(&self, venue_id: i64) -> BookingResult<Venue>;

    async fn create_venue(&self, venue: NewVenue, images: Vec<ImageUpload>) -> BookingResult<()>;

    async fn update_venue(&self, venue_id: i64, update: VenueUpdate) -> BookingResult<()>;

    async fn approve_venue(&self, venue_id: i64) -> BookingResult<()>;

    async fn delete_venue(&self, venue_id: i64) -> BookingResult<()>;

    async fn delete_court(&self, court_id: i64) -> BookingResult<()>;

    async fn upload_venue_image(&self, venue_id: i64, image: ImageUpload) -> BookingResult<()>;

    async fn delete_venue_image(&self, image_id: i64) -> BookingResult<()>;

    async fn list_bookings(&self, request: PageRequest, upcoming: bool) -> BookingResult<Page<Booking>>;

    async fn venue_bookings(&self, venue_id: i64, request: PageRequest) -> BookingResult<Page<Booking>>;

    async fn create_booking(&self, booking: NewBooking) -> BookingResult<()>;

    async fn update_booking(&self, booking: Booking) -> BookingResult<()>;

    async fn cancel_booking(&self, booking_id: i64) -> BookingResult<()>;
}
