use sportzone_client::SportzoneApi;
use sportzone_core::{
    errors::{user_message, BookingError, BookingResult},
    models::{
        booking::NewBooking,
        user::Role,
        venue::{Court, CourtDraft, ImageUpload, SportType, Venue, VenueUpdate},
    },
    session::Session,
};
use tracing::{debug, info};

use crate::{forms::BlockForm, settle, Notice};

/// Manager view of a single venue.
///
/// Owners adjust opening hours, courts and the gallery here, and block
/// court time for maintenance. Every change is followed by a fresh fetch of
/// the venue.
pub struct VenueDashboard<A: SportzoneApi> {
    api: A,
    session: Session,
    venue: Option<Venue>,
    pub open_time: String,
    pub close_time: String,
    selected_sport: Option<SportType>,
    pub notice: Option<Notice>,
}

impl<A: SportzoneApi> VenueDashboard<A> {
    pub fn new(api: A, session: Session) -> BookingResult<Self> {
        session.require_role(Role::VenueOwner)?;
        Ok(Self {
            api,
            session,
            venue: None,
            open_time: String::new(),
            close_time: String::new(),
            selected_sport: None,
            notice: None,
        })
    }

    pub fn venue(&self) -> Option<&Venue> {
        self.venue.as_ref()
    }

    pub fn selected_sport(&self) -> Option<SportType> {
        self.selected_sport
    }

    fn venue_id(&self) -> BookingResult<i64> {
        self.venue
            .as_ref()
            .map(|v| v.id)
            .ok_or_else(|| BookingError::Validation("Venue not loaded".to_string()))
    }

    /// Fetches the venue, seeds the timing fields and selects its first sport.
    pub async fn load(&mut self, venue_id: i64) -> BookingResult<()> {
        let venue = match self.api.get_venue(venue_id).await {
            Ok(venue) => venue,
            Err(err) => {
                self.notice = Some(Notice::Failure(user_message("Fetch venue", &err)));
                return Err(err);
            }
        };

        debug!("Loaded venue {} with {} courts", venue.id, venue.courts.len());
        self.open_time = venue.open_time().to_string();
        self.close_time = venue.close_time().to_string();
        self.selected_sport = venue.sports().first().copied();
        self.venue = Some(venue);
        Ok(())
    }

    async fn refetch(&mut self) -> BookingResult<()> {
        let venue_id = self.venue_id()?;
        let venue = match self.api.get_venue(venue_id).await {
            Ok(venue) => venue,
            Err(err) => {
                self.notice = Some(Notice::Failure(user_message("Fetch venue", &err)));
                return Err(err);
            }
        };

        let sports = venue.sports();
        if !self.selected_sport.is_some_and(|sport| sports.contains(&sport)) {
            self.selected_sport = sports.first().copied();
        }
        self.venue = Some(venue);
        Ok(())
    }

    pub fn sports(&self) -> Vec<SportType> {
        self.venue.as_ref().map(Venue::sports).unwrap_or_default()
    }

    pub fn select_sport(&mut self, sport: SportType) {
        self.selected_sport = Some(sport);
    }

    pub fn courts_for_selected_sport(&self) -> Vec<&Court> {
        match (&self.venue, self.selected_sport) {
            (Some(venue), Some(sport)) => venue.courts_for(sport),
            _ => Vec::new(),
        }
    }

    /// Marks a court unavailable for the form's window.
    ///
    /// The window is computed before anything is sent; an incomplete or
    /// malformed form never reaches the backend. Returns the posted record.
    pub async fn block_slot(&mut self, form: &BlockForm) -> BookingResult<NewBooking> {
        let result = self.post_block(form).await;
        settle(
            &mut self.notice,
            "Block slot",
            "Slot Blocked Successfully!",
            result,
        )
    }

    async fn post_block(&self, form: &BlockForm) -> BookingResult<NewBooking> {
        let venue_id = self.venue_id()?;
        let record = form.to_record(self.session.user_id, venue_id)?;
        if self
            .venue
            .as_ref()
            .and_then(|v| v.court(record.court_id))
            .is_none()
        {
            return Err(BookingError::NotFound(format!(
                "Court with ID {} does not belong to venue {}",
                record.court_id, venue_id
            )));
        }

        info!(
            "Blocking court {} from {} to {}",
            record.court_id, record.start_time, record.end_time
        );
        self.api.create_booking(record.clone()).await?;
        Ok(record)
    }

    /// Saves new opening hours.
    pub async fn update_timings(&mut self, open_time: &str, close_time: &str) -> BookingResult<()> {
        let result = match self.venue_id() {
            Ok(venue_id) => {
                self.api
                    .update_venue(venue_id, VenueUpdate::timings(open_time, close_time))
                    .await
            }
            Err(err) => Err(err),
        };
        settle(&mut self.notice, "Update timings", "Store timings updated!", result)?;

        self.open_time = open_time.to_string();
        self.close_time = close_time.to_string();
        self.refetch().await
    }

    pub async fn add_court(&mut self, draft: &CourtDraft) -> BookingResult<()> {
        let result = match (self.venue_id(), draft.to_court()) {
            (Ok(venue_id), Ok(court)) => {
                info!("Adding {} court {} to venue {}", court.sport_type, court.name, venue_id);
                self.api.update_venue(venue_id, VenueUpdate::add_court(court)).await
            }
            (Err(err), _) | (_, Err(err)) => Err(err),
        };
        settle(&mut self.notice, "Add court", "Court Added Successfully!", result)?;
        self.refetch().await
    }

    pub async fn delete_court(&mut self, court_id: i64) -> BookingResult<()> {
        info!("Deleting court {}", court_id);
        let result = self.api.delete_court(court_id).await;
        settle(&mut self.notice, "Delete court", "Court Deleted", result)?;
        self.refetch().await
    }

    /// Uploads a gallery image. Files over the size cap are rejected locally.
    pub async fn upload_image(&mut self, image: ImageUpload) -> BookingResult<()> {
        let result = match (self.venue_id(), image.validate()) {
            (Ok(venue_id), Ok(())) => self.api.upload_venue_image(venue_id, image).await,
            (Err(err), _) | (_, Err(err)) => Err(err),
        };
        settle(&mut self.notice, "Upload image", "Image Uploaded!", result)?;
        self.refetch().await
    }

    pub async fn delete_image(&mut self, image_id: i64) -> BookingResult<()> {
        let result = self.api.delete_venue_image(image_id).await;
        settle(&mut self.notice, "Delete image", "Image Deleted", result)?;
        self.refetch().await
    }
}
