use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Method, RequestBuilder, Response,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use sportzone_core::{
    errors::{BookingError, BookingResult},
    models::{
        booking::{Booking, NewBooking},
        page::{Page, PageRequest},
        user::{Role, User},
        venue::{ImageUpload, NewVenue, Venue, VenueUpdate},
    },
    session::Session,
};
use tracing::{debug, warn};

use crate::{api::SportzoneApi, config::ClientConfig};

/// HTTP client for the booking backend.
///
/// One `reqwest::Client` (and its connection pool) is shared by every call.
/// The session's bearer token, when there is one, goes on every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> eyre::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            http,
            config,
            token: None,
        })
    }

    pub fn with_session(mut self, session: &Session) -> Self {
        self.token = session.token.clone();
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.endpoint(path);
        debug!("{} {}", method, url);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> BookingResult<Response> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!("Backend returned {}: {}", status, message);

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BookingError::NotFound(if message.is_empty() {
                "Requested resource does not exist".to_string()
            } else {
                message
            }));
        }
        Err(BookingError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> BookingResult<T> {
        let body = self.send(builder).await?.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|e| BookingError::Decode(e.to_string()))
    }

    async fn execute(&self, builder: RequestBuilder) -> BookingResult<()> {
        self.send(builder).await?;
        Ok(())
    }
}

#[async_trait]
impl SportzoneApi for ApiClient {
    async fn list_users(&self, request: PageRequest) -> BookingResult<Page<User>> {
        self.fetch(self.request(Method::GET, "/api/users").query(&request.query_pairs()))
            .await
    }

    async fn update_user_role(&self, user_id: i64, role: Role) -> BookingResult<()> {
        self.execute(
            self.request(Method::PUT, &format!("/api/users/{user_id}"))
                .json(&json!({ "role": role })),
        )
        .await
    }

    async fn list_venues_admin(&self, request: PageRequest) -> BookingResult<Page<Venue>> {
        self.fetch(
            self.request(Method::GET, "/api/venues/admin/all")
                .query(&request.query_pairs()),
        )
        .await
    }

    async fn venues_by_owner(&self, owner_id: i64) -> BookingResult<Vec<Venue>> {
        self.fetch(self.request(Method::GET, &format!("/api/venues/owner/{owner_id}")))
            .await
    }

    async fn get_venue(&self, venue_id: i64) -> BookingResult<Venue> {
        self.fetch(self.request(Method::GET, &format!("/api/venues/{venue_id}")))
            .await
    }

    async fn create_venue(&self, venue: NewVenue, images: Vec<ImageUpload>) -> BookingResult<()> {
        let venue_json =
            serde_json::to_string(&venue).map_err(|e| BookingError::Internal(Box::new(e)))?;
        let mut form = Form::new().part(
            "venue",
            Part::text(venue_json)
                .mime_str("application/json")
                .map_err(transport)?,
        );
        for image in images {
            form = form.part("images", image_part(image)?);
        }

        self.execute(self.request(Method::POST, "/api/venues").multipart(form))
            .await
    }

    async fn update_venue(&self, venue_id: i64, update: VenueUpdate) -> BookingResult<()> {
        self.execute(
            self.request(Method::PUT, &format!("/api/venues/{venue_id}"))
                .json(&update),
        )
        .await
    }

    async fn approve_venue(&self, venue_id: i64) -> BookingResult<()> {
        self.execute(self.request(Method::PUT, &format!("/api/venues/{venue_id}/approve")))
            .await
    }

    async fn delete_venue(&self, venue_id: i64) -> BookingResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/api/venues/{venue_id}")))
            .await
    }

    async fn delete_court(&self, court_id: i64) -> BookingResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/api/venues/courts/{court_id}")))
            .await
    }

    async fn upload_venue_image(&self, venue_id: i64, image: ImageUpload) -> BookingResult<()> {
        let form = Form::new().part("image", image_part(image)?);
        self.execute(
            self.request(Method::POST, &format!("/api/venues/{venue_id}/images"))
                .multipart(form),
        )
        .await
    }

    async fn delete_venue_image(&self, image_id: i64) -> BookingResult<()> {
        self.execute(self.request(Method::DELETE, &format!("/api/venues/images/{image_id}")))
            .await
    }

    async fn list_bookings(&self, request: PageRequest, upcoming: bool) -> BookingResult<Page<Booking>> {
        let mut query = request.query_pairs();
        query.push(("upcoming", upcoming.to_string()));
        self.fetch(self.request(Method::GET, "/api/bookings").query(&query))
            .await
    }

    async fn venue_bookings(&self, venue_id: i64, request: PageRequest) -> BookingResult<Page<Booking>> {
        self.fetch(
            self.request(Method::GET, &format!("/api/bookings/venue/{venue_id}"))
                .query(&request.query_pairs()),
        )
        .await
    }

    async fn create_booking(&self, booking: NewBooking) -> BookingResult<()> {
        self.execute(self.request(Method::POST, "/api/bookings").json(&booking))
            .await
    }

    async fn update_booking(&self, booking: Booking) -> BookingResult<()> {
        self.execute(
            self.request(Method::PUT, &format!("/api/bookings/{}", booking.id))
                .json(&booking),
        )
        .await
    }

    async fn cancel_booking(&self, booking_id: i64) -> BookingResult<()> {
        self.execute(self.request(Method::PUT, &format!("/api/bookings/{booking_id}/cancel")))
            .await
    }
}

fn transport(err: reqwest::Error) -> BookingError {
    BookingError::Transport(eyre::Report::new(err))
}

fn image_part(image: ImageUpload) -> BookingResult<Part> {
    let mime = image_mime(&image.file_name);
    Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(mime)
        .map_err(transport)
}

fn image_mime(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Pulls a readable message out of an error body.
///
/// Prefers a stringified `errors` object, which carries field-level
/// detail, then the JSON `message` field, then the raw body text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => {
            if let Some(errors) = map.get("errors") {
                return format!("Validation Failed: {errors}");
            }
            if let Some(Value::String(message)) = map.get("message") {
                return message.clone();
            }
            if let Some(Value::String(error)) = map.get("error") {
                return error.clone();
            }
            body.trim().to_string()
        }
        Ok(Value::String(message)) => message,
        _ => body.trim().to_string(),
    }
}
