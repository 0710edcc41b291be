use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sportzone_client::{client::error_message, ApiClient, ClientConfig, SportzoneApi};
use sportzone_core::{
    errors::BookingError,
    models::{
        booking::BookingStatus,
        page::PageRequest,
        user::Role,
        venue::{ImageUpload, NewCourt, NewVenue, SportType, VenueUpdate},
    },
    session::Session,
    window::compute,
};
use tokio::net::TcpListener;

/// Everything the fake backend saw, keyed by route.
#[derive(Default)]
struct Recorded {
    queries: HashMap<String, HashMap<String, String>>,
    bodies: HashMap<String, Value>,
    headers: HashMap<String, String>,
    parts: Vec<(String, Option<String>, Option<String>, usize)>,
}

type Shared = Arc<Mutex<Recorded>>;

fn user_page() -> Value {
    json!({
        "content": [
            {"id": 1, "name": "Asha", "email": "asha@example.com", "role": "ADMIN"},
            {"id": 2, "name": "Ravi", "email": "ravi@example.com", "role": "VENUE_OWNER"}
        ],
        "totalPages": 2,
        "totalElements": 12
    })
}

fn venue_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Green Turf",
        "location": "Pune",
        "description": "Floodlit five-a-side",
        "imageUrl": "/images/venue-images/Venue1.1.jpg",
        "ownerId": 2,
        "status": "APPROVED",
        "openTime": "06:00",
        "closeTime": "23:00",
        "courts": [{"id": 4, "name": "Pitch A", "sportType": "Football", "pricePerHour": 1200.0}],
        "images": [{"id": 8, "imageUrl": "/images/venue-images/Venue1.1.jpg"}]
    })
}

async fn users(State(rec): State<Shared>, Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    rec.lock().unwrap().queries.insert("users".into(), q);
    Json(user_page())
}

async fn update_user(State(rec): State<Shared>, Path(id): Path<i64>, Json(body): Json<Value>) -> StatusCode {
    rec.lock().unwrap().bodies.insert(format!("user:{id}"), body);
    StatusCode::OK
}

async fn owner_venues(State(rec): State<Shared>, headers: HeaderMap, Path(owner): Path<i64>) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    rec.lock().unwrap().headers.insert("authorization".into(), auth);
    Json(json!([venue_json(owner * 10)]))
}

async fn broken_venue(Path(_id): Path<i64>) -> Json<Value> {
    Json(json!({"id": 3, "location": "Pune"}))
}

async fn create_venue(State(rec): State<Shared>, mut multipart: Multipart) -> StatusCode {
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default();
        if name == "venue" {
            let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            rec.lock().unwrap().bodies.insert("venue".into(), body);
        }
        rec.lock()
            .unwrap()
            .parts
            .push((name, file_name, content_type, bytes.len()));
    }
    StatusCode::OK
}

async fn update_venue(State(rec): State<Shared>, Path(id): Path<i64>, Json(body): Json<Value>) -> StatusCode {
    rec.lock().unwrap().bodies.insert(format!("venue:{id}"), body);
    StatusCode::OK
}

async fn bookings(State(rec): State<Shared>, Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    rec.lock().unwrap().queries.insert("bookings".into(), q);
    Json(json!({
        "content": [{
            "id": 77,
            "userId": 1,
            "courtId": 4,
            "venueId": 10,
            "startTime": "2024-06-15T22:00",
            "endTime": "2024-06-16T02:00",
            "amount": 0,
            "status": "BLOCKED"
        }],
        "totalPages": 1,
        "totalElements": 1
    }))
}

async fn create_booking(State(rec): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    rec.lock().unwrap().bodies.insert("booking".into(), body);
    (StatusCode::OK, Json(json!({"id": 78})))
}

async fn update_booking(Path(_id): Path<i64>, Json(_body): Json<Value>) -> impl IntoResponse {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": "Validation failed",
            "errors": {"endTime": "must be after startTime"}
        })),
    )
}

async fn cancel_booking(Path(_id): Path<i64>) -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({"message": "Booking not found"})))
}

async fn venue_bookings(Path(_id): Path<i64>) -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn delete_court(Path(_id): Path<i64>) -> StatusCode {
    StatusCode::OK
}

async fn spawn_backend() -> (String, Shared) {
    let recorded: Shared = Arc::new(Mutex::new(Recorded::default()));
    let router = Router::new()
        .route("/api/users", get(users))
        .route("/api/users/:id", put(update_user))
        .route("/api/venues", post(create_venue))
        .route("/api/venues/:id", get(broken_venue).put(update_venue))
        .route("/api/venues/owner/:owner", get(owner_venues))
        .route("/api/venues/courts/:id", delete(delete_court))
        .route("/api/bookings", get(bookings).post(create_booking))
        .route("/api/bookings/:id", put(update_booking))
        .route("/api/bookings/:id/cancel", put(cancel_booking))
        .route("/api/bookings/venue/:id", get(venue_bookings))
        .with_state(recorded.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/"), recorded)
}

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(ClientConfig::new(base_url)).expect("Failed to build client")
}

#[tokio::test]
async fn test_list_users_sends_page_and_search() {
    let (url, recorded) = spawn_backend().await;

    let page = client(&url)
        .list_users(PageRequest::new(1, 10).with_search(Some("asha")))
        .await
        .expect("users page");

    assert_eq!(page.total_elements, 12);
    assert_eq!(page.content[1].role, Role::VenueOwner);

    let query = recorded.lock().unwrap().queries["users"].clone();
    assert_eq!(query["page"], "1");
    assert_eq!(query["size"], "10");
    assert_eq!(query["search"], "asha");
}

#[tokio::test]
async fn test_list_bookings_flags_upcoming() {
    let (url, recorded) = spawn_backend().await;

    let page = client(&url)
        .list_bookings(PageRequest::new(0, 10), true)
        .await
        .expect("bookings page");

    assert_eq!(page.content[0].status, BookingStatus::Blocked);
    assert_eq!(page.content[0].end_time.to_string(), "2024-06-16 02:00:00");

    let query = recorded.lock().unwrap().queries["bookings"].clone();
    assert_eq!(query["upcoming"], "true");
    assert!(!query.contains_key("search"));
}

#[test_log::test(tokio::test)]
async fn test_create_booking_posts_exact_timestamps() {
    let (url, recorded) = spawn_backend().await;
    let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let record = compute(date, "23:00", "01:00").unwrap().blocked(1, 4, 10);

    client(&url).create_booking(record).await.expect("booking created");

    let body = recorded.lock().unwrap().bodies["booking"].clone();
    assert_eq!(body["startTime"], "2024-01-31T23:00:00");
    assert_eq!(body["endTime"], "2024-02-01T01:00:00");
    assert_eq!(body["status"], "BLOCKED");
    assert_eq!(body["amount"], json!(0.0));
}

#[tokio::test]
async fn test_bearer_token_from_session() {
    let (url, recorded) = spawn_backend().await;
    let session = Session::new(2, Role::VenueOwner).with_token("jwt-token");

    let venues = client(&url)
        .with_session(&session)
        .venues_by_owner(2)
        .await
        .expect("owner venues");

    assert_eq!(venues[0].id, 20);
    assert_eq!(venues[0].courts[0].sport_type, SportType::Football);
    assert_eq!(
        recorded.lock().unwrap().headers["authorization"],
        "Bearer jwt-token"
    );
}

#[tokio::test]
async fn test_update_role_body() {
    let (url, recorded) = spawn_backend().await;

    client(&url)
        .update_user_role(6, Role::VenueOwner)
        .await
        .expect("role updated");

    assert_eq!(
        recorded.lock().unwrap().bodies["user:6"],
        json!({"role": "VENUE_OWNER"})
    );
}

#[tokio::test]
async fn test_update_venue_sends_only_changed_fields() {
    let (url, recorded) = spawn_backend().await;

    client(&url)
        .update_venue(3, VenueUpdate::timings("06:00", "22:00"))
        .await
        .expect("venue updated");

    assert_eq!(
        recorded.lock().unwrap().bodies["venue:3"],
        json!({"openTime": "06:00", "closeTime": "22:00"})
    );
}

#[tokio::test]
async fn test_create_venue_multipart() {
    let (url, recorded) = spawn_backend().await;
    let venue = NewVenue {
        name: "Ace Courts".to_string(),
        location: "Chennai".to_string(),
        description: "Indoor".to_string(),
        owner_id: 2,
        courts: vec![NewCourt {
            name: "Court 1".to_string(),
            sport_type: SportType::Badminton,
            price_per_hour: 400.0,
        }],
    };
    let images = vec![
        ImageUpload::new("front.jpg", vec![1; 64]),
        ImageUpload::new("side.png", vec![2; 32]),
    ];

    client(&url)
        .create_venue(venue, images)
        .await
        .expect("venue created");

    let recorded = recorded.lock().unwrap();
    assert_eq!(recorded.bodies["venue"]["ownerId"], 2);
    assert_eq!(recorded.bodies["venue"]["courts"][0]["sportType"], "Badminton");
    assert_eq!(recorded.parts.len(), 3);
    assert_eq!(recorded.parts[0].0, "venue");
    assert_eq!(recorded.parts[0].2.as_deref(), Some("application/json"));
    assert_eq!(
        recorded.parts[1],
        (
            "images".to_string(),
            Some("front.jpg".to_string()),
            Some("image/jpeg".to_string()),
            64
        )
    );
    assert_eq!(recorded.parts[2].2.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn test_not_found_maps_message() {
    let (url, _) = spawn_backend().await;

    let err = client(&url).cancel_booking(5).await.unwrap_err();

    match err {
        BookingError::NotFound(message) => assert_eq!(message, "Booking not found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_errors_are_stringified() {
    let (url, _) = spawn_backend().await;
    let page = client(&url)
        .list_bookings(PageRequest::new(0, 10), false)
        .await
        .unwrap();

    let err = client(&url)
        .update_booking(page.content[0].clone())
        .await
        .unwrap_err();

    match err {
        BookingError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(
                message,
                r#"Validation Failed: {"endTime":"must be after startTime"}"#
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let (url, _) = spawn_backend().await;

    let err = client(&url)
        .venue_bookings(1, PageRequest::new(0, 5))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Api { status: 500, ref message } if message == "boom"));
}

#[tokio::test]
async fn test_unexpected_shape_is_decode_error() {
    let (url, _) = spawn_backend().await;

    let err = client(&url).get_venue(3).await.unwrap_err();

    assert!(matches!(err, BookingError::Decode(_)));
}

#[tokio::test]
async fn test_empty_success_body_is_fine_for_mutations() {
    let (url, _) = spawn_backend().await;

    client(&url).delete_court(4).await.expect("court deleted");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .cancel_booking(1)
        .await
        .unwrap_err();

    assert!(matches!(err, BookingError::Transport(_)));
}

#[test]
fn test_error_message_extraction() {
    assert_eq!(error_message(r#"{"message":"Venue not found"}"#), "Venue not found");
    assert_eq!(
        error_message(r#"{"errors":{"amount":"must not be null"}}"#),
        r#"Validation Failed: {"amount":"must not be null"}"#
    );
    assert_eq!(
        error_message(
            r#"{"message":"Validation failed","errors":{"endTime":"must be after startTime"}}"#
        ),
        r#"Validation Failed: {"endTime":"must be after startTime"}"#
    );
    assert_eq!(error_message(r#"{"error":"Forbidden"}"#), "Forbidden");
    assert_eq!(error_message(r#""Court already booked""#), "Court already booked");
    assert_eq!(error_message(" Internal Server Error \n"), "Internal Server Error");
}

#[test]
fn test_config_endpoint() {
    let config = ClientConfig::new("http://localhost:8080/");

    assert_eq!(config.api_url, "http://localhost:8080");
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.endpoint("/api/venues"), "http://localhost:8080/api/venues");
    assert_eq!(config.endpoint("api/users"), "http://localhost:8080/api/users");
}
