use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Images accepted when a venue is first listed.
pub const MAX_VENUE_IMAGES: usize = 5;

pub const DEFAULT_OPEN_TIME: &str = "00:00";
pub const DEFAULT_CLOSE_TIME: &str = "24:00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VenueStatus {
    #[default]
    Pending,
    Approved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SportType {
    Cricket,
    Football,
    Badminton,
    Tennis,
    Basketball,
    Swimming,
}

impl SportType {
    pub const ALL: [SportType; 6] = [
        SportType::Cricket,
        SportType::Football,
        SportType::Badminton,
        SportType::Tennis,
        SportType::Basketball,
        SportType::Swimming,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SportType::Cricket => "Cricket",
            SportType::Football => "Football",
            SportType::Badminton => "Badminton",
            SportType::Tennis => "Tennis",
            SportType::Basketball => "Basketball",
            SportType::Swimming => "Swimming",
        }
    }
}

impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SportType {
    type Err = BookingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SportType::ALL
            .into_iter()
            .find(|sport| sport.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| BookingError::Validation(format!("Unknown sport type: {value}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: i64,
    pub name: String,
    pub sport_type: SportType,
    pub price_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourt {
    pub name: String,
    pub sport_type: SportType,
    pub price_per_hour: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueImage {
    pub id: i64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub owner_id: i64,
    #[serde(default, deserialize_with = "status_or_pending")]
    pub status: VenueStatus,
    #[serde(default)]
    pub open_time: Option<String>,
    #[serde(default)]
    pub close_time: Option<String>,
    #[serde(default)]
    pub courts: Vec<Court>,
    #[serde(default)]
    pub images: Vec<VenueImage>,
}

fn status_or_pending<'de, D>(deserializer: D) -> Result<VenueStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<VenueStatus>::deserialize(deserializer)?.unwrap_or_default())
}

impl Venue {
    pub fn open_time(&self) -> &str {
        self.open_time.as_deref().unwrap_or(DEFAULT_OPEN_TIME)
    }

    pub fn close_time(&self) -> &str {
        self.close_time.as_deref().unwrap_or(DEFAULT_CLOSE_TIME)
    }

    /// Distinct sport types, in the order their first court appears.
    pub fn sports(&self) -> Vec<SportType> {
        let mut sports = Vec::new();
        for court in &self.courts {
            if !sports.contains(&court.sport_type) {
                sports.push(court.sport_type);
            }
        }
        sports
    }

    pub fn courts_for(&self, sport: SportType) -> Vec<&Court> {
        self.courts
            .iter()
            .filter(|court| court.sport_type == sport)
            .collect()
    }

    pub fn court(&self, court_id: i64) -> Option<&Court> {
        self.courts.iter().find(|court| court.id == court_id)
    }
}

/// `venue` part of the multipart `POST /venues` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVenue {
    pub name: String,
    pub location: String,
    pub description: String,
    pub owner_id: i64,
    pub courts: Vec<NewCourt>,
}

/// Partial update for `PUT /venues/{id}`.
///
/// The backend only overwrites fields that are present and appends any
/// courts listed here to the existing ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courts: Vec<NewCourt>,
}

impl VenueUpdate {
    pub fn timings(open_time: &str, close_time: &str) -> Self {
        Self {
            open_time: Some(open_time.to_string()),
            close_time: Some(close_time.to_string()),
            ..Self::default()
        }
    }

    pub fn add_court(court: NewCourt) -> Self {
        Self {
            courts: vec![court],
            ..Self::default()
        }
    }
}

/// An image file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn validate(&self) -> BookingResult<()> {
        if self.bytes.len() > MAX_IMAGE_BYTES {
            return Err(BookingError::Validation(format!(
                "File {} is too large. Max size is 5MB.",
                self.file_name
            )));
        }
        Ok(())
    }
}

/// Court row as typed into a form, price still unparsed.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtDraft {
    pub name: String,
    pub sport_type: SportType,
    pub price_per_hour: String,
}

impl CourtDraft {
    pub fn new(name: impl Into<String>, sport_type: SportType, price_per_hour: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sport_type,
            price_per_hour: price_per_hour.into(),
        }
    }

    pub fn to_court(&self) -> BookingResult<NewCourt> {
        let name = self.name.trim();
        let price = self.price_per_hour.trim();
        if name.is_empty() || price.is_empty() {
            return Err(BookingError::Validation(
                "Please fill all court details".to_string(),
            ));
        }
        let price_per_hour = price
            .parse::<f64>()
            .map_err(|_| BookingError::Validation(format!("Invalid price: {price}")))?;
        if !price_per_hour.is_finite() || price_per_hour <= 0.0 {
            return Err(BookingError::Validation(format!(
                "Price must be positive: {price}"
            )));
        }
        Ok(NewCourt {
            name: name.to_string(),
            sport_type: self.sport_type,
            price_per_hour,
        })
    }
}

/// The "list new venue" form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueDraft {
    pub name: String,
    pub location: String,
    pub description: String,
    pub courts: Vec<NewCourt>,
    pub images: Vec<ImageUpload>,
}

impl VenueDraft {
    pub fn add_court(&mut self, draft: &CourtDraft) -> BookingResult<()> {
        self.courts.push(draft.to_court()?);
        Ok(())
    }

    pub fn remove_court(&mut self, index: usize) -> Option<NewCourt> {
        (index < self.courts.len()).then(|| self.courts.remove(index))
    }

    /// Replaces the picked images; rejected selections leave none picked.
    pub fn set_images(&mut self, images: Vec<ImageUpload>) -> BookingResult<()> {
        self.images.clear();
        if images.len() > MAX_VENUE_IMAGES {
            return Err(BookingError::Validation(
                "You can upload a maximum of 5 images.".to_string(),
            ));
        }
        for image in &images {
            image.validate()?;
        }
        self.images = images;
        Ok(())
    }

    pub fn to_new_venue(&self, owner_id: i64) -> BookingResult<NewVenue> {
        if self.name.trim().is_empty() {
            return Err(BookingError::Validation("Venue name is required".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(BookingError::Validation("Location is required".to_string()));
        }
        Ok(NewVenue {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.clone(),
            owner_id,
            courts: self.courts.clone(),
        })
    }
}
