use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid booking window: {0}")]
    InvalidWindow(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Transport(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    /// True for failures raised before anything was sent to the backend.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            BookingError::InvalidWindow(_)
                | BookingError::Validation(_)
                | BookingError::Authorization(_)
        )
    }
}

/// Text a dashboard shows for a failed action.
///
/// Local validation failures are shown as-is. Backend failures show the
/// message the backend returned, prefixed with the action that failed.
pub fn user_message(action: &str, err: &BookingError) -> String {
    match err {
        BookingError::InvalidWindow(msg) | BookingError::Validation(msg) => msg.clone(),
        BookingError::Authorization(_) => "Access Denied".to_string(),
        BookingError::NotFound(msg) => format!("{action}: {msg}"),
        BookingError::Api { message, .. } if !message.is_empty() => {
            format!("{action}: {message}")
        }
        _ => format!("Failed to {}", action.to_lowercase()),
    }
}
