//! # SportZone Client
//!
//! Typed access to the SportZone booking backend.
//!
//! - **Api**: the [`api::SportzoneApi`] trait the dashboard screens depend on
//! - **Client**: the reqwest implementation of that trait
//! - **Config**: environment configuration for reaching the backend
//! - **Mock**: a mockall double of the trait for screen tests
//!
//! Every response is mapped to a typed record at this boundary. Bodies that
//! do not match surface as `BookingError::Decode` rather than as partially
//! filled values.

/// Backend operations used by the dashboards
pub mod api;
/// HTTP implementation over reqwest
pub mod client;
/// Environment configuration
pub mod config;

pub mod mock;

pub use api::SportzoneApi;
pub use client::ApiClient;
pub use config::ClientConfig;
