//! # SportZone Core
//!
//! Domain types shared by the SportZone client and dashboard crates: typed
//! API records, the session context, pagination and search helpers, and the
//! booking window computation with next-day rollover.

pub mod errors;
pub mod models;
pub mod search;
pub mod session;
pub mod timestamp;
pub mod window;
