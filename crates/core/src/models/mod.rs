pub mod booking;
pub mod page;
pub mod user;
pub mod venue;
