//! HTTP request handlers organized by audience.

pub mod exchange;
pub mod health;
pub mod share;
