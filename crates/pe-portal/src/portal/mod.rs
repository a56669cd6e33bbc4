//! Portal feature modules: one per view of the original site.

pub mod admin;
pub mod equipment;
pub mod fitness;
pub mod news;
pub mod reading;
pub mod stars;
