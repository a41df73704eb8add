//! Geotagging for JPEG photos: read and write the EXIF GPS position, find
//! photos without one, and pull coordinates out of map links.

pub mod config;
pub mod core;
pub mod models;

pub use crate::core::link::extract_from_link;
pub use crate::core::metadata::{GeotagEngine, GeotagError};
pub use crate::models::Coordinate;
