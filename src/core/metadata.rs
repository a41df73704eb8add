use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::core::container::ExifContainer;
use crate::models::{Coordinate, GpsBlock};

#[derive(Debug, Error)]
pub enum GeotagError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("cannot load EXIF from {}: {reason}", .path.display())]
    ContainerLoad { path: PathBuf, reason: String },

    #[error("no complete GPS block")]
    MissingGpsBlock,

    #[error("zero denominator in GPS {component}")]
    DivisionByZero { component: &'static str },

    #[error("cannot write EXIF to {}: {reason}", .path.display())]
    Persist { path: PathBuf, reason: String },

    #[error("not a folder: {}", .0.display())]
    InvalidFolder(PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl GeotagError {
    pub fn container_load(path: &Path, reason: impl ToString) -> Self {
        Self::ContainerLoad {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn persist(path: &Path, reason: impl ToString) -> Self {
        Self::Persist {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeotagError>;

/// Stateless entry points for reading, writing and probing GPS data in JPEG
/// files. Every call loads the file afresh.
pub struct GeotagEngine;

impl GeotagEngine {
    /// Best effort: unreadable files, missing blocks and undecodable values
    /// all come back as `None`.
    pub fn read_coordinates(path: &Path) -> Option<Coordinate> {
        match Self::try_read_coordinates(path) {
            Ok(coordinate) => Some(coordinate),
            Err(err) => {
                debug!("no coordinates for {}: {err}", path.display());
                None
            }
        }
    }

    /// Like [`GeotagEngine::read_coordinates`] but keeps the reason.
    pub fn try_read_coordinates(path: &Path) -> Result<Coordinate> {
        let container = ExifContainer::load(path)?;
        container.gps_block().coordinate()
    }

    /// Replaces the whole GPS block of `path` with one for `latitude` /
    /// `longitude`. On error the file is left as it was.
    pub fn write_coordinates(path: &Path, latitude: f64, longitude: f64) -> Result<()> {
        if !path.exists() {
            return Err(GeotagError::FileNotFound(path.to_path_buf()));
        }

        let coordinate = Coordinate::new(latitude, longitude);
        let block = GpsBlock::from_coordinate(coordinate);

        let mut container = ExifContainer::load_or_empty(path)?;
        container.replace_gps_block(&block);
        container.persist(path)?;

        info!("geotagged {} at {}", path.display(), coordinate.format(7));
        Ok(())
    }

    /// `true` for anything that does not carry both a latitude and a
    /// longitude, including files that cannot be read at all.
    pub fn has_no_gps(path: &Path) -> bool {
        match ExifContainer::load(path) {
            Ok(container) => !container.gps_block().has_position(),
            Err(err) => {
                debug!("treating {} as untagged: {err}", path.display());
                true
            }
        }
    }
}
