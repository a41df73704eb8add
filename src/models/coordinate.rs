use std::fmt;

use serde::{Deserialize, Serialize};

/// A WGS84 position in signed decimal degrees. Negative latitude is south,
/// negative longitude is west.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Nothing in the codec enforces the range; callers that care check it here.
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn format(&self, precision: usize) -> String {
        format!(
            "{:.prec$}, {:.prec$}",
            self.latitude,
            self.longitude,
            prec = precision
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parses an EXIF reference string such as `"N\0"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim_end_matches('\0').trim() {
            "N" | "n" => Some(Self::North),
            "S" | "s" => Some(Self::South),
            "E" | "e" => Some(Self::East),
            "W" | "w" => Some(Self::West),
            _ => None,
        }
    }

    pub fn for_latitude(value: f64) -> Self {
        if value >= 0.0 {
            Self::North
        } else {
            Self::South
        }
    }

    pub fn for_longitude(value: f64) -> Self {
        if value >= 0.0 {
            Self::East
        } else {
            Self::West
        }
    }

    pub fn is_negative(self) -> bool {
        matches!(self, Self::South | Self::West)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::North => "N",
            Self::South => "S",
            Self::East => "E",
            Self::West => "W",
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
