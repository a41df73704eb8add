//! Coordinates embedded in map-service URLs.
//!
//! Two shapes are recognised, tried in order:
//!
//! * `@<lat>,<lon>`: the viewport centre of a map view.
//! * `!3d<lat>!4d<lon>`: the pin of a place page.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Coordinate;

static VIEWPORT_CENTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@([\d.\-]+),([\d.\-]+)").expect("viewport pattern should compile")
});

static PLACE_PIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!3d([\d.\-]+)!4d([\d.\-]+)").expect("place pin pattern should compile")
});

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkPattern {
    ViewportCenter,
    PlacePin,
}

/// Outcome of a single pattern against a link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinkMatch {
    NoMatch,
    /// The pattern matched but a capture is not a number.
    Invalid,
    Found(Coordinate),
}

impl LinkPattern {
    /// Match order.
    pub const ALL: [LinkPattern; 2] = [Self::ViewportCenter, Self::PlacePin];

    pub fn label(self) -> &'static str {
        match self {
            Self::ViewportCenter => "viewport centre",
            Self::PlacePin => "place pin",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::ViewportCenter => &*VIEWPORT_CENTER,
            Self::PlacePin => &*PLACE_PIN,
        }
    }

    pub fn captures(self, link: &str) -> LinkMatch {
        let Some(captures) = self.regex().captures(link) else {
            return LinkMatch::NoMatch;
        };

        let latitude = captures[1].parse::<f64>();
        let longitude = captures[2].parse::<f64>();

        match (latitude, longitude) {
            (Ok(latitude), Ok(longitude)) => LinkMatch::Found(Coordinate::new(latitude, longitude)),
            _ => LinkMatch::Invalid,
        }
    }
}

/// First matching pattern wins. A pattern that matches with unparseable
/// numbers ends the search with `None`. Values are not range-checked.
pub fn extract_from_link(link: &str) -> Option<Coordinate> {
    for pattern in LinkPattern::ALL {
        match pattern.captures(link) {
            LinkMatch::NoMatch => continue,
            LinkMatch::Invalid => {
                debug!("{} pattern matched with invalid numbers", pattern.label());
                return None;
            }
            LinkMatch::Found(coordinate) => return Some(coordinate),
        }
    }

    None
}
