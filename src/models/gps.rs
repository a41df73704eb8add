use crate::core::dms::{decimal_to_dms, dms_to_decimal};
use crate::core::metadata::{GeotagError, Result};
use crate::models::{Coordinate, Hemisphere};

/// An unsigned EXIF rational.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// `None` when the denominator is zero.
    pub fn to_f64(self) -> Option<f64> {
        if self.denominator == 0 {
            None
        } else {
            Some(f64::from(self.numerator) / f64::from(self.denominator))
        }
    }
}

/// Degrees, minutes and seconds as stored in `GPSLatitude` / `GPSLongitude`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DmsTriple {
    pub degrees: Rational,
    pub minutes: Rational,
    pub seconds: Rational,
}

impl DmsTriple {
    pub fn new(degrees: Rational, minutes: Rational, seconds: Rational) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// Takes the first three rationals; shorter inputs are not a valid triple.
    pub fn from_rationals<I>(rationals: I) -> Option<Self>
    where
        I: IntoIterator<Item = Rational>,
    {
        let mut iter = rationals.into_iter();
        let degrees = iter.next()?;
        let minutes = iter.next()?;
        let seconds = iter.next()?;
        Some(Self::new(degrees, minutes, seconds))
    }

    pub fn to_array(self) -> [Rational; 3] {
        [self.degrees, self.minutes, self.seconds]
    }
}

/// The four GPS IFD fields this crate reads and writes. Each hemisphere
/// reference travels with its triple.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GpsBlock {
    pub latitude_ref: Option<Hemisphere>,
    pub latitude: Option<DmsTriple>,
    pub longitude_ref: Option<Hemisphere>,
    pub longitude: Option<DmsTriple>,
}

impl GpsBlock {
    /// References come from the sign, triples from the magnitude, so a
    /// negative input still yields a positive triple.
    pub fn from_coordinate(coordinate: Coordinate) -> Self {
        Self {
            latitude_ref: Some(Hemisphere::for_latitude(coordinate.latitude)),
            latitude: Some(decimal_to_dms(coordinate.latitude.abs())),
            longitude_ref: Some(Hemisphere::for_longitude(coordinate.longitude)),
            longitude: Some(decimal_to_dms(coordinate.longitude.abs())),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.latitude_ref.is_some()
            && self.latitude.is_some()
            && self.longitude_ref.is_some()
            && self.longitude.is_some()
    }

    /// Latitude and longitude triples are both present, references aside.
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn coordinate(&self) -> Result<Coordinate> {
        match (
            self.latitude,
            self.latitude_ref,
            self.longitude,
            self.longitude_ref,
        ) {
            (Some(latitude), Some(latitude_ref), Some(longitude), Some(longitude_ref)) => {
                Ok(Coordinate::new(
                    dms_to_decimal(&latitude, latitude_ref)?,
                    dms_to_decimal(&longitude, longitude_ref)?,
                ))
            }
            _ => Err(GeotagError::MissingGpsBlock),
        }
    }
}
