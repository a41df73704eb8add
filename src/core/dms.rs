//! Decimal degrees <-> EXIF degrees/minutes/seconds rationals.
//!
//! Degrees and minutes are whole numbers over 1. Seconds keep two decimals as
//! hundredths over 100.

use crate::core::metadata::{GeotagError, Result};
use crate::models::{DmsTriple, Hemisphere, Rational};

pub const SECONDS_DENOMINATOR: u32 = 100;

const HUNDREDTHS_PER_MINUTE: u32 = 60 * SECONDS_DENOMINATOR;

/// The sign is dropped; callers pick the hemisphere separately.
///
/// Degrees and minutes are truncated, seconds are rounded to the nearest
/// hundredth. A rounding that reaches a full minute carries upward, so
/// 10° 59' 59.999" encodes as `11/1, 0/1, 0/100` rather than
/// `10/1, 59/1, 6000/100`. Both decode to the same value.
pub fn decimal_to_dms(value: f64) -> DmsTriple {
    let total_seconds = value.abs() * 3600.0;
    let seconds = total_seconds.rem_euclid(60.0);
    // Whole minutes are derived from the remainder so both always agree.
    let total_minutes = ((total_seconds - seconds) / 60.0).round() as u64;
    let mut degrees = u32::try_from(total_minutes / 60).unwrap_or(u32::MAX);
    let mut minutes = (total_minutes % 60) as u32;
    let mut hundredths = (seconds * f64::from(SECONDS_DENOMINATOR)).round() as u32;

    if hundredths >= HUNDREDTHS_PER_MINUTE {
        hundredths -= HUNDREDTHS_PER_MINUTE;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        degrees = degrees.saturating_add(1);
    }

    DmsTriple::new(
        Rational::new(degrees, 1),
        Rational::new(minutes, 1),
        Rational::new(hundredths, SECONDS_DENOMINATOR),
    )
}

/// Fails with [`GeotagError::DivisionByZero`] instead of producing an
/// infinite or NaN result.
pub fn dms_to_decimal(triple: &DmsTriple, hemisphere: Hemisphere) -> Result<f64> {
    let degrees = component(triple.degrees, "degrees")?;
    let minutes = component(triple.minutes, "minutes")?;
    let seconds = component(triple.seconds, "seconds")?;

    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;

    if hemisphere.is_negative() {
        Ok(-decimal)
    } else {
        Ok(decimal)
    }
}

fn component(value: Rational, name: &'static str) -> Result<f64> {
    value
        .to_f64()
        .ok_or(GeotagError::DivisionByZero { component: name })
}
