use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

const ROUNDING_SLACK: f64 = 1e-9;

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both axes are finite and inside their geographic range.
    pub fn validate(&self) -> Result<(), TypeError> {
        check_axis("latitude", self.latitude, 90.0)?;
        check_axis("longitude", self.longitude, 180.0)
    }

    /// Offset each axis independently by a uniform draw in `[-radius, radius]`.
    pub fn jittered(&self, radius: f64, source: &dyn JitterSource) -> Self {
        Self {
            latitude: self.latitude + source.offset(radius),
            longitude: self.longitude + source.offset(radius),
        }
    }

    /// Returns `true` if both axes lie within `radius` of `center`, up to
    /// float rounding of the addition.
    pub fn is_within(&self, center: &Coordinates, radius: f64) -> bool {
        let bound = radius + ROUNDING_SLACK;
        (self.latitude - center.latitude).abs() <= bound
            && (self.longitude - center.longitude).abs() <= bound
    }

    /// `[latitude, longitude]`, the order used on the wire.
    pub fn to_array(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

fn check_axis(axis: &'static str, value: f64, limit: f64) -> Result<(), TypeError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(TypeError::InvalidCoordinate { axis, value, limit })
    }
}

/// Source of bounded per-axis offsets.
pub trait JitterSource: Send + Sync {
    /// A value in `[-radius, radius]`.
    fn offset(&self, radius: f64) -> f64;
}

/// Uniform jitter from the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
    fn offset(&self, radius: f64) -> f64 {
        if !(radius.is_finite() && radius > 0.0) {
            return 0.0;
        }
        rand::thread_rng().gen_range(-radius..=radius)
    }
}

/// Always returns the same offset, clamped to the requested radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn offset(&self, radius: f64) -> f64 {
        if !radius.is_finite() {
            return 0.0;
        }
        let radius = radius.abs();
        self.0.clamp(-radius, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BASE: Coordinates = Coordinates::new(-2.0, 37.0);

    #[test]
    fn validate_accepts_geographic_range() {
        assert!(BASE.validate().is_ok());
        assert!(Coordinates::new(90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let err = Coordinates::new(91.0, 0.0).validate().unwrap_err();
        assert!(matches!(
            err,
            TypeError::InvalidCoordinate {
                axis: "latitude",
                ..
            }
        ));
        assert!(Coordinates::new(0.0, f64::NAN).validate().is_err());
    }

    #[test]
    fn fixed_jitter_is_clamped() {
        let jitter = FixedJitter(0.2);
        assert_eq!(jitter.offset(0.05), 0.05);
        assert_eq!(FixedJitter(-0.01).offset(0.05), -0.01);
    }

    #[test]
    fn zero_radius_keeps_base_point() {
        let moved = BASE.jittered(0.0, &RandomJitter);
        assert_eq!(moved, BASE);
    }

    #[test]
    fn wire_order_is_lat_lon() {
        assert_eq!(BASE.to_array(), [-2.0, 37.0]);
    }

    proptest! {
        #[test]
        fn random_jitter_stays_in_range(radius in 0.0001f64..1.0) {
            let moved = BASE.jittered(radius, &RandomJitter);
            prop_assert!(moved.is_within(&BASE, radius));
        }

        #[test]
        fn fixed_jitter_stays_in_range(value in -5.0f64..5.0, radius in 0.0f64..1.0) {
            let moved = BASE.jittered(radius, &FixedJitter(value));
            prop_assert!(moved.is_within(&BASE, radius));
        }
    }
}
