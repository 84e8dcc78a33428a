// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use regex::Regex;

use crate::{FloorplanError, Result};

/// A physical distance, stored as an exact integer count of micrometers.
///
/// All arithmetic happens in the integer micrometer domain; fractional inputs
/// are rounded to the nearest micrometer on construction. The meters view is
/// derived for output formatting only and never feeds back into arithmetic,
/// so repeated addition over hundreds of tiled components cannot accumulate
/// floating-point drift.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length {
    micrometers: i64,
}

impl Length {
    pub const ZERO: Length = Length { micrometers: 0 };

    /// Creates a length from a micrometer count, rounding half up to the
    /// nearest whole micrometer.
    pub fn from_micrometers(micrometers: f64) -> Length {
        Length {
            micrometers: (micrometers + 0.5).floor() as i64,
        }
    }

    /// Creates a length from a value in meters.
    pub fn from_meters(meters: f64) -> Length {
        Length::from_micrometers(meters * 1e6)
    }

    /// The exact micrometer count.
    pub fn micrometers(self) -> i64 {
        self.micrometers
    }

    /// The value in meters. Derived view for output formatting only.
    pub fn meters(self) -> f64 {
        self.micrometers as f64 / 1e6
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length {
            micrometers: self.micrometers + rhs.micrometers,
        }
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length {
            micrometers: self.micrometers - rhs.micrometers,
        }
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length::from_micrometers(self.micrometers as f64 * rhs)
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}

impl Mul<Length> for usize {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        Length {
            micrometers: self as i64 * rhs.micrometers,
        }
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, Add::add)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}m", self.meters())
    }
}

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Length({:.6}m)", self.meters())
    }
}

impl FromStr for Length {
    type Err = FloorplanError;

    /// Parses a length with a unit suffix, e.g. `0.001m`, `1mm`, `980um`.
    fn from_str(s: &str) -> Result<Length> {
        let pattern = Regex::new(r"^(\d+(\.\d+)?)([a-z]+)$").unwrap();
        let captures = pattern
            .captures(s)
            .ok_or_else(|| FloorplanError::InvalidLength(s.to_string()))?;
        let nb: f64 = captures[1].parse().unwrap();
        let micrometers_per_unit = match &captures[3] {
            "m" => 1e6,
            "dm" => 1e5,
            "cm" => 1e4,
            "mm" => 1e3,
            "um" => 1.0,
            unit => {
                return Err(FloorplanError::InvalidLengthUnit {
                    unit: unit.to_string(),
                });
            }
        };
        Ok(Length::from_micrometers(nb * micrometers_per_unit))
    }
}
