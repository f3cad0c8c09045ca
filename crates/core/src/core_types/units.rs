//! Semantic unit types for spread rates and angles
//!
//! The Rothermel equations are evaluated in imperial units (ft, lb, Btu, min) while
//! the rest of the engine works in metres and seconds. These newtypes mark which
//! side of that boundary a value lives on so a rate in m/min is never mistaken for
//! a rate in m/s.
//!
//! # Usage
//! ```
//! use fire_spread_core::core_types::units::{MetersPerMinute, MetersPerSecond};
//!
//! let rate = MetersPerMinute::new(30.0);
//! let per_second: MetersPerSecond = rate.into();
//! assert!((*per_second - 0.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Mul, Neg, Sub};

/// Feet to metres
pub const FEET_TO_METER: f64 = 0.3048;

/// Metres per second to feet per minute
pub const METER_PER_SEC_TO_FEET_PER_MIN: f64 = 3.28084 * 60.0;

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// SPEED TYPES
// ============================================================================

/// Speed in metres per minute (Rothermel output unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerMinute(f64);

impl Eq for MetersPerMinute {}

impl PartialOrd for MetersPerMinute {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetersPerMinute {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MetersPerMinute {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MetersPerMinute {
    /// Zero speed
    pub const ZERO: MetersPerMinute = MetersPerMinute(0.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MetersPerMinute(value)
    }

    /// Convert a rate in feet per minute
    #[inline]
    #[must_use]
    pub fn from_feet_per_minute(value: f64) -> Self {
        MetersPerMinute(value * FEET_TO_METER)
    }

    #[inline]
    #[must_use]
    pub fn to_meters_per_second(self) -> MetersPerSecond {
        MetersPerSecond(self.0 / SECONDS_PER_MINUTE)
    }
}

impl From<MetersPerMinute> for MetersPerSecond {
    fn from(value: MetersPerMinute) -> Self {
        value.to_meters_per_second()
    }
}

impl fmt::Display for MetersPerMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m/min", self.0)
    }
}

/// Speed in metres per second (wind, effective wind, propagation velocity)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

impl Eq for MetersPerSecond {}

impl PartialOrd for MetersPerSecond {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetersPerSecond {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MetersPerSecond {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MetersPerSecond {
    /// Zero speed
    pub const ZERO: MetersPerSecond = MetersPerSecond(0.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    /// Convert to feet per minute for the Rothermel wind factor
    #[inline]
    #[must_use]
    pub fn to_feet_per_minute(self) -> f64 {
        self.0 * METER_PER_SEC_TO_FEET_PER_MIN
    }

    /// Convert a speed in feet per minute back to metres per second
    #[inline]
    #[must_use]
    pub fn from_feet_per_minute(value: f64) -> Self {
        MetersPerSecond(value / METER_PER_SEC_TO_FEET_PER_MIN)
    }

    #[inline]
    #[must_use]
    pub fn to_meters_per_minute(self) -> MetersPerMinute {
        MetersPerMinute(self.0 * SECONDS_PER_MINUTE)
    }
}

impl Add for MetersPerSecond {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        MetersPerSecond(self.0 + rhs.0)
    }
}

impl Sub for MetersPerSecond {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        MetersPerSecond(self.0 - rhs.0)
    }
}

impl Mul<f64> for MetersPerSecond {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        MetersPerSecond(self.0 * rhs)
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m/s", self.0)
    }
}

// ============================================================================
// ANGLE TYPES
// ============================================================================

/// Angle in radians
///
/// Map directions are measured counter-clockwise from the +y axis (grid north),
/// which is the frame the fire ellipse is laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Radians(f64);

impl Deref for Radians {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Radians {
    pub const ZERO: Radians = Radians(0.0);

    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Radians(value)
    }

    #[inline]
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Radians(degrees.to_radians())
    }

    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

impl Add for Radians {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Radians(self.0 + rhs.0)
    }
}

impl Sub for Radians {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Radians(self.0 - rhs.0)
    }
}

impl Neg for Radians {
    type Output = Self;
    fn neg(self) -> Self {
        Radians(-self.0)
    }
}

impl fmt::Display for Radians {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4} rad", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_conversions() {
        let rate = MetersPerMinute::new(90.0);
        assert!((*rate.to_meters_per_second() - 1.5).abs() < 1e-12);
        assert!((*MetersPerSecond::new(1.5).to_meters_per_minute() - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_wind_feet_per_minute_round_trip() {
        let wind = MetersPerSecond::new(2.0);
        let fpm = wind.to_feet_per_minute();
        assert!((fpm - 393.7008).abs() < 1e-9);
        assert!((*MetersPerSecond::from_feet_per_minute(fpm) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_feet_to_meters() {
        let rate = MetersPerMinute::from_feet_per_minute(100.0);
        assert!((*rate - 30.48).abs() < 1e-12);
    }
}
