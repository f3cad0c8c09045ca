//! Elliptical fire shape models
//!
//! A point ignition in uniform conditions grows into an ellipse whose elongation is
//! set by the effective wind speed. The shape is described by three speeds:
//! `a` (cross-wind semi-axis), `b` (head-direction semi-axis) and `c` (how fast the
//! ellipse centre drifts away from the ignition point along the head direction).
//! Multiplying by a time step gives lengths.
//!
//! # References
//! - Alexander, M.E. (1985). "Estimating the length-to-breadth ratio of elliptical
//!   forest fire patterns." Proc. 8th Conference on Fire and Forest Meteorology.
//! - Catchpole, E.A., Alexander, M.E., Gill, A.M. (1982). "Elliptical-fire perimeter and
//!   area intensity distributions." Canadian Journal of Forest Research 12, 773-776.
//! - Richards, G.D. (1990). "An elliptical growth model of forest fire fronts and its
//!   numerical solution." Int. J. Numer. Meth. Eng. 30, 1163-1179.

use crate::core_types::units::MetersPerSecond;
use serde::{Deserialize, Serialize};

/// Ellipse speeds for a unit time step (m/s)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Ellipse {
    /// Cross-wind semi-axis
    pub a: f64,
    /// Head-direction semi-axis
    pub b: f64,
    /// Centre offset along the head direction
    pub c: f64,
}

impl Ellipse {
    pub const ZERO: Ellipse = Ellipse {
        a: 0.0,
        b: 0.0,
        c: 0.0,
    };

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Ellipse { a, b, c }
    }

    /// Head speed, `b + c`
    pub fn head_rate(&self) -> f64 {
        self.b + self.c
    }

    /// Backing speed, `b - c`
    pub fn back_rate(&self) -> f64 {
        self.b - self.c
    }

    pub fn is_zero(&self) -> bool {
        self.a == 0.0 && self.b == 0.0 && self.c == 0.0
    }
}

/// Strategy turning a head rate and effective wind into an ellipse
pub trait EllipseModel: Send + Sync {
    /// Ellipse for a head rate of spread and effective wind speed, both in m/s
    fn ellipse(&self, rate: MetersPerSecond, effective_wind: MetersPerSecond) -> Ellipse;

    fn name(&self) -> &'static str;
}

/// Alexander (1985) length-to-breadth parameterisation
#[derive(Debug, Clone, Copy, Default)]
pub struct Alexander;

impl Alexander {
    /// Length-to-breadth ratio
    ///
    /// # Formula
    /// ```text
    /// LB = 0.936 e^(0.2566 U) + 0.461 e^(−0.1548 U) − 0.397
    /// ```
    pub fn length_to_breadth(effective_wind: MetersPerSecond) -> f64 {
        let u = *effective_wind;
        0.936 * (0.2566 * u).exp() + 0.461 * (-0.1548 * u).exp() - 0.397
    }

    /// Head-to-back ratio
    ///
    /// # Formula
    /// ```text
    /// HB = (LB + √(LB² − 1)) / (LB − √(LB² − 1))
    /// ```
    pub fn head_to_back(length_to_breadth: f64) -> f64 {
        let root = (length_to_breadth.powi(2) - 1.0).max(0.0).sqrt();
        (length_to_breadth + root) / (length_to_breadth - root)
    }
}

impl EllipseModel for Alexander {
    fn ellipse(&self, rate: MetersPerSecond, effective_wind: MetersPerSecond) -> Ellipse {
        let ros = *rate;
        let lb = Self::length_to_breadth(effective_wind);
        let hb = Self::head_to_back(lb);
        let back = ros / hb;
        let b = (ros + back) / 2.0;
        Ellipse {
            a: 0.5 * (ros + back) / lb,
            b,
            c: b - back,
        }
    }

    fn name(&self) -> &'static str {
        "alexander"
    }
}

/// Catchpole et al. (1982) eccentricity parameterisation
#[derive(Debug, Clone, Copy, Default)]
pub struct Catchpole;

impl EllipseModel for Catchpole {
    fn ellipse(&self, rate: MetersPerSecond, effective_wind: MetersPerSecond) -> Ellipse {
        let ros = *rate;
        let z = 1.0 + 0.25 * *effective_wind;
        let eccentricity = (z * z - 1.0).max(0.0).sqrt() / z;
        let back = ros * (1.0 - eccentricity) / (1.0 + eccentricity);
        let length = ros + back;
        let width = length / z;
        Ellipse {
            a: width / 2.0,
            b: length / 2.0,
            c: ros - length / 2.0,
        }
    }

    fn name(&self) -> &'static str {
        "catchpole"
    }
}

/// Configuration-selectable ellipse model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipseModelKind {
    #[default]
    Alexander,
    Catchpole,
}

impl EllipseModel for EllipseModelKind {
    fn ellipse(&self, rate: MetersPerSecond, effective_wind: MetersPerSecond) -> Ellipse {
        match self {
            EllipseModelKind::Alexander => Alexander.ellipse(rate, effective_wind),
            EllipseModelKind::Catchpole => Catchpole.ellipse(rate, effective_wind),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            EllipseModelKind::Alexander => Alexander.name(),
            EllipseModelKind::Catchpole => Catchpole.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GRASS_ROS: f64 = 32.174_547_373_304_95 / 60.0;

    #[test]
    fn test_alexander_calm_is_circle() {
        assert_relative_eq!(Alexander::length_to_breadth(MetersPerSecond::ZERO), 1.0);
        let ellipse = Alexander.ellipse(MetersPerSecond::new(0.5), MetersPerSecond::ZERO);
        assert_relative_eq!(ellipse.a, ellipse.b, epsilon = 1e-12);
        assert_relative_eq!(ellipse.c, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_alexander_short_grass() {
        let ellipse = Alexander.ellipse(MetersPerSecond::new(GRASS_ROS), MetersPerSecond::new(2.0));
        assert_relative_eq!(ellipse.a, 0.203_921_902_155_518_53, max_relative = 1e-6);
        assert_relative_eq!(ellipse.b, 0.306_894_866_505_452_6, max_relative = 1e-6);
        assert_relative_eq!(ellipse.c, 0.229_347_589_716_296_6, max_relative = 1e-6);
        // head of the ellipse travels at the head rate
        assert_relative_eq!(ellipse.head_rate(), GRASS_ROS, max_relative = 1e-12);
    }

    #[test]
    fn test_catchpole_short_grass() {
        let ellipse = Catchpole.ellipse(MetersPerSecond::new(GRASS_ROS), MetersPerSecond::new(2.0));
        assert_relative_eq!(ellipse.a, 0.204_826_392_065_980_66, max_relative = 1e-6);
        assert_relative_eq!(ellipse.b, 0.307_239_588_098_971, max_relative = 1e-6);
        assert_relative_eq!(ellipse.c, 0.229_002_868_122_778_15, max_relative = 1e-6);
    }

    #[test]
    fn test_catchpole_calm_is_circle() {
        let ellipse = Catchpole.ellipse(MetersPerSecond::new(0.3), MetersPerSecond::ZERO);
        assert_relative_eq!(ellipse.a, 0.3);
        assert_relative_eq!(ellipse.b, 0.3);
        assert_relative_eq!(ellipse.c, 0.0);
    }

    #[test]
    fn test_kind_dispatch() {
        let rate = MetersPerSecond::new(GRASS_ROS);
        let wind = MetersPerSecond::new(2.0);
        assert_eq!(
            EllipseModelKind::Catchpole.ellipse(rate, wind),
            Catchpole.ellipse(rate, wind)
        );
        assert_eq!(EllipseModelKind::default().name(), "alexander");
        let kind: EllipseModelKind = serde_json::from_str("\"catchpole\"").unwrap();
        assert_eq!(kind, EllipseModelKind::Catchpole);
    }

    #[test]
    fn test_zero_rate_gives_zero_ellipse() {
        assert!(Alexander
            .ellipse(MetersPerSecond::ZERO, MetersPerSecond::ZERO)
            .is_zero());
    }
}
