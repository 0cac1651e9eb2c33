//! Compile-time unit safety for hydrological quantities.
//!
//! Stream profiles mix along-line distances, elevations, discharges and
//! power. Keeping them as raw `f64` makes it easy to multiply a distance by
//! a discharge and call the result kilowatts. The newtypes below catch those
//! mistakes at compile time.
//!
//! All types are `#[repr(transparent)]` and serialize as plain numbers.
//!
//! # Usage
//!
//! ```
//! use hydrosite_core::units::{CubicMetersPerSecond, Meters};
//!
//! let head = Meters(40.0) - Meters(12.5);
//! let q = CubicMetersPerSecond(1.2);
//! let p = q.hydraulic_power(head, 0.8);
//! assert!(p.value() > 250.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Density of water (kg/m³)
pub const WATER_DENSITY: f64 = 1000.0;

macro_rules! impl_unit_ops {
    ($type:ty, $unit_name:literal) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $type {
            type Output = Self;
            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Div<$type> for $type {
            type Output = f64;
            fn div(self, rhs: $type) -> Self::Output {
                self.0 / rhs.0
            }
        }

        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{:.3} {}", self.0, $unit_name)
            }
        }

        impl $type {
            /// Create a new value
            #[inline]
            pub const fn new(value: f64) -> Self {
                Self(value)
            }

            /// Get the raw numeric value
            #[inline]
            pub const fn value(self) -> f64 {
                self.0
            }

            #[inline]
            pub fn is_finite(self) -> bool {
                self.0.is_finite()
            }

            #[inline]
            pub fn max(self, other: Self) -> Self {
                Self(self.0.max(other.0))
            }

            #[inline]
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }

            /// Zero value
            pub const ZERO: Self = Self(0.0);
        }

        impl std::iter::Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }

        impl<'a> std::iter::Sum<&'a $type> for $type {
            fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
                Self(iter.map(|x| x.0).sum())
            }
        }
    };
}

/// Length or elevation in meters (m)
///
/// Used for along-line positions, segment lengths, elevations and heads.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(pub f64);

impl_unit_ops!(Meters, "m");

/// Volumetric discharge in cubic meters per second (m³/s)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CubicMetersPerSecond(pub f64);

impl_unit_ops!(CubicMetersPerSecond, "m³/s");

/// Power in kilowatts (kW)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilowatts(pub f64);

impl_unit_ops!(Kilowatts, "kW");

impl CubicMetersPerSecond {
    /// Potential power of this discharge falling through `head`:
    /// P = ρ · g · Q · H · η / 1000
    #[inline]
    pub fn hydraulic_power(self, head: Meters, efficiency: f64) -> Kilowatts {
        Kilowatts(WATER_DENSITY * GRAVITY * self.0 * head.0 * efficiency / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters_arithmetic() {
        let a = Meters(100.0);
        let b = Meters(40.0);

        assert_eq!((a - b).value(), 60.0);
        assert_eq!((a + b).value(), 140.0);
        assert_eq!((-a).value(), -100.0);
        assert_eq!((a * 0.5).value(), 50.0);
        assert_eq!(a / b, 2.5);
    }

    #[test]
    fn test_hydraulic_power() {
        // 1 m³/s over 10 m at full efficiency is 98.1 kW
        let p = CubicMetersPerSecond(1.0).hydraulic_power(Meters(10.0), 1.0);
        assert!((p.value() - 98.1).abs() < 1e-9);

        let p = CubicMetersPerSecond(1.0).hydraulic_power(Meters(10.0), 0.5);
        assert!((p.value() - 49.05).abs() < 1e-9);
    }

    #[test]
    fn test_sum_iterator() {
        let powers = vec![Kilowatts(10.0), Kilowatts(20.5)];
        let total: Kilowatts = powers.iter().sum();
        assert_eq!(total.value(), 30.5);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Meters(12.5)).unwrap();
        assert_eq!(json, "12.5");
        let back: Kilowatts = serde_json::from_str("3.0").unwrap();
        assert_eq!(back, Kilowatts(3.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Meters(1.5)), "1.500 m");
        assert_eq!(format!("{}", Kilowatts(2.0)), "2.000 kW");
    }
}
