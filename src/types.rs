//! Strongly-typed numeric primitives (zero-cost newtypes).
//!
//! Geometry is computed on `glam::DVec2`; these wrappers exist for the
//! values that end up in style strings, so that every length is written
//! with a `px` unit and every angle with `deg`.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

pub use glam::{DVec2, dvec2};

/// A point on the drawing surface, in CSS pixels (y grows downward)
pub type Point = DVec2;

/// A length in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Px(pub f64);

impl Px {
    pub const ZERO: Px = Px(0.0);

    /// Get the raw value
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Add for Px {
    type Output = Px;
    fn add(self, rhs: Px) -> Px { Px(self.0 + rhs.0) }
}
impl Sub for Px {
    type Output = Px;
    fn sub(self, rhs: Px) -> Px { Px(self.0 - rhs.0) }
}
impl Mul<f64> for Px {
    type Output = Px;
    fn mul(self, rhs: f64) -> Px { Px(self.0 * rhs) }
}
impl Div<f64> for Px {
    type Output = Px;
    fn div(self, rhs: f64) -> Px { Px(self.0 / rhs) }
}
impl Neg for Px {
    type Output = Px;
    fn neg(self) -> Px { Px(-self.0) }
}

impl From<f64> for Px {
    fn from(v: f64) -> Self { Px(v) }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", fmt_num(self.0))
    }
}

/// Angle in degrees, clockwise on screen
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self { Degrees(v) }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", fmt_num(self.0))
    }
}

/// Fixed-point with at most ten decimal places, trailing zeros dropped and
/// never a negative zero. CSS has no exponent notation, so large values are
/// written out in full.
pub fn fmt_num(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let s = format!("{:.10}", v);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
