//! Gradient direction quantization and per-dialect gradient strings
//!
//! Angles are rounded down to a multiple of 45 degrees. Each dialect then
//! spells the gradient its own way; only the Moz dialect has radial
//! gradients.

use crate::capability::Capability;
use crate::errors::{DrawError, GradientKind, Result, ensure_finite};
use crate::log::debug;
use crate::types::{Degrees, fmt_num};

/// One of the eight 45 degree gradient directions.
///
/// Bucket `n` covers angles `[45n, 45n + 45)`. Angles are taken modulo 360,
/// so 360 falls into the same bucket as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Octant {
    /// Bucket 0: left to right
    East,
    /// Bucket 1: bottom left to top right
    NorthEast,
    /// Bucket 2: bottom to top
    North,
    /// Bucket 3: bottom right to top left
    NorthWest,
    /// Bucket 4: right to left
    West,
    /// Bucket 5: top right to bottom left
    SouthWest,
    /// Bucket 6: top to bottom
    South,
    /// Bucket 7: top left to bottom right
    SouthEast,
}

impl Octant {
    const ALL: [Octant; 8] = [
        Octant::East,
        Octant::NorthEast,
        Octant::North,
        Octant::NorthWest,
        Octant::West,
        Octant::SouthWest,
        Octant::South,
        Octant::SouthEast,
    ];

    /// Quantize an angle in degrees.
    pub fn from_angle(angle: f64) -> Result<Self> {
        let angle = ensure_finite("gradient angle", angle)?;
        let raw = (angle / 45.0).floor();
        // floor(angle / 45) can exceed i64 for huge angles; reduce first
        let bucket = raw.rem_euclid(8.0) as usize;
        Ok(Self::ALL[bucket.min(7)])
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The quantized angle, `index * 45`
    pub fn degrees(self) -> Degrees {
        Degrees(f64::from(self.index()) * 45.0)
    }

    /// Start and end keywords for point-to-point gradients
    pub fn points(self) -> (&'static str, &'static str) {
        match self {
            Octant::East => ("left center", "right center"),
            Octant::NorthEast => ("left bottom", "right top"),
            Octant::North => ("center bottom", "center top"),
            Octant::NorthWest => ("right bottom", "left top"),
            Octant::West => ("right center", "left center"),
            Octant::SouthWest => ("right top", "left bottom"),
            Octant::South => ("center top", "center bottom"),
            Octant::SouthEast => ("left top", "right bottom"),
        }
    }

    /// Filter gradients only know two orientations: 0 (top to bottom) and
    /// 1 (left to right). Every pair of adjacent buckets collapses onto one.
    pub fn filter_type(self) -> u8 {
        self.index() % 4 / 2
    }
}

/// A two-color linear gradient
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub angle: f64,
    pub from: String,
    pub to: String,
}

impl LinearGradient {
    pub fn new(angle: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            angle,
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn octant(&self) -> Result<Octant> {
        Octant::from_angle(self.angle)
    }

    /// Render the gradient value for `capability`.
    pub fn render(&self, capability: Capability) -> Result<String> {
        let octant = self.octant()?;
        let (c1, c2) = (&self.from, &self.to);
        let deg = fmt_num(octant.degrees().raw());
        let css = match capability {
            Capability::Standard => format!("linear-gradient({deg}deg, {c1}, {c2})"),
            Capability::Moz => format!("-moz-linear-gradient({deg}deg,{c1}, {c2})"),
            Capability::Opera => format!("-o-linear-gradient({deg}deg,{c1},{c2})"),
            Capability::Webkit => {
                let (p1, p2) = octant.points();
                format!("-webkit-gradient(linear, {p1}, {p2}, from({c1}), to({c2}))")
            }
            Capability::Ms => format!(
                "progid:DXImageTransform.Microsoft.gradient(GradientType={}, startColorstr=\"{c1}\", endColorstr=\"{c2}\")",
                octant.filter_type()
            ),
            Capability::Unsupported => {
                return Err(DrawError::GradientUnsupported {
                    capability,
                    kind: GradientKind::Linear,
                });
            }
        };
        debug!(%css, %capability, "linear gradient");
        Ok(css)
    }
}

/// A two-color radial gradient
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub angle: f64,
    pub from: String,
    pub to: String,
}

impl RadialGradient {
    pub fn new(angle: f64, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            angle,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Render the gradient value; the angle is used as given.
    pub fn render(&self, capability: Capability) -> Result<String> {
        let angle = ensure_finite("gradient angle", self.angle)?;
        let css = match capability {
            Capability::Moz => format!(
                "-moz-radial-gradient({},{}, {})",
                Degrees(angle),
                self.from,
                self.to
            ),
            Capability::Standard
            | Capability::Webkit
            | Capability::Ms
            | Capability::Opera
            | Capability::Unsupported => {
                return Err(DrawError::GradientUnsupported {
                    capability,
                    kind: GradientKind::Radial,
                });
            }
        };
        debug!(%css, %capability, "radial gradient");
        Ok(css)
    }
}

/// Property that receives a gradient value. Filter gradients go into
/// `filter`; every other dialect uses a background.
pub fn gradient_property(capability: Capability) -> Result<&'static str> {
    match capability {
        Capability::Ms => Ok("filter"),
        Capability::Standard | Capability::Webkit | Capability::Moz | Capability::Opera => {
            Ok("background")
        }
        Capability::Unsupported => Err(DrawError::GradientUnsupported {
            capability,
            kind: GradientKind::Linear,
        }),
    }
}

/// Quantize `angle` and render a linear gradient from `color1` to `color2`.
pub fn quantize_gradient(
    angle: f64,
    color1: &str,
    color2: &str,
    capability: Capability,
) -> Result<String> {
    LinearGradient::new(angle, color1, color2).render(capability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_round_down() {
        assert_eq!(Octant::from_angle(0.0).unwrap(), Octant::East);
        assert_eq!(Octant::from_angle(44.9).unwrap(), Octant::East);
        assert_eq!(Octant::from_angle(45.0).unwrap(), Octant::NorthEast);
        assert_eq!(Octant::from_angle(90.0).unwrap(), Octant::North);
        assert_eq!(Octant::from_angle(359.0).unwrap(), Octant::SouthEast);
    }

    #[test]
    fn bucket_eight_folds_onto_zero() {
        let zero = Octant::from_angle(0.0).unwrap();
        assert_eq!(Octant::from_angle(360.0).unwrap(), zero);
        assert_eq!(Octant::from_angle(8.0 * 45.0).unwrap(), zero);
    }

    #[test]
    fn buckets_are_periodic() {
        for step in 0..72 {
            let angle = step as f64 * 5.0 + 0.5;
            let base = Octant::from_angle(angle).unwrap();
            for k in [-3i32, -1, 1, 2, 10] {
                let shifted = angle + 360.0 * f64::from(k);
                assert_eq!(Octant::from_angle(shifted).unwrap(), base, "{angle} + 360*{k}");
            }
        }
    }

    #[test]
    fn negative_angles_wrap() {
        assert_eq!(Octant::from_angle(-1.0).unwrap(), Octant::SouthEast);
        assert_eq!(Octant::from_angle(-90.0).unwrap(), Octant::South);
    }

    #[test]
    fn filter_type_collapses_pairs() {
        let types: Vec<u8> = Octant::ALL.iter().map(|o| o.filter_type()).collect();
        assert_eq!(types, [0, 0, 1, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn unsupported_never_renders() {
        for step in -8..16 {
            let angle = step as f64 * 22.5;
            let err = quantize_gradient(angle, "red", "blue", Capability::Unsupported).unwrap_err();
            assert!(matches!(
                err,
                DrawError::GradientUnsupported {
                    capability: Capability::Unsupported,
                    kind: GradientKind::Linear,
                }
            ));
        }
    }

    #[test]
    fn nan_angle_is_rejected() {
        let err = quantize_gradient(f64::NAN, "red", "blue", Capability::Standard).unwrap_err();
        assert!(matches!(err, DrawError::NonFinite { .. }));
    }

    #[test]
    fn radial_only_for_moz() {
        let g = RadialGradient::new(30.0, "red", "blue");
        assert_eq!(g.render(Capability::Moz).unwrap(), "-moz-radial-gradient(30deg,red, blue)");
        for cap in [Capability::Standard, Capability::Webkit, Capability::Ms, Capability::Opera] {
            assert!(matches!(
                g.render(cap),
                Err(DrawError::GradientUnsupported { kind: GradientKind::Radial, .. })
            ));
        }
    }

    #[test]
    fn filter_gradients_target_filter_property() {
        assert_eq!(gradient_property(Capability::Ms), Ok("filter"));
        assert_eq!(gradient_property(Capability::Webkit), Ok("background"));
        assert_eq!(
            gradient_property(Capability::Unsupported),
            Err(DrawError::GradientUnsupported {
                capability: Capability::Unsupported,
                kind: GradientKind::Linear,
            })
        );
    }

    #[test]
    fn every_bucket_renders_its_direction() {
        let table = [
            (0.0, "0deg", "left center", "right center"),
            (45.0, "45deg", "left bottom", "right top"),
            (90.0, "90deg", "center bottom", "center top"),
            (135.0, "135deg", "right bottom", "left top"),
            (180.0, "180deg", "right center", "left center"),
            (225.0, "225deg", "right top", "left bottom"),
            (270.0, "270deg", "center top", "center bottom"),
            (315.0, "315deg", "left top", "right bottom"),
            (360.0, "0deg", "left center", "right center"),
        ];
        for (angle, deg, p1, p2) in table {
            assert_eq!(
                quantize_gradient(angle, "red", "blue", Capability::Standard).unwrap(),
                format!("linear-gradient({deg}, red, blue)"),
                "{angle}"
            );
            assert_eq!(
                quantize_gradient(angle, "red", "blue", Capability::Webkit).unwrap(),
                format!("-webkit-gradient(linear, {p1}, {p2}, from(red), to(blue))"),
                "{angle}"
            );
            // anywhere inside the bucket renders the same
            assert_eq!(
                quantize_gradient(angle + 44.0, "red", "blue", Capability::Webkit).unwrap(),
                quantize_gradient(angle, "red", "blue", Capability::Webkit).unwrap(),
                "{angle}"
            );
        }
    }
}
