//! Straight line segments
//!
//! A segment is a zero-height box as wide as the segment is long, whose top
//! border is the visible stroke. The box is rotated about its top-left
//! corner to point along the segment, then nudged up by half the stroke so
//! the stroke straddles the geometric line instead of hanging below it.

use glam::{DVec2, dvec2};

use crate::attrs::{AttrSet, apply_defaults};
use crate::capability::Capability;
use crate::errors::{DrawError, Result, ensure_finite};
use crate::log::debug;
use crate::mapping::{AttrMap, StrokeEdges};
use crate::types::{Degrees, Point, Px};

use super::shapes::{Compile, apply_attrs, check_point, require_transforms, stroke_width};
use super::types::{Element, RenderBox, TransformOp};

/// A segment from `start` along `delta`
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub delta: DVec2,
}

impl LineSegment {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Self {
            start: dvec2(x, y),
            delta: dvec2(dx, dy),
        }
    }

    pub fn end(&self) -> Point {
        self.start + self.delta
    }

    /// Euclidean length, computed without intermediate overflow or underflow.
    pub fn length(&self) -> f64 {
        self.delta.x.hypot(self.delta.y)
    }

    /// Clockwise rotation from the +x axis, in `[0, 360)`.
    pub fn angle(&self) -> Result<Degrees> {
        check_point(self.start)?;
        check_point(self.delta)?;
        segment_angle(self.delta).ok_or(DrawError::DegenerateSegment {
            x: self.start.x,
            y: self.start.y,
        })
    }
}

/// Rotation that carries +x onto `delta`, or `None` for a zero vector or
/// one whose length does not fit in an `f64`.
///
/// `asin` only yields the acute angle against the x axis; the signs of
/// `dx` and `dy` pick the quadrant.
pub fn segment_angle(delta: DVec2) -> Option<Degrees> {
    let len = delta.x.hypot(delta.y);
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    let base = (delta.y.abs() / len).min(1.0).asin().to_degrees();
    let angle = match (delta.x < 0.0, delta.y < 0.0) {
        (true, false) => 180.0 - base,
        (true, true) => 180.0 + base,
        (false, true) => 360.0 - base,
        (false, false) => base,
    };
    // 360 - tiny rounds to 360
    Some(Degrees(if angle >= 360.0 { angle - 360.0 } else { angle }))
}

impl Compile for LineSegment {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn compile(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox> {
        check_point(self.start)?;
        check_point(self.delta)?;
        let len = ensure_finite("line length", self.length())?;
        let angle = self.angle()?;
        require_transforms(capability, "line")?;

        let attrs = apply_defaults(attrs);
        let s = stroke_width(&attrs)?;

        let mut rbox = RenderBox::new(
            Element::Block,
            self.start,
            Some(dvec2(len, 0.0)),
            StrokeEdges::Top,
        );
        rbox.border.width = Some(Px(s));
        apply_attrs(&mut rbox, &attrs, AttrMap::for_line(capability))?;

        // rotate first, then shift in the rotated frame; swapping the two
        // displaces the segment
        rbox.transform.push(TransformOp::Rotate(angle));
        rbox.transform.push(TransformOp::Translate(Px::ZERO, -Px(s) / 2.0));
        rbox.transform_origin = Some(DVec2::ZERO);

        debug!(start = ?self.start, delta = ?self.delta, %angle, len, "compiled line");
        Ok(rbox)
    }
}
