//! Core types for compiled boxes

use std::collections::BTreeMap;
use std::fmt;

use glam::{DAffine2, DMat2, DVec2, dvec2};

use crate::mapping::StrokeEdges;
use crate::types::{Degrees, Point, Px};

/// The host element a box materializes as
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A plain block (shapes and lines)
    Block,
    /// A block whose content is the given markup
    Text(String),
    /// An image with the given source
    Image(String),
}

/// Border rounding
#[derive(Debug, Clone, PartialEq)]
pub enum BorderRadius {
    Uniform(Px),
    /// Horizontal / vertical radii
    Elliptical(Px, Px),
    /// Caller-supplied value written verbatim
    Raw(String),
}

impl fmt::Display for BorderRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderRadius::Uniform(r) => write!(f, "{r}"),
            BorderRadius::Elliptical(rx, ry) => write!(f, "{rx} / {ry}"),
            BorderRadius::Raw(s) => f.write_str(s),
        }
    }
}

/// A single transform function
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    Rotate(Degrees),
    Translate(Px, Px),
    /// Horizontal skew
    Skew(Degrees),
    /// Caller-supplied transform text, kept verbatim
    Raw(String),
}

impl TransformOp {
    /// Matrix of this op in the box's local frame (y down). `None` for raw
    /// text, which is never parsed.
    pub fn to_affine(&self) -> Option<DAffine2> {
        match self {
            TransformOp::Rotate(deg) => Some(DAffine2::from_angle(deg.to_radians())),
            TransformOp::Translate(x, y) => {
                Some(DAffine2::from_translation(dvec2(x.raw(), y.raw())))
            }
            TransformOp::Skew(deg) => Some(DAffine2::from_mat2(DMat2::from_cols(
                dvec2(1.0, 0.0),
                dvec2(deg.to_radians().tan(), 1.0),
            ))),
            TransformOp::Raw(_) => None,
        }
    }
}

impl fmt::Display for TransformOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOp::Rotate(deg) => write!(f, "rotate({deg})"),
            TransformOp::Translate(x, y) => write!(f, "translate({x}, {y})"),
            TransformOp::Skew(deg) => write!(f, "skew({deg})"),
            TransformOp::Raw(s) => f.write_str(s),
        }
    }
}

/// Ordered list of transform functions; earlier ops are outermost, exactly
/// as in a CSS transform list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformList(Vec<TransformOp>);

impl TransformList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: TransformOp) {
        self.0.push(op);
    }

    pub fn ops(&self) -> &[TransformOp] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Compose into one matrix (`ops[0] * ops[1] * ...`).
    pub fn to_affine(&self) -> Option<DAffine2> {
        self.0
            .iter()
            .try_fold(DAffine2::IDENTITY, |acc, op| Some(acc * op.to_affine()?))
    }
}

impl fmt::Display for TransformList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{op}")?;
        }
        Ok(())
    }
}

/// Border stroke
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub edges: StrokeEdges,
    pub width: Option<Px>,
    pub style: Option<String>,
    pub color: Option<String>,
    pub radius: Option<BorderRadius>,
}

impl Border {
    pub fn new(edges: StrokeEdges) -> Self {
        Self {
            edges,
            width: None,
            style: None,
            color: None,
            radius: None,
        }
    }
}

/// A compiled shape: everything the host needs to place and style one box
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBox {
    pub element: Element,
    /// Top-left corner of the border box
    pub origin: Point,
    /// Content size; `None` lets the host size the box to its content
    pub extent: Option<DVec2>,
    pub border: Border,
    pub background: Option<String>,
    pub transform: TransformList,
    /// Pivot for the transform, relative to the box origin
    pub transform_origin: Option<DVec2>,
    /// Raw CSS properties written after everything else
    pub styles: BTreeMap<String, String>,
}

impl RenderBox {
    pub fn new(element: Element, origin: Point, extent: Option<DVec2>, edges: StrokeEdges) -> Self {
        Self {
            element,
            origin,
            extent,
            border: Border::new(edges),
            background: None,
            transform: TransformList::new(),
            transform_origin: None,
            styles: BTreeMap::new(),
        }
    }

    pub fn width(&self) -> Option<Px> {
        self.extent.map(|e| Px(e.x))
    }

    pub fn height(&self) -> Option<Px> {
        self.extent.map(|e| Px(e.y))
    }

    /// Map a point in the box's local frame to drawing coordinates,
    /// honoring the transform and its origin.
    pub fn local_to_page(&self, local: DVec2) -> Option<DVec2> {
        let pivot = self.transform_origin.unwrap_or(DVec2::ZERO);
        let m = self.transform.to_affine()?;
        Some(self.origin + pivot + m.transform_point2(local - pivot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_list_serializes_in_order() {
        let mut list = TransformList::new();
        list.push(TransformOp::Rotate(Degrees(90.0)));
        list.push(TransformOp::Translate(Px::ZERO, Px(-1.0)));
        list.push(TransformOp::Skew(Degrees(15.0)));
        assert_eq!(list.to_string(), "rotate(90deg) translate(0px, -1px) skew(15deg)");
    }

    #[test]
    fn composition_order_matters() {
        let mut rt = TransformList::new();
        rt.push(TransformOp::Rotate(Degrees(90.0)));
        rt.push(TransformOp::Translate(Px(10.0), Px::ZERO));

        let mut tr = TransformList::new();
        tr.push(TransformOp::Translate(Px(10.0), Px::ZERO));
        tr.push(TransformOp::Rotate(Degrees(90.0)));

        let p = DVec2::ZERO;
        let a = rt.to_affine().unwrap().transform_point2(p);
        let b = tr.to_affine().unwrap().transform_point2(p);
        assert!((a - dvec2(0.0, 10.0)).length() < 1e-9, "{a}");
        assert!((b - dvec2(10.0, 0.0)).length() < 1e-9, "{b}");
    }

    #[test]
    fn raw_ops_block_composition() {
        let mut list = TransformList::new();
        list.push(TransformOp::Raw("scale(2)".into()));
        assert!(list.to_affine().is_none());
        assert_eq!(list.to_string(), "scale(2)");
    }

    #[test]
    fn radius_formats() {
        assert_eq!(BorderRadius::Uniform(Px(12.0)).to_string(), "12px");
        assert_eq!(BorderRadius::Elliptical(Px(7.0), Px(4.0)).to_string(), "7px / 4px");
    }
}
