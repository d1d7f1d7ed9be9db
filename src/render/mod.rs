//! Shape compilation
//!
//! This module is organized into submodules:
//! - `defaults`: Default attribute values
//! - `types`: `RenderBox` and the structured transform list
//! - `shapes`: Shape descriptors and the `Compile` trait
//! - `line`: Line segment geometry
//! - `style`: Writing boxes onto a host style object

pub mod defaults;
pub mod line;
pub mod shapes;
pub mod style;
pub mod types;

pub use line::{LineSegment, segment_angle};
pub use shapes::{Circle, Compile, Ellipse, ImageBox, Parallelogram, ShapeDescriptor, TextBox};
pub use style::{StyleMap, StyleTarget, append_rotation, read_attrs, write_attrs};
pub use types::*;

use crate::attrs::AttrSet;
use crate::capability::Capability;
use crate::errors::{Result, ensure_finite};
use crate::gradient::{LinearGradient, RadialGradient};
use crate::log::debug;
use crate::mapping::AttrMap;
use crate::types::Degrees;

/// Compiles drawing calls for one host dialect.
///
/// The capability is resolved once by the host and fixed for the lifetime
/// of the compiler; every dialect-dependent decision reads it from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compiler {
    capability: Capability,
}

impl Compiler {
    pub fn new(capability: Capability) -> Self {
        Self { capability }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Attribute table for shape boxes
    pub fn attr_map(&self) -> AttrMap {
        AttrMap::new(self.capability)
    }

    /// Attribute table for line boxes
    pub fn line_attr_map(&self) -> AttrMap {
        AttrMap::for_line(self.capability)
    }

    /// Compile any shape descriptor.
    pub fn compile(&self, shape: &ShapeDescriptor, attrs: &AttrSet) -> Result<RenderBox> {
        let rbox = shape.compile(attrs, self.capability)?;
        debug!(kind = shape.kind(), "shape compiled");
        Ok(rbox)
    }

    /// Circle centered at (`x`, `y`)
    pub fn circle(&self, x: f64, y: f64, r: f64, attrs: &AttrSet) -> Result<RenderBox> {
        Circle::new(x, y, r).compile(attrs, self.capability)
    }

    /// Ellipse centered at (`x`, `y`)
    pub fn ellipse(&self, x: f64, y: f64, rx: f64, ry: f64, attrs: &AttrSet) -> Result<RenderBox> {
        Ellipse::new(x, y, rx, ry).compile(attrs, self.capability)
    }

    /// Rectangle with its top-left corner at (`x`, `y`)
    pub fn rect(&self, x: f64, y: f64, w: f64, h: f64, attrs: &AttrSet) -> Result<RenderBox> {
        self.pgram(x, y, w, h, None, attrs)
    }

    /// Rectangle optionally skewed by `skew` degrees
    pub fn pgram(
        &self,
        x: f64,
        y: f64,
        dx: f64,
        dy: f64,
        skew: Option<f64>,
        attrs: &AttrSet,
    ) -> Result<RenderBox> {
        Parallelogram::new(x, y, dx, dy, skew).compile(attrs, self.capability)
    }

    /// Auto-sized text box
    pub fn text(&self, x: f64, y: f64, content: &str, attrs: &AttrSet) -> Result<RenderBox> {
        TextBox::new(x, y, content).compile(attrs, self.capability)
    }

    /// Text box with a fixed size
    pub fn text_sized(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        content: &str,
        attrs: &AttrSet,
    ) -> Result<RenderBox> {
        TextBox::new(x, y, content).with_size(w, h).compile(attrs, self.capability)
    }

    pub fn image(
        &self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        src: &str,
        attrs: &AttrSet,
    ) -> Result<RenderBox> {
        ImageBox::new(x, y, w, h, src).compile(attrs, self.capability)
    }

    /// Segment from (`x`, `y`) to (`x + dx`, `y + dy`)
    pub fn line(&self, x: f64, y: f64, dx: f64, dy: f64, attrs: &AttrSet) -> Result<RenderBox> {
        LineSegment::new(x, y, dx, dy).compile(attrs, self.capability)
    }

    /// Append a rotation to a compiled box. Calls on the same box must be
    /// made in the intended order: transforms do not commute.
    pub fn rotate(&self, rbox: &mut RenderBox, deg: f64) -> Result<()> {
        shapes::require_transforms(self.capability, "rotate")?;
        let deg = ensure_finite("rotation", deg)?;
        rbox.transform.push(TransformOp::Rotate(Degrees(deg)));
        Ok(())
    }

    pub fn linear_gradient(&self, angle: f64, from: &str, to: &str) -> Result<String> {
        LinearGradient::new(angle, from, to).render(self.capability)
    }

    pub fn radial_gradient(&self, angle: f64, from: &str, to: &str) -> Result<String> {
        RadialGradient::new(angle, from, to).render(self.capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DrawError;

    #[test]
    fn rotate_appends_after_existing_ops() {
        let compiler = Compiler::new(Capability::Standard);
        let mut rbox = compiler
            .pgram(0.0, 0.0, 10.0, 10.0, Some(10.0), &AttrSet::new())
            .unwrap();
        compiler.rotate(&mut rbox, 30.0).unwrap();
        assert_eq!(rbox.transform.to_string(), "skew(10deg) rotate(30deg)");
    }

    #[test]
    fn rotate_without_transforms_fails() {
        let compiler = Compiler::new(Capability::Unsupported);
        let mut rbox = compiler.rect(0.0, 0.0, 1.0, 1.0, &AttrSet::new()).unwrap();
        let err = compiler.rotate(&mut rbox, 30.0).unwrap_err();
        assert!(matches!(err, DrawError::UnsupportedCapability { operation: "rotate", .. }));
        assert!(rbox.transform.is_empty());
    }

    #[test]
    fn descriptor_and_direct_calls_agree() {
        let compiler = Compiler::new(Capability::Moz);
        let attrs = AttrSet::new().with("fill", "navy");
        let direct = compiler.ellipse(10.0, 10.0, 4.0, 2.0, &attrs).unwrap();
        let via = compiler
            .compile(&Ellipse::new(10.0, 10.0, 4.0, 2.0).into(), &attrs)
            .unwrap();
        assert_eq!(direct, via);
    }
}
