//! Shape descriptors and their box geometry
//!
//! Each descriptor knows how to compile itself into a [`RenderBox`]:
//! - where the box sits and how large it is
//! - how the stroke becomes a border
//! - which transforms it needs

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::attrs::{Attr, AttrSet, AttrValue, apply_defaults};
use crate::capability::Capability;
use crate::errors::{DrawError, Result, ensure_finite};
use crate::log::{debug, warn};
use crate::mapping::{AttrMap, StrokeEdges};
use crate::types::{Degrees, Point, Px};

use super::defaults;
use super::line::LineSegment;
use super::types::{BorderRadius, Element, RenderBox, TransformOp};

/// Common behavior for all shape descriptors
#[enum_dispatch]
pub trait Compile {
    /// Short name used in logs and errors
    fn kind(&self) -> &'static str;

    /// Compute the box for this shape under `capability`.
    fn compile(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox>;
}

/// Any drawable shape
#[enum_dispatch(Compile)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeDescriptor {
    Circle,
    Ellipse,
    Parallelogram,
    TextBox,
    ImageBox,
    LineSegment,
}

// ============================================================================
// Shape Types
// ============================================================================

/// A circle given by its center and radius
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, radius: f64) -> Self {
        Self {
            center: dvec2(cx, cy),
            radius,
        }
    }
}

impl Compile for Circle {
    fn kind(&self) -> &'static str {
        "circle"
    }

    fn compile(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox> {
        Ellipse {
            center: self.center,
            radii: DVec2::splat(self.radius),
        }
        .compile_round(attrs, capability)
    }
}

/// An axis-aligned ellipse given by its center and per-axis radii
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radii: DVec2,
}

impl Ellipse {
    pub fn new(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        Self {
            center: dvec2(cx, cy),
            radii: dvec2(rx, ry),
        }
    }

    /// Round shapes draw their stroke as a border outside a `2r` fill box,
    /// so the box is pulled up and left by `r + s` to stay centered.
    fn compile_round(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox> {
        check_point(self.center)?;
        ensure_finite("radius", self.radii.x)?;
        ensure_finite("radius", self.radii.y)?;

        let attrs = apply_defaults(attrs);
        let s = stroke_width(&attrs)?;
        let stroke = DVec2::splat(s);

        let origin = self.center - self.radii - stroke;
        let mut rbox = RenderBox::new(
            Element::Block,
            origin,
            Some(self.radii * 2.0),
            StrokeEdges::All,
        );
        rbox.border.width = Some(Px(s));

        let outer = self.radii + stroke;
        rbox.border.radius = Some(if outer.x == outer.y {
            BorderRadius::Uniform(Px(outer.x))
        } else {
            BorderRadius::Elliptical(Px(outer.x), Px(outer.y))
        });

        apply_attrs(&mut rbox, &attrs, AttrMap::new(capability))?;
        debug!(?origin, radii = ?self.radii, "compiled round shape");
        Ok(rbox)
    }
}

impl Compile for Ellipse {
    fn kind(&self) -> &'static str {
        "ellipse"
    }

    fn compile(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox> {
        self.compile_round(attrs, capability)
    }
}

/// A parallelogram: a box at `corner` with `extent`, optionally skewed.
/// Without a skew this is a plain rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Parallelogram {
    pub corner: Point,
    pub extent: DVec2,
    /// Horizontal skew in degrees
    pub skew: Option<f64>,
}

impl Parallelogram {
    pub fn new(x: f64, y: f64, dx: f64, dy: f64, skew: Option<f64>) -> Self {
        Self {
            corner: dvec2(x, y),
            extent: dvec2(dx, dy),
            skew,
        }
    }

    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(x, y, w, h, None)
    }
}

impl Compile for Parallelogram {
    fn kind(&self) -> &'static str {
        if self.skew.is_some() { "pgram" } else { "rect" }
    }

    fn compile(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox> {
        check_point(self.corner)?;
        check_point(self.extent)?;
        let skew = self.skew.map(|deg| ensure_finite("skew angle", deg)).transpose()?;
        if skew.is_some() {
            require_transforms(capability, "skew")?;
        }

        let attrs = apply_defaults(attrs);
        let s = stroke_width(&attrs)?;

        let mut rbox = RenderBox::new(
            Element::Block,
            self.corner,
            Some(self.extent),
            StrokeEdges::All,
        );
        rbox.border.width = Some(Px(s));
        apply_attrs(&mut rbox, &attrs, AttrMap::new(capability))?;

        // skews accumulate onto whatever transform the attributes set
        if let Some(deg) = skew {
            rbox.transform.push(TransformOp::Skew(Degrees(deg)));
        }
        debug!(kind = self.kind(), corner = ?self.corner, extent = ?self.extent, "compiled box");
        Ok(rbox)
    }
}

/// A block of text. Without a size the host fits the box to its content.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub corner: Point,
    pub size: Option<DVec2>,
    pub content: String,
}

impl TextBox {
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            corner: dvec2(x, y),
            size: None,
            content: content.into(),
        }
    }

    pub fn with_size(mut self, w: f64, h: f64) -> Self {
        self.size = Some(dvec2(w, h));
        self
    }
}

impl Compile for TextBox {
    fn kind(&self) -> &'static str {
        "text"
    }

    fn compile(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox> {
        check_point(self.corner)?;
        if let Some(size) = self.size {
            check_point(size)?;
        }
        let mut rbox = RenderBox::new(
            Element::Text(self.content.clone()),
            self.corner,
            self.size,
            StrokeEdges::All,
        );
        // text boxes take attributes as given, without stroke defaults
        apply_attrs(&mut rbox, attrs, AttrMap::new(capability))?;
        Ok(rbox)
    }
}

/// An image scaled into a box
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    pub corner: Point,
    pub size: DVec2,
    pub src: String,
}

impl ImageBox {
    pub fn new(x: f64, y: f64, w: f64, h: f64, src: impl Into<String>) -> Self {
        Self {
            corner: dvec2(x, y),
            size: dvec2(w, h),
            src: src.into(),
        }
    }
}

impl Compile for ImageBox {
    fn kind(&self) -> &'static str {
        "image"
    }

    fn compile(&self, attrs: &AttrSet, capability: Capability) -> Result<RenderBox> {
        check_point(self.corner)?;
        check_point(self.size)?;
        let mut rbox = RenderBox::new(
            Element::Image(self.src.clone()),
            self.corner,
            Some(self.size),
            StrokeEdges::All,
        );
        apply_attrs(&mut rbox, attrs, AttrMap::new(capability))?;
        Ok(rbox)
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

pub(super) fn check_point(p: DVec2) -> Result<()> {
    ensure_finite("coordinate", p.x)?;
    ensure_finite("coordinate", p.y)?;
    Ok(())
}

pub(super) fn require_transforms(capability: Capability, operation: &'static str) -> Result<()> {
    if capability.supports_transforms() {
        Ok(())
    } else {
        Err(DrawError::UnsupportedCapability {
            capability,
            operation,
        })
    }
}

/// Stroke width after defaulting. A non-numeric width falls back to the
/// default rather than poisoning the geometry.
pub(super) fn stroke_width(attrs: &AttrSet) -> Result<f64> {
    match attrs.get(&Attr::StrokeWidth) {
        Some(value) => match value.as_number() {
            Some(s) => ensure_finite("stroke width", s),
            None => {
                warn!(%value, "stroke-width is not a number, using the default");
                Ok(defaults::STROKE_WIDTH.raw())
            }
        },
        None => Ok(defaults::STROKE_WIDTH.raw()),
    }
}

/// Write mapped attributes onto the box, then raw CSS pass-through.
///
/// Positional and structural attributes are skipped. A `transform`
/// attribute becomes the first entry of the transform list.
pub(super) fn apply_attrs(rbox: &mut RenderBox, attrs: &AttrSet, map: AttrMap) -> Result<()> {
    for (attr, value) in attrs.iter() {
        match attr {
            Attr::Fill => rbox.background = Some(value.to_string()),
            Attr::Stroke => rbox.border.color = Some(value.to_string()),
            Attr::StrokeStyle => rbox.border.style = Some(value.to_string()),
            Attr::StrokeWidth => {
                if map.forward(attr).is_none() && rbox.border.width.is_none() {
                    warn!(
                        %value,
                        "stroke-width only applies when a shape is compiled with a stroke"
                    );
                }
            }
            Attr::CornerRadius => {
                rbox.border.radius = Some(match value {
                    AttrValue::Number(r) => BorderRadius::Uniform(Px(*r)),
                    AttrValue::Text(_) => BorderRadius::Raw(value.to_css(true)),
                });
            }
            Attr::Transform => {
                require_transforms(map.capability(), "transform attribute")?;
                rbox.transform.push(TransformOp::Raw(value.to_string()));
            }
            Attr::X | Attr::Y | Attr::W | Attr::H | Attr::Type | Attr::Children => {}
            Attr::Css(name) => {
                rbox.styles.insert(name.clone(), value.to_string());
            }
        }
    }
    Ok(())
}
