//! Translation between drawing attributes and CSS property names.
//!
//! Writes go through [`AttrMap::forward`]; reads through
//! [`AttrMap::reverse`], which differs for the positional attributes.

use crate::attrs::Attr;
use crate::capability::Capability;

/// Which stroke properties a box owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEdges {
    /// Every border edge draws the stroke (shapes)
    All,
    /// Only the top border draws the stroke (line segments)
    Top,
}

/// Attribute table for one kind of box under one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrMap {
    capability: Capability,
    edges: StrokeEdges,
}

impl AttrMap {
    /// Table for circles, ellipses, rects, text and images
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            edges: StrokeEdges::All,
        }
    }

    /// Table for line segments: stroke attributes land on the top border,
    /// and stroke width becomes writable.
    pub fn for_line(capability: Capability) -> Self {
        Self {
            capability,
            edges: StrokeEdges::Top,
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn edges(&self) -> StrokeEdges {
        self.edges
    }

    /// Property written when `attr` is assigned.
    ///
    /// `stroke-width` has no target on shapes: the box geometry depends on
    /// it, so changing it means compiling the shape again.
    pub fn forward(&self, attr: &Attr) -> Option<&'static str> {
        match (attr, self.edges) {
            (Attr::Fill, _) => Some("background-color"),
            (Attr::Stroke, StrokeEdges::All) => Some("border-color"),
            (Attr::Stroke, StrokeEdges::Top) => Some("border-top-color"),
            (Attr::StrokeStyle, StrokeEdges::All) => Some("border-style"),
            (Attr::StrokeStyle, StrokeEdges::Top) => Some("border-top-style"),
            (Attr::StrokeWidth, StrokeEdges::All) => None,
            (Attr::StrokeWidth, StrokeEdges::Top) => Some("border-top-width"),
            (Attr::CornerRadius, _) => Some("border-radius"),
            (Attr::Transform, _) => self.capability.transform_property(),
            (Attr::X | Attr::Y | Attr::W | Attr::H, _) => None,
            (Attr::Type | Attr::Children, _) => None,
            (Attr::Css(_), _) => None,
        }
    }

    /// Property read back for `attr`.
    ///
    /// Positional reads are paired crosswise: `x` reads `top` and `y` reads
    /// `left`, while writes always use `left`/`top`.
    pub fn reverse(&self, attr: &Attr) -> Option<&'static str> {
        match attr {
            Attr::X => Some("top"),
            Attr::Y => Some("left"),
            Attr::W => Some("width"),
            Attr::H => Some("height"),
            other => self.forward(other),
        }
    }

    /// Numeric values of these attributes are written with a `px` unit.
    pub fn needs_px(attr: &Attr) -> bool {
        matches!(attr, Attr::CornerRadius | Attr::StrokeWidth)
    }
}

/// Forward lookup for a shape box under `capability`
pub fn forward_map(attr: &Attr, capability: Capability) -> Option<&'static str> {
    AttrMap::new(capability).forward(attr)
}

/// Reverse lookup for a shape box under `capability`
pub fn reverse_map(attr: &Attr, capability: Capability) -> Option<&'static str> {
    AttrMap::new(capability).reverse(attr)
}
