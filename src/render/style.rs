//! Writing compiled boxes onto a host style object
//!
//! The host binding owns the real elements; it hands us anything that can
//! set and read CSS properties. [`StyleMap`] is the in-memory version used
//! by tests and by hosts that build style text.

use std::collections::BTreeMap;
use std::fmt;

use glam::DVec2;

use crate::attrs::{Attr, AttrSet};
use crate::capability::Capability;
use crate::errors::{DrawError, Result};
use crate::log::trace;
use crate::mapping::{AttrMap, StrokeEdges};
use crate::types::{Degrees, Px};

use super::types::{RenderBox, TransformOp};

/// A host element's inline style
pub trait StyleTarget {
    fn set(&mut self, property: &str, value: String);

    fn get(&self, property: &str) -> Option<&str>;

    /// Read the current value and write it back with `value` appended.
    fn append(&mut self, property: &str, value: &str) {
        let joined = match self.get(property) {
            Some(current) if !current.is_empty() => format!("{current} {value}"),
            _ => value.to_string(),
        };
        self.set(property, joined);
    }
}

/// Inline style held in memory, ordered by property name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    properties: BTreeMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl StyleTarget for StyleMap {
    fn set(&mut self, property: &str, value: String) {
        self.properties.insert(property.to_string(), value);
    }

    fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.properties.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{k}: {v};")?;
        }
        Ok(())
    }
}

fn origin_css(origin: DVec2) -> String {
    format!("{} {}", Px(origin.x), Px(origin.y))
}

impl RenderBox {
    /// Write every style this box needs onto `target`.
    ///
    /// Position and size always go to `left`/`top`/`width`/`height`; an
    /// auto-sized box gets no `width`/`height`. Fails if the box carries a
    /// transform and `capability` has no transform property.
    pub fn apply_to<T: StyleTarget + ?Sized>(
        &self,
        target: &mut T,
        capability: Capability,
    ) -> Result<()> {
        target.set("position", "absolute".to_string());
        target.set("left", Px(self.origin.x).to_string());
        target.set("top", Px(self.origin.y).to_string());
        if let Some(w) = self.width() {
            target.set("width", w.to_string());
        }
        if let Some(h) = self.height() {
            target.set("height", h.to_string());
        }

        let (width, style, color) = match self.border.edges {
            StrokeEdges::All => ("border-width", "border-style", "border-color"),
            StrokeEdges::Top => ("border-top-width", "border-top-style", "border-top-color"),
        };
        if let Some(w) = self.border.width {
            target.set(width, w.to_string());
        }
        if let Some(s) = &self.border.style {
            target.set(style, s.clone());
        }
        if let Some(c) = &self.border.color {
            target.set(color, c.clone());
        }
        if let Some(r) = &self.border.radius {
            target.set("border-radius", r.to_string());
        }
        if let Some(bg) = &self.background {
            target.set("background-color", bg.clone());
        }

        if !self.transform.is_empty() || self.transform_origin.is_some() {
            let unsupported = || DrawError::UnsupportedCapability {
                capability,
                operation: "transform",
            };
            let prop = capability.transform_property().ok_or_else(unsupported)?;
            let origin_prop = capability.transform_origin_property().ok_or_else(unsupported)?;
            if !self.transform.is_empty() {
                target.set(prop, self.transform.to_string());
            }
            if let Some(origin) = self.transform_origin {
                target.set(origin_prop, origin_css(origin));
            }
        }

        for (name, value) in &self.styles {
            target.set(name, value.clone());
        }
        trace!(origin = ?self.origin, %capability, "box written to style target");
        Ok(())
    }

    /// Materialize into a fresh [`StyleMap`].
    pub fn to_style_map(&self, capability: Capability) -> Result<StyleMap> {
        let mut map = StyleMap::new();
        self.apply_to(&mut map, capability)?;
        Ok(map)
    }
}

/// Append a rotation to whatever transform the target already carries.
pub fn append_rotation<T: StyleTarget + ?Sized>(
    target: &mut T,
    capability: Capability,
    deg: f64,
) -> Result<()> {
    let prop = capability
        .transform_property()
        .ok_or(DrawError::UnsupportedCapability {
            capability,
            operation: "rotate",
        })?;
    let op = TransformOp::Rotate(Degrees(crate::errors::ensure_finite("rotation", deg)?));
    target.append(prop, &op.to_string());
    Ok(())
}

/// Write an attribute set onto an element that already exists.
///
/// Mapped attributes go through the forward table, with a `px` unit on bare
/// numbers where the table asks for one. Positional and structural
/// attributes are skipped, attributes with no target on this kind of box
/// are dropped, and raw CSS names are written verbatim.
pub fn write_attrs<T: StyleTarget + ?Sized>(
    target: &mut T,
    attrs: &AttrSet,
    map: &AttrMap,
) -> Result<()> {
    for (attr, value) in attrs.iter() {
        if attr.is_positional() || attr.is_structural() {
            continue;
        }
        if let Attr::Css(name) = attr {
            target.set(name, value.to_string());
            continue;
        }
        match map.forward(attr) {
            Some(prop) => target.set(prop, value.to_css(AttrMap::needs_px(attr))),
            None if matches!(attr, Attr::Transform) => {
                return Err(DrawError::UnsupportedCapability {
                    capability: map.capability(),
                    operation: "transform attribute",
                });
            }
            None => {
                trace!(attr = attr.name(), "no write target, dropped");
            }
        }
    }
    Ok(())
}

/// Read the current attributes back through the reverse table.
///
/// Only properties the target actually has are returned, as text.
pub fn read_attrs<T: StyleTarget + ?Sized>(target: &T, map: &AttrMap) -> AttrSet {
    let mut attrs = AttrSet::new();
    for attr in Attr::VOCABULARY.iter() {
        if let Some(value) = map.reverse(attr).and_then(|prop| target.get(prop)) {
            attrs.insert(attr.clone(), value);
        }
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrValue;
    use crate::render::types::Element;
    use glam::dvec2;

    fn plain_box() -> RenderBox {
        let mut rbox = RenderBox::new(
            Element::Block,
            dvec2(1.0, 2.0),
            Some(dvec2(3.0, 4.0)),
            StrokeEdges::All,
        );
        rbox.border.width = Some(Px(1.0));
        rbox.background = Some("red".into());
        rbox
    }

    #[test]
    fn writes_position_and_border() {
        let style = plain_box().to_style_map(Capability::Unsupported).unwrap();
        assert_eq!(style.get("position"), Some("absolute"));
        assert_eq!(style.get("left"), Some("1px"));
        assert_eq!(style.get("top"), Some("2px"));
        assert_eq!(style.get("width"), Some("3px"));
        assert_eq!(style.get("height"), Some("4px"));
        assert_eq!(style.get("border-width"), Some("1px"));
        assert_eq!(style.get("background-color"), Some("red"));
    }

    #[test]
    fn auto_sized_boxes_skip_dimensions() {
        let mut rbox = plain_box();
        rbox.extent = None;
        let style = rbox.to_style_map(Capability::Standard).unwrap();
        assert_eq!(style.get("width"), None);
        assert_eq!(style.get("height"), None);
    }

    #[test]
    fn transforms_need_a_property() {
        let mut rbox = plain_box();
        rbox.transform.push(TransformOp::Rotate(Degrees(10.0)));
        assert!(rbox.to_style_map(Capability::Unsupported).is_err());

        let style = rbox.to_style_map(Capability::Webkit).unwrap();
        assert_eq!(style.get("-webkit-transform"), Some("rotate(10deg)"));
    }

    #[test]
    fn append_concatenates_in_order() {
        let mut style = StyleMap::new();
        append_rotation(&mut style, Capability::Standard, 10.0).unwrap();
        append_rotation(&mut style, Capability::Standard, 20.0).unwrap();
        assert_eq!(style.get("transform"), Some("rotate(10deg) rotate(20deg)"));
    }

    #[test]
    fn read_back_uses_reverse_table() {
        let style = plain_box().to_style_map(Capability::Standard).unwrap();
        let attrs = read_attrs(&style, &AttrMap::new(Capability::Standard));
        // x reads `top`, y reads `left`
        assert_eq!(attrs.get(&Attr::X), Some(&AttrValue::from("2px")));
        assert_eq!(attrs.get(&Attr::Y), Some(&AttrValue::from("1px")));
        assert_eq!(attrs.get(&Attr::Fill), Some(&AttrValue::from("red")));
        assert!(!attrs.contains(&Attr::StrokeWidth));
    }

    #[test]
    fn write_attrs_through_line_table() {
        let attrs = AttrSet::new()
            .with("stroke", "red")
            .with("stroke-width", 3.0)
            .with("x", 10.0)
            .with("children", "ignored")
            .with("opacity", "0.5");
        let mut style = StyleMap::new();
        write_attrs(&mut style, &attrs, &AttrMap::for_line(Capability::Standard)).unwrap();
        assert_eq!(style.get("border-top-color"), Some("red"));
        assert_eq!(style.get("border-top-width"), Some("3px"));
        assert_eq!(style.get("opacity"), Some("0.5"));
        assert_eq!(style.get("left"), None);
        assert_eq!(style.get("top"), None);
        assert_eq!(style.len(), 3);
    }

    #[test]
    fn write_attrs_through_shape_table() {
        let attrs = AttrSet::new()
            .with("stroke-width", 3.0)
            .with("r", 4.0)
            .with("fill", "blue")
            .with("transform", "scale(2)");
        let mut style = StyleMap::new();
        write_attrs(&mut style, &attrs, &AttrMap::new(Capability::Webkit)).unwrap();
        assert_eq!(style.get("border-radius"), Some("4px"));
        assert_eq!(style.get("background-color"), Some("blue"));
        assert_eq!(style.get("-webkit-transform"), Some("scale(2)"));
        assert_eq!(style.get("border-width"), None);
        assert_eq!(style.len(), 3);
    }

    #[test]
    fn write_attrs_transform_needs_a_dialect() {
        let attrs = AttrSet::new().with("transform", "scale(2)");
        let mut style = StyleMap::new();
        let map = AttrMap::new(Capability::Unsupported);
        let err = write_attrs(&mut style, &attrs, &map).unwrap_err();
        assert!(matches!(
            err,
            DrawError::UnsupportedCapability { operation: "transform attribute", .. }
        ));
    }
}
