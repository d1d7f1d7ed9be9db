//! Drawing attributes
//!
//! Callers describe shapes with drawing vocabulary (`fill`, `stroke`,
//! `stroke-width`, ...). Anything outside that vocabulary is treated as a
//! raw CSS property and passed straight through to the box.

use std::collections::BTreeMap;
use std::fmt;

use crate::render::defaults;

/// An attribute name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attr {
    Fill,
    Stroke,
    StrokeStyle,
    StrokeWidth,
    /// Corner radius, spelled `r`
    CornerRadius,
    Transform,
    X,
    Y,
    W,
    H,
    /// Used by declarative instantiation, never written to a box
    Type,
    /// Used by declarative instantiation, never written to a box
    Children,
    /// Any other CSS property, written as-is
    Css(String),
}

impl Attr {
    /// The attributes every box understands, in table order
    pub const VOCABULARY: [Attr; 12] = [
        Attr::Fill,
        Attr::Stroke,
        Attr::StrokeStyle,
        Attr::StrokeWidth,
        Attr::CornerRadius,
        Attr::Transform,
        Attr::X,
        Attr::Y,
        Attr::W,
        Attr::H,
        Attr::Type,
        Attr::Children,
    ];

    pub fn parse(name: &str) -> Attr {
        match name {
            "fill" => Attr::Fill,
            "stroke" => Attr::Stroke,
            "stroke-style" => Attr::StrokeStyle,
            "stroke-width" => Attr::StrokeWidth,
            "r" | "corner-radius" => Attr::CornerRadius,
            "transform" => Attr::Transform,
            "x" => Attr::X,
            "y" => Attr::Y,
            "w" => Attr::W,
            "h" => Attr::H,
            "type" => Attr::Type,
            "children" => Attr::Children,
            other => Attr::Css(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Attr::Fill => "fill",
            Attr::Stroke => "stroke",
            Attr::StrokeStyle => "stroke-style",
            Attr::StrokeWidth => "stroke-width",
            Attr::CornerRadius => "r",
            Attr::Transform => "transform",
            Attr::X => "x",
            Attr::Y => "y",
            Attr::W => "w",
            Attr::H => "h",
            Attr::Type => "type",
            Attr::Children => "children",
            Attr::Css(name) => name,
        }
    }

    /// Set through positional arguments, not attribute assignment
    pub fn is_positional(&self) -> bool {
        matches!(self, Attr::X | Attr::Y | Attr::W | Attr::H)
    }

    /// Only meaningful to declarative instantiation
    pub fn is_structural(&self) -> bool {
        matches!(self, Attr::Type | Attr::Children)
    }
}

impl From<&str> for Attr {
    fn from(name: &str) -> Self {
        Attr::parse(name)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An attribute value: a number (lengths) or any string (colors, styles,
/// raw CSS values).
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            AttrValue::Text(s) => s.trim().trim_end_matches("px").trim().parse().ok(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }

    /// Render for a style write; `px` is appended to numbers when asked.
    pub fn to_css(&self, px: bool) -> String {
        match self {
            AttrValue::Number(n) if px => crate::types::Px(*n).to_string(),
            AttrValue::Number(n) => crate::types::fmt_num(*n),
            AttrValue::Text(s) if px && s.parse::<f64>().is_ok() => format!("{}px", s.trim()),
            AttrValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css(false))
    }
}

/// A caller-owned set of drawing attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttrSet {
    entries: BTreeMap<Attr, AttrValue>,
}

impl AttrSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<Attr>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(
        &mut self,
        name: impl Into<Attr>,
        value: impl Into<AttrValue>,
    ) -> Option<AttrValue> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, attr: &Attr) -> Option<&AttrValue> {
        self.entries.get(attr)
    }

    pub fn remove(&mut self, attr: &Attr) -> Option<AttrValue> {
        self.entries.remove(attr)
    }

    pub fn contains(&self, attr: &Attr) -> bool {
        self.entries.contains_key(attr)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Attr, &AttrValue)> {
        self.entries.iter()
    }

    pub fn stroke_width(&self) -> Option<f64> {
        self.get(&Attr::StrokeWidth).and_then(AttrValue::as_number)
    }

    pub fn corner_radius(&self) -> Option<f64> {
        self.get(&Attr::CornerRadius).and_then(AttrValue::as_number)
    }

    pub fn stroke(&self) -> Option<String> {
        self.get(&Attr::Stroke).map(AttrValue::to_string)
    }

    pub fn fill(&self) -> Option<String> {
        self.get(&Attr::Fill).map(AttrValue::to_string)
    }

    pub fn stroke_style(&self) -> Option<String> {
        self.get(&Attr::StrokeStyle).map(AttrValue::to_string)
    }

    pub fn transform(&self) -> Option<String> {
        self.get(&Attr::Transform).map(AttrValue::to_string)
    }

    /// Raw CSS properties to write verbatim. Positional and structural
    /// attributes never appear here, even when present in the set.
    pub fn pass_through(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().filter_map(|(attr, value)| match attr {
            Attr::Css(name) => Some((name.as_str(), value)),
            _ => None,
        })
    }
}

impl<K, V> FromIterator<(K, V)> for AttrSet
where
    K: Into<Attr>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AttrSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// Fill in stroke width, stroke, fill and stroke style where absent.
///
/// Presence is what counts: an explicit `stroke-width` of 0 or an empty
/// color string is kept. The input is never retained.
pub fn apply_defaults(attrs: &AttrSet) -> AttrSet {
    let mut out = attrs.clone();
    let fallbacks: [(Attr, AttrValue); 4] = [
        (Attr::StrokeWidth, AttrValue::Number(defaults::STROKE_WIDTH.raw())),
        (Attr::Stroke, AttrValue::from(defaults::STROKE)),
        (Attr::Fill, AttrValue::from(defaults::FILL)),
        (Attr::StrokeStyle, AttrValue::from(defaults::STROKE_STYLE)),
    ];
    for (attr, value) in fallbacks {
        out.entries.entry(attr).or_insert(value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let attrs = apply_defaults(&AttrSet::new());
        assert_eq!(attrs.stroke_width(), Some(1.0));
        assert_eq!(attrs.stroke().as_deref(), Some("black"));
        assert_eq!(attrs.fill().as_deref(), Some("transparent"));
        assert_eq!(attrs.stroke_style().as_deref(), Some("solid"));
    }

    #[test]
    fn defaults_keep_explicit_zero_width() {
        let attrs = apply_defaults(&AttrSet::new().with("stroke-width", 0.0));
        assert_eq!(attrs.stroke_width(), Some(0.0));
    }

    #[test]
    fn defaults_keep_caller_values_and_extras() {
        let input = AttrSet::new()
            .with("stroke", "red")
            .with("opacity", "0.5");
        let attrs = apply_defaults(&input);
        assert_eq!(attrs.stroke().as_deref(), Some("red"));
        assert_eq!(attrs.len(), 5);
        // input untouched
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn defaults_are_idempotent() {
        let input = AttrSet::new().with("fill", "#abc").with("r", 4.0);
        let once = apply_defaults(&input);
        assert_eq!(apply_defaults(&once), once);
    }

    #[test]
    fn pass_through_skips_positional_and_structural() {
        let attrs: AttrSet = [
            ("x", AttrValue::Number(1.0)),
            ("w", AttrValue::Number(5.0)),
            ("type", AttrValue::from("rect")),
            ("children", AttrValue::from("[]")),
            ("fill", AttrValue::from("red")),
            ("opacity", AttrValue::from("0.5")),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = attrs.pass_through().map(|(name, _)| name).collect();
        assert_eq!(names, ["opacity"]);
    }

    #[test]
    fn parse_corner_radius_aliases() {
        assert_eq!(Attr::parse("r"), Attr::CornerRadius);
        assert_eq!(Attr::parse("corner-radius"), Attr::CornerRadius);
        assert_eq!(Attr::parse("z-index"), Attr::Css("z-index".into()));
    }

    #[test]
    fn numbers_accept_px_strings() {
        assert_eq!(AttrValue::from("3px").as_number(), Some(3.0));
        assert_eq!(AttrValue::from("3").to_css(true), "3px");
        assert_eq!(AttrValue::Number(2.5).to_css(true), "2.5px");
        assert_eq!(AttrValue::from("dashed").to_css(true), "dashed");
    }
}
