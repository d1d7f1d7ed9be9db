//! Styling dialect selection
//!
//! Hosts differ in which transform property they expose and in how they
//! spell gradients. The dialect is detected once, then handed to the
//! compiler as a plain value; nothing in this crate probes on its own.

use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;

use crate::log::debug;

/// Which styling dialect the host understands for transforms and gradients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Unprefixed `transform`
    Standard,
    /// `-webkit-transform`, point-to-point gradients
    Webkit,
    /// `-moz-transform`, the only dialect with radial gradients
    Moz,
    /// `-ms-transform`, filter-based gradients
    Ms,
    /// `-o-transform`
    Opera,
    /// No transform property at all
    Unsupported,
}

impl Capability {
    /// Detection order: the first property the probe recognizes wins.
    const PROBE_ORDER: [Capability; 5] = [
        Capability::Standard,
        Capability::Webkit,
        Capability::Moz,
        Capability::Ms,
        Capability::Opera,
    ];

    /// Run the host's feature probe and pick the dialect.
    pub fn detect<P: CapabilityProbe + ?Sized>(probe: &P) -> Self {
        let cap = Self::PROBE_ORDER
            .into_iter()
            .find(|cap| {
                cap.transform_property()
                    .is_some_and(|prop| probe.has_property(prop))
            })
            .unwrap_or(Capability::Unsupported);
        debug!(capability = %cap, "css transform dialect detected");
        cap
    }

    /// Concrete property name used for transforms, if any
    pub fn transform_property(self) -> Option<&'static str> {
        match self {
            Capability::Standard => Some("transform"),
            Capability::Webkit => Some("-webkit-transform"),
            Capability::Moz => Some("-moz-transform"),
            Capability::Ms => Some("-ms-transform"),
            Capability::Opera => Some("-o-transform"),
            Capability::Unsupported => None,
        }
    }

    /// Concrete property name used for the transform origin, if any
    pub fn transform_origin_property(self) -> Option<&'static str> {
        match self {
            Capability::Standard => Some("transform-origin"),
            Capability::Webkit => Some("-webkit-transform-origin"),
            Capability::Moz => Some("-moz-transform-origin"),
            Capability::Ms => Some("-ms-transform-origin"),
            Capability::Opera => Some("-o-transform-origin"),
            Capability::Unsupported => None,
        }
    }

    pub fn supports_transforms(self) -> bool {
        self.transform_property().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Capability::Standard => "standard",
            Capability::Webkit => "webkit",
            Capability::Moz => "moz",
            Capability::Ms => "ms",
            Capability::Opera => "opera",
            Capability::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a dialect name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown styling dialect: {0}")]
pub struct ParseCapabilityError(pub String);

impl FromStr for Capability {
    type Err = ParseCapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Capability::Standard),
            "webkit" => Ok(Capability::Webkit),
            "moz" => Ok(Capability::Moz),
            "ms" => Ok(Capability::Ms),
            "opera" | "o" => Ok(Capability::Opera),
            "unsupported" | "none" => Ok(Capability::Unsupported),
            other => Err(ParseCapabilityError(other.to_string())),
        }
    }
}

/// Feature probe supplied by the host binding layer.
pub trait CapabilityProbe {
    /// Whether the host's style object knows `name` (a CSS property name).
    fn has_property(&self, name: &str) -> bool;
}

impl<F> CapabilityProbe for F
where
    F: Fn(&str) -> bool,
{
    fn has_property(&self, name: &str) -> bool {
        self(name)
    }
}

/// Runs a probe at most once and remembers the answer.
pub struct CapabilityResolver<P> {
    probe: P,
    resolved: OnceCell<Capability>,
}

impl<P: CapabilityProbe> CapabilityResolver<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            resolved: OnceCell::new(),
        }
    }

    /// Resolve the dialect; later calls return the cached value.
    pub fn resolve(&self) -> Capability {
        *self.resolved.get_or_init(|| Capability::detect(&self.probe))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn detect_prefers_standard() {
        let cap = Capability::detect(&|name: &str| {
            matches!(name, "transform" | "-webkit-transform")
        });
        assert_eq!(cap, Capability::Standard);
    }

    #[test]
    fn detect_falls_through_prefixes() {
        let cap = Capability::detect(&|name: &str| name == "-ms-transform");
        assert_eq!(cap, Capability::Ms);

        let cap = Capability::detect(&|name: &str| name == "-o-transform");
        assert_eq!(cap, Capability::Opera);
    }

    #[test]
    fn detect_without_transforms_is_unsupported() {
        let cap = Capability::detect(&|_: &str| false);
        assert_eq!(cap, Capability::Unsupported);
        assert!(!cap.supports_transforms());
        assert_eq!(cap.transform_property(), None);
    }

    #[test]
    fn resolver_probes_once() {
        let calls = Cell::new(0);
        let resolver = CapabilityResolver::new(|name: &str| {
            calls.set(calls.get() + 1);
            name == "-moz-transform"
        });

        assert_eq!(resolver.resolve(), Capability::Moz);
        let after_first = calls.get();
        assert_eq!(resolver.resolve(), Capability::Moz);
        assert_eq!(calls.get(), after_first);
    }

    #[test]
    fn parse_round_trips_names() {
        for cap in [
            Capability::Standard,
            Capability::Webkit,
            Capability::Moz,
            Capability::Ms,
            Capability::Opera,
            Capability::Unsupported,
        ] {
            assert_eq!(cap.to_string().parse::<Capability>(), Ok(cap));
        }
        assert!("netscape".parse::<Capability>().is_err());
    }
}
