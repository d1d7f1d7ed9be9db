//! Error types with diagnostics using miette
//!
//! Every failure is deterministic for a given input, so nothing here is
//! retryable; the host decides how to present them.

use miette::Diagnostic;
use thiserror::Error;

use crate::capability::Capability;

/// Result alias used throughout the crate
pub type Result<T, E = DrawError> = std::result::Result<T, E>;

/// Errors raised while compiling shapes or rendering gradients
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("{operation} needs CSS transforms, which the `{capability}` dialect does not provide")]
    #[diagnostic(
        code(cssdraw::capability::unsupported),
        help("resolve the capability before drawing; lines, skews and rotations need a transform property")
    )]
    UnsupportedCapability {
        capability: Capability,
        operation: &'static str,
    },

    #[error("{kind} gradients are not available for the `{capability}` dialect")]
    #[diagnostic(code(cssdraw::gradient::unsupported))]
    GradientUnsupported {
        capability: Capability,
        kind: GradientKind,
    },

    #[error("line segment starting at ({x}, {y}) has zero length")]
    #[diagnostic(
        code(cssdraw::line::degenerate),
        help("dx and dy must not both be zero")
    )]
    DegenerateSegment { x: f64, y: f64 },

    #[error("{what} must be finite, got {value}")]
    #[diagnostic(code(cssdraw::geometry::non_finite))]
    NonFinite { what: &'static str, value: f64 },
}

/// Which family of gradient was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientKind {
    Linear,
    Radial,
}

impl std::fmt::Display for GradientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradientKind::Linear => write!(f, "linear"),
            GradientKind::Radial => write!(f, "radial"),
        }
    }
}

/// Reject NaN and infinities before they leak into style strings.
pub(crate) fn ensure_finite(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DrawError::NonFinite { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_dialect() {
        let err = DrawError::GradientUnsupported {
            capability: Capability::Unsupported,
            kind: GradientKind::Linear,
        };
        assert_eq!(
            err.to_string(),
            "linear gradients are not available for the `unsupported` dialect"
        );
    }

    #[test]
    fn ensure_finite_rejects_nan() {
        assert!(ensure_finite("x", 1.5).is_ok());
        assert!(matches!(
            ensure_finite("x", f64::NAN),
            Err(DrawError::NonFinite { what: "x", .. })
        ));
        assert!(ensure_finite("y", f64::INFINITY).is_err());
    }
}
