//! Vector shapes as CSS boxes.
//!
//! Every shape (circle, ellipse, rectangle, parallelogram, line, text,
//! image) compiles to one absolutely positioned box: a position, a size,
//! border geometry and an optional transform. Hosts that can only style
//! boxes get lightweight vector drawing without a canvas.
//!
//! ```
//! use cssdraw::{AttrSet, Capability, Compiler};
//!
//! let compiler = Compiler::new(Capability::Standard);
//! let circle = compiler
//!     .circle(100.0, 100.0, 10.0, &AttrSet::new().with("stroke-width", 2.0))
//!     .unwrap();
//! let style = circle.to_style_map(Capability::Standard).unwrap();
//! assert_eq!(cssdraw::StyleTarget::get(&style, "border-radius"), Some("12px"));
//! ```

pub mod attrs;
pub mod capability;
pub mod errors;
pub mod gradient;
pub mod log;
pub mod mapping;
pub mod render;
pub mod types;

pub use attrs::{Attr, AttrSet, AttrValue, apply_defaults};
pub use capability::{Capability, CapabilityProbe, CapabilityResolver};
pub use errors::{DrawError, GradientKind, Result};
pub use gradient::{LinearGradient, Octant, RadialGradient, gradient_property, quantize_gradient};
pub use mapping::{AttrMap, forward_map, reverse_map};
pub use render::{Compiler, RenderBox, ShapeDescriptor, StyleMap, StyleTarget};
