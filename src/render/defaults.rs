//! Default attribute values (CSS pixels and CSS keywords)

use crate::types::Px;

pub const STROKE_WIDTH: Px = Px(1.0);
pub const STROKE: &str = "black";
pub const FILL: &str = "transparent";
pub const STROKE_STYLE: &str = "solid";
