//! Default styling and geometry constants

/// Fallback shape color.
pub const COLOR: &str = "#333";
/// Fallback stroke width in local units.
pub const STROKE_WIDTH: f64 = 1.0;
/// Diameter of a disc or composite base when none is given.
pub const DIAMETER: f64 = 1.0;
/// Length of a truncated cone when none is given.
pub const CONE_LENGTH: f64 = 1.0;
/// Bezier handle length for quarter-arc path commands, as a fraction of the
/// distance from each end point to the arc's corner.
pub const ARC_HANDLE_LENGTH: f64 = 9.0 / 16.0;
/// Decimal places kept in declarative path points.
pub const PATH_PRECISION: i32 = 3;
