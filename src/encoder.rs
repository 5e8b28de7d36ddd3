use crate::constants::MARKER_SCALE;

/// Fill color for depths at or below the shallowest threshold.
pub const SHALLOW_COLOR: &str = "#99FF33";

/// Depth bands as (exclusive lower bound in km, color), deepest first.
/// The first bound the depth strictly exceeds wins.
pub const DEPTH_BANDS: [(f64, &str); 5] = [
    (90.0, "#FF3333"),
    (70.0, "#FF6633"),
    (50.0, "#FF9933"),
    (30.0, "#FFCC33"),
    (10.0, "#FFFF33"),
];

/// Circle radius for a given magnitude. No clamping: zero or negative
/// magnitudes give a zero or negative radius and the map silently skips them.
pub fn marker_size(magnitude: f64) -> f64 {
    magnitude * MARKER_SCALE
}

/// Fill color for a given depth in km.
///
/// Comparisons are strict, so a depth sitting exactly on a boundary belongs
/// to the shallower band. NaN fails every comparison and lands in the
/// shallow band as well.
pub fn marker_color(depth: f64) -> &'static str {
    DEPTH_BANDS
        .iter()
        .find(|(lower, _)| depth > *lower)
        .map(|(_, color)| *color)
        .unwrap_or(SHALLOW_COLOR)
}
