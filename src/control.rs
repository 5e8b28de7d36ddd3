use serde::Serialize;

use crate::constants::{EARTHQUAKES_NAME, PLATES_NAME};
use crate::layers::{EarthquakeLayer, PlateLayer};
use crate::tiles::BasemapSet;

/// Leaflet `control.layers` description: radio buttons for basemaps,
/// checkboxes for overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerControl {
    pub basemaps: Vec<&'static str>,
    pub overlays: Vec<&'static str>,
    pub collapsed: bool,
}

impl LayerControl {
    /// Only possible once both overlay layers exist.
    pub fn assemble(basemaps: &BasemapSet, _earthquakes: &EarthquakeLayer, _plates: &PlateLayer) -> Self {
        LayerControl {
            basemaps: basemaps.names(),
            overlays: vec![EARTHQUAKES_NAME, PLATES_NAME],
            collapsed: false,
        }
    }
}
