use serde::Serialize;
use tracing::{info, warn};

use crate::constants::{EARTHQUAKES_NAME, MAP_CENTER, MAP_ZOOM, PLATES_NAME};
use crate::control::LayerControl;
use crate::feed::{
    fetch_collection, EarthquakeCollection, EarthquakeProperties, FeedSource, FetchError,
};
use crate::layers::{build_earthquake_layer, build_plate_layer, EarthquakeLayer, PlateLayer};
use crate::legend::Legend;
use crate::settings::{FetchMode, Settings};
use crate::tiles::BasemapSet;

/// Result of fetching one feed and building its layer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LayerOutcome<T> {
    Loaded { layer: T },
    Failed { reason: String },
}

impl<T> LayerOutcome<T> {
    pub fn layer(&self) -> Option<&T> {
        match self {
            LayerOutcome::Loaded { layer } => Some(layer),
            LayerOutcome::Failed { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.layer().is_some()
    }

    fn from_fetch<C>(result: Result<C, FetchError>, build: impl FnOnce(C) -> T) -> Self {
        match result {
            Ok(collection) => LayerOutcome::Loaded {
                layer: build(collection),
            },
            Err(e) => LayerOutcome::Failed {
                reason: e.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub center: [f64; 2],
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
        }
    }
}

/// Everything one page view puts on the map.
#[derive(Debug, Clone, Serialize)]
pub struct MapContext {
    pub view: MapView,
    pub basemaps: BasemapSet,
    pub earthquakes: LayerOutcome<EarthquakeLayer>,
    pub plates: LayerOutcome<PlateLayer>,
    /// Present only when both overlays loaded.
    pub layer_control: Option<LayerControl>,
    /// Overlays added to the map initially, by name.
    pub shown_overlays: Vec<&'static str>,
    pub legend: Legend,
}

impl MapContext {
    /// Composes the map from the two layer outcomes.
    ///
    /// The earthquake layer is shown as soon as it loads. The plate layer
    /// and the layer control only appear when both layers loaded.
    pub fn compose(
        basemaps: BasemapSet,
        earthquakes: LayerOutcome<EarthquakeLayer>,
        plates: LayerOutcome<PlateLayer>,
    ) -> Self {
        let layer_control = match (earthquakes.layer(), plates.layer()) {
            (Some(quakes), Some(plate_layer)) => {
                Some(LayerControl::assemble(&basemaps, quakes, plate_layer))
            }
            _ => None,
        };

        let mut shown_overlays = Vec::new();
        if earthquakes.is_loaded() {
            shown_overlays.push(EARTHQUAKES_NAME);
        }
        if layer_control.is_some() {
            shown_overlays.push(PLATES_NAME);
        }

        MapContext {
            view: MapView::default(),
            basemaps,
            earthquakes,
            plates,
            layer_control,
            shown_overlays,
            legend: Legend::new(),
        }
    }
}

/// Fetches both feeds, builds their layers and composes the map.
pub async fn initialize<S>(source: &S, settings: &Settings) -> MapContext
where
    S: FeedSource + ?Sized,
{
    let quake_url = settings.earthquake_feed_url.as_str();
    let plates_url = settings.plates_feed_url.as_str();

    let (quakes, plates) = match settings.fetch_mode {
        FetchMode::Sequential => {
            let quakes = fetch_collection::<EarthquakeProperties, S>(source, quake_url).await;
            let plates = fetch_collection::<serde_json::Value, S>(source, plates_url).await;
            (quakes, plates)
        }
        FetchMode::Parallel => tokio::join!(
            fetch_collection::<EarthquakeProperties, S>(source, quake_url),
            fetch_collection::<serde_json::Value, S>(source, plates_url)
        ),
    };

    let earthquakes = LayerOutcome::from_fetch(quakes, |c: EarthquakeCollection| {
        build_earthquake_layer(&c)
    });
    let plates = LayerOutcome::from_fetch(plates, build_plate_layer);

    match &earthquakes {
        LayerOutcome::Loaded { layer } => {
            info!("🌋 Earthquake layer built with {} markers", layer.markers.len())
        }
        LayerOutcome::Failed { reason } => warn!("❌ Earthquake feed unavailable: {}", reason),
    }
    match &plates {
        LayerOutcome::Loaded { layer } => {
            info!("🗺️  Plate layer built with {} boundaries", layer.data.features.len())
        }
        LayerOutcome::Failed { reason } => warn!("❌ Tectonic plates feed unavailable: {}", reason),
    }

    let mut basemaps = BasemapSet::default();
    basemaps.select(settings.basemap);

    MapContext::compose(basemaps, earthquakes, plates)
}
