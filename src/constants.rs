// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// Remote feeds (last 7 days of USGS events, PB2002 plate boundaries)
pub const EARTHQUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const PLATES_FEED_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

// Basemap tile endpoints
pub const STREET_TILES_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const STREET_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;
pub const TOPO_TILES_URL: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";
pub const TOPO_ATTRIBUTION: &str = r#"Map data: &copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors, <a href="http://viewfinderpanoramas.org">SRTM</a> | Map style: &copy; <a href="https://opentopomap.org">OpenTopoMap</a> (<a href="https://creativecommons.org/licenses/by-sa/3.0/">CC-BY-SA</a>)"#;

// Layer names as shown in the layer control
pub const STREET_MAP_NAME: &str = "Street Map";
pub const TOPO_MAP_NAME: &str = "Topographic Map";
pub const EARTHQUAKES_NAME: &str = "Earthquakes";
pub const PLATES_NAME: &str = "Tectonic Plates";

// Initial view, centered globally
pub const MAP_CENTER: [f64; 2] = [20.0, 5.0];
pub const MAP_ZOOM: u8 = 2;

// Earthquake marker styling. Radius and fill come from the encoder.
pub const MARKER_SCALE: f64 = 4.0;
pub const MARKER_STROKE_COLOR: &str = "#000";
pub const MARKER_STROKE_WEIGHT: f64 = 1.0;
pub const MARKER_STROKE_OPACITY: f64 = 1.0;
pub const MARKER_FILL_OPACITY: f64 = 0.8;

// Plate boundary styling, constant across all features
pub const PLATE_LINE_COLOR: &str = "#FF6600";
pub const PLATE_LINE_WEIGHT: f64 = 2.0;

// Legend depth breakpoints in km, ascending
pub const LEGEND_BREAKPOINTS: [f64; 6] = [-10.0, 10.0, 30.0, 50.0, 70.0, 90.0];
