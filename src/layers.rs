use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::constants::{
    MARKER_FILL_OPACITY, MARKER_STROKE_COLOR, MARKER_STROKE_OPACITY, MARKER_STROKE_WEIGHT,
    PLATE_LINE_COLOR, PLATE_LINE_WEIGHT,
};
use crate::encoder::{marker_color, marker_size};
use crate::feed::{EarthquakeCollection, EarthquakeFeature, PlateCollection};

/// Leaflet `circleMarker` options for one earthquake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleStyle {
    pub radius: f64,
    pub fill_color: &'static str,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthquakeMarker {
    /// `[lat, lng]`, or `None` when the feed gave no usable coordinates.
    pub position: Option<[f64; 2]>,
    pub style: CircleStyle,
    pub popup_html: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EarthquakeLayer {
    pub markers: Vec<EarthquakeMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlateLayer {
    pub style: LineStyle,
    pub data: PlateCollection,
}

/// Builds one marker per feature, in feed order. Nothing is filtered out.
pub fn build_earthquake_layer(collection: &EarthquakeCollection) -> EarthquakeLayer {
    EarthquakeLayer {
        markers: collection
            .earthquakes()
            .iter()
            .map(earthquake_marker)
            .collect(),
    }
}

pub fn earthquake_marker(quake: &EarthquakeFeature) -> EarthquakeMarker {
    let depth = quake.depth_km.unwrap_or(f64::NAN);

    EarthquakeMarker {
        position: quake.lat.zip(quake.lon).map(|(lat, lon)| [lat, lon]),
        style: CircleStyle {
            radius: marker_size(quake.magnitude.unwrap_or(0.0)),
            fill_color: marker_color(depth),
            color: MARKER_STROKE_COLOR,
            weight: MARKER_STROKE_WEIGHT,
            opacity: MARKER_STROKE_OPACITY,
            fill_opacity: MARKER_FILL_OPACITY,
        },
        popup_html: popup_html(quake),
    }
}

/// Popup body: place, time, magnitude, depth.
pub fn popup_html(quake: &EarthquakeFeature) -> String {
    let place = quake
        .place
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "Unknown location".to_string());

    format!(
        "<h3>{}</h3><hr><p>{}</p><p>Magnitude: {}</p><p>Depth: {}</p>",
        place,
        format_time(quake.time),
        display_number(quake.magnitude),
        display_number(quake.depth_km),
    )
}

/// Human-readable UTC time for an epoch-millisecond timestamp.
pub fn format_time(epoch_ms: Option<i64>) -> String {
    epoch_ms
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%a %b %d %Y %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

fn display_number(value: Option<f64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wraps the plate boundaries with the single shared line style.
pub fn build_plate_layer(collection: PlateCollection) -> PlateLayer {
    PlateLayer {
        style: LineStyle {
            color: PLATE_LINE_COLOR,
            weight: PLATE_LINE_WEIGHT,
        },
        data: collection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::stub::{collection, plate_boundary, quake};

    fn quakes(features: Vec<serde_json::Value>) -> EarthquakeCollection {
        serde_json::from_value(collection(features)).unwrap()
    }

    #[test]
    fn magnitude_five_at_forty_km() {
        let layer = build_earthquake_layer(&quakes(vec![quake(
            "Off the coast of Chile",
            5.0,
            1_700_000_000_000,
            [-71.5, -33.0, 40.0],
        )]));

        let marker = &layer.markers[0];
        assert_eq!(marker.style.radius, 20.0);
        assert_eq!(marker.style.fill_color, "#FFCC33");
        assert_eq!(marker.position, Some([-33.0, -71.5]));
        assert_eq!(marker.style.color, "#000");
        assert_eq!(marker.style.weight, 1.0);
        assert_eq!(marker.style.fill_opacity, 0.8);
    }

    #[test]
    fn deep_event_is_red() {
        let layer = build_earthquake_layer(&quakes(vec![quake("Fiji", 4.4, 0, [178.1, -17.9, 95.0])]));
        assert_eq!(layer.markers[0].style.fill_color, "#FF3333");
    }

    #[test]
    fn one_marker_per_feature_without_dedup() {
        let same = quake("Ridgecrest, CA", 1.2, 42, [-117.6, 35.7, 8.0]);
        let broken = serde_json::json!({
            "type": "Feature",
            "properties": { "place": "nowhere", "mag": 3.0, "time": 42 },
            "geometry": null
        });
        let layer = build_earthquake_layer(&quakes(vec![same.clone(), same, broken]));

        assert_eq!(layer.markers.len(), 3);
        assert_eq!(layer.markers[0], layer.markers[1]);
        assert_eq!(layer.markers[2].position, None);
        assert_eq!(layer.markers[2].style.fill_color, "#99FF33");
    }

    #[test]
    fn popup_lists_place_time_magnitude_depth_in_order() {
        let quake = EarthquakeFeature {
            place: Some("5 km N of <Town> & Co".to_string()),
            time: Some(0),
            magnitude: Some(2.5),
            lon: Some(1.0),
            lat: Some(2.0),
            depth_km: Some(-1.2),
        };
        assert_eq!(
            popup_html(&quake),
            "<h3>5 km N of &lt;Town&gt; &amp; Co</h3><hr><p>Thu Jan 01 1970 00:00:00 UTC</p>\
             <p>Magnitude: 2.5</p><p>Depth: -1.2</p>"
        );
    }

    #[test]
    fn integral_numbers_print_without_fraction() {
        let quake = EarthquakeFeature {
            place: Some("x".into()),
            time: None,
            magnitude: Some(5.0),
            lon: None,
            lat: None,
            depth_km: Some(40.0),
        };
        let html = popup_html(&quake);
        assert!(html.contains("<p>Magnitude: 5</p><p>Depth: 40</p>"));
        assert!(html.contains("<p>Invalid Date</p>"));
    }

    #[test]
    fn plate_layer_uses_constant_style() {
        let plates = serde_json::from_value(collection(vec![
            plate_boundary("AF-AN"),
            plate_boundary("EU-NA"),
        ]))
        .unwrap();
        let layer = build_plate_layer(plates);

        assert_eq!(layer.style, LineStyle { color: "#FF6600", weight: 2.0 });
        assert_eq!(layer.data.features.len(), 2);

        let json = serde_json::to_value(&layer).unwrap();
        assert_eq!(json["data"]["type"], "FeatureCollection");
        assert_eq!(json["data"]["features"][1]["type"], "Feature");
    }
}
