use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode feed from {url}: {message}")]
    Decode { url: String, message: String },
}

// GeoJSON model. Only the parts the map needs are typed; the rest is kept raw.
// The `type` tags are carried through so the layer data stays valid GeoJSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct FeatureCollection<P> {
    #[serde(rename = "type", default = "feature_collection_tag")]
    pub kind: String,
    pub features: Vec<Feature<P>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de> + Default"))]
pub struct Feature<P> {
    #[serde(rename = "type", default = "feature_tag")]
    pub kind: String,
    /// Missing or `null` properties decode as `P::default()`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub properties: P,
    pub geometry: Option<Geometry>,
}

fn feature_collection_tag() -> String {
    "FeatureCollection".to_string()
}

fn feature_tag() -> String {
    "Feature".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl<P> FeatureCollection<P> {
    pub fn new(features: Vec<Feature<P>>) -> Self {
        Self {
            kind: feature_collection_tag(),
            features,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarthquakeProperties {
    pub place: Option<String>,
    pub mag: Option<f64>,
    /// Epoch milliseconds
    pub time: Option<i64>,
}

pub type EarthquakeCollection = FeatureCollection<EarthquakeProperties>;
pub type PlateCollection = FeatureCollection<Value>;

/// One earthquake record flattened out of its GeoJSON feature.
#[derive(Debug, Clone, PartialEq)]
pub struct EarthquakeFeature {
    pub place: Option<String>,
    pub time: Option<i64>,
    pub magnitude: Option<f64>,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub depth_km: Option<f64>,
}

impl From<&Feature<EarthquakeProperties>> for EarthquakeFeature {
    fn from(feature: &Feature<EarthquakeProperties>) -> Self {
        let coord = |i: usize| {
            feature
                .geometry
                .as_ref()
                .and_then(|g| g.coordinates.as_array())
                .and_then(|c| c.get(i))
                .and_then(Value::as_f64)
        };

        EarthquakeFeature {
            place: feature.properties.place.clone(),
            time: feature.properties.time,
            magnitude: feature.properties.mag,
            lon: coord(0),
            lat: coord(1),
            depth_km: coord(2),
        }
    }
}

impl EarthquakeCollection {
    pub fn earthquakes(&self) -> Vec<EarthquakeFeature> {
        self.features.iter().map(EarthquakeFeature::from).collect()
    }
}

/// Anything that can hand back a GeoJSON document for a URL.
pub trait FeedSource: Send + Sync {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>>;
}

/// Fetch a feed and decode it into a typed collection.
pub async fn fetch_collection<P, S>(source: &S, url: &str) -> Result<FeatureCollection<P>, FetchError>
where
    P: DeserializeOwned + Default,
    S: FeedSource + ?Sized,
{
    let raw = source.fetch_json(url).await?;
    serde_json::from_value(raw).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// reqwest-backed feed source. One GET per call, no retry.
#[derive(Clone, Default)]
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl FeedSource for HttpFeedSource {
    fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        Box::pin(async move {
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|source| FetchError::Request {
                    url: url.to_string(),
                    source,
                })?;

            if !resp.status().is_success() {
                return Err(FetchError::Status {
                    url: url.to_string(),
                    status: resp.status().as_u16(),
                });
            }

            resp.json::<Value>().await.map_err(|e| FetchError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use std::collections::HashMap;

    /// In-memory feed source. URLs without a document answer HTTP 503.
    #[derive(Default)]
    pub struct StubFeeds {
        documents: HashMap<String, Value>,
    }

    impl StubFeeds {
        pub fn with(mut self, url: &str, document: Value) -> Self {
            self.documents.insert(url.to_string(), document);
            self
        }
    }

    impl FeedSource for StubFeeds {
        fn fetch_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
            Box::pin(async move {
                self.documents
                    .get(url)
                    .cloned()
                    .ok_or_else(|| FetchError::Status {
                        url: url.to_string(),
                        status: 503,
                    })
            })
        }
    }

    pub fn quake(place: &str, mag: f64, time: i64, coords: [f64; 3]) -> Value {
        serde_json::json!({
            "type": "Feature",
            "properties": { "place": place, "mag": mag, "time": time, "tsunami": 0 },
            "geometry": { "type": "Point", "coordinates": coords },
            "id": format!("us{time}")
        })
    }

    pub fn collection(features: Vec<Value>) -> Value {
        serde_json::json!({
            "type": "FeatureCollection",
            "metadata": { "generated": 0, "title": "test feed" },
            "features": features
        })
    }

    pub fn plate_boundary(name: &str) -> Value {
        serde_json::json!({
            "type": "Feature",
            "properties": { "Name": name, "LAYER": "plate boundary" },
            "geometry": {
                "type": "LineString",
                "coordinates": [[-0.4379, -54.8518], [-0.0384, -54.6772], [0.3739, -54.5038]]
            }
        })
    }
}
