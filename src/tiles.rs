use serde::Serialize;

use crate::constants::{
    STREET_ATTRIBUTION, STREET_MAP_NAME, STREET_TILES_URL, TOPO_ATTRIBUTION, TOPO_MAP_NAME,
    TOPO_TILES_URL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Basemap {
    Street,
    Topographic,
}

/// A templated raster tile endpoint plus the attribution it requires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileProvider {
    pub id: Basemap,
    pub name: &'static str,
    pub url_template: &'static str,
    pub attribution: &'static str,
}

impl Basemap {
    pub const ALL: [Basemap; 2] = [Basemap::Street, Basemap::Topographic];

    pub fn provider(self) -> TileProvider {
        match self {
            Basemap::Street => TileProvider {
                id: self,
                name: STREET_MAP_NAME,
                url_template: STREET_TILES_URL,
                attribution: STREET_ATTRIBUTION,
            },
            Basemap::Topographic => TileProvider {
                id: self,
                name: TOPO_MAP_NAME,
                url_template: TOPO_TILES_URL,
                attribution: TOPO_ATTRIBUTION,
            },
        }
    }
}

/// The basemap choices with exactly one active at a time.
#[derive(Debug, Clone, Serialize)]
pub struct BasemapSet {
    pub providers: Vec<TileProvider>,
    pub active: Basemap,
}

impl Default for BasemapSet {
    fn default() -> Self {
        Self {
            providers: Basemap::ALL.iter().map(|b| b.provider()).collect(),
            active: Basemap::Street,
        }
    }
}

impl BasemapSet {
    pub fn select(&mut self, basemap: Basemap) {
        self.active = basemap;
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name).collect()
    }
}
