use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::constants::{DEFAULT_PORT, EARTHQUAKE_FEED_URL, PLATES_FEED_URL};
use crate::tiles::Basemap;

/// How the two feeds are fetched for one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FetchMode {
    /// Earthquakes first, then plates. Latency is the sum of both.
    #[default]
    Sequential,
    /// Both feeds at once.
    Parallel,
}

impl FetchMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "sequential" => Some(FetchMode::Sequential),
            "parallel" => Some(FetchMode::Parallel),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            FetchMode::Sequential => "sequential",
            FetchMode::Parallel => "parallel",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub port: u16,
    pub earthquake_feed_url: String,
    pub plates_feed_url: String,
    pub fetch_mode: FetchMode,
    pub basemap: Basemap,
    pub snapshot_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            earthquake_feed_url: EARTHQUAKE_FEED_URL.to_string(),
            plates_feed_url: PLATES_FEED_URL.to_string(),
            fetch_mode: FetchMode::Sequential,
            basemap: Basemap::Street,
            snapshot_path: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if !config_path.exists() {
            return Ok(Settings::default());
        }

        let file = File::open(&config_path).context("Failed to open config file")?;
        let mut content = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.context("Failed to read line from config")?;
            content.push_str(&line);
            content.push('\n');
        }
        Ok(Self::parse(&content))
    }

    /// Parses `key = value` lines on top of the defaults. Comments start
    /// with `#`; unknown keys and unparsable values are ignored.
    pub fn parse(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            if line.starts_with('#') || line.trim().is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }

        if let Some(port) = config_map.get("port").and_then(|v| v.parse::<u16>().ok()) {
            settings.port = port;
        }
        if let Some(url) = config_map.get("earthquake_feed_url").filter(|v| !v.is_empty()) {
            settings.earthquake_feed_url = url.clone();
        }
        if let Some(url) = config_map.get("plates_feed_url").filter(|v| !v.is_empty()) {
            settings.plates_feed_url = url.clone();
        }
        if let Some(mode) = config_map.get("fetch_mode").and_then(|v| FetchMode::parse(v)) {
            settings.fetch_mode = mode;
        }
        match config_map.get("basemap").map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("street") => settings.basemap = Basemap::Street,
            Some("topographic") => settings.basemap = Basemap::Topographic,
            _ => {}
        }
        if let Some(path) = config_map.get("snapshot_path").filter(|v| !v.is_empty()) {
            settings.snapshot_path = Some(path.clone());
        }

        settings
    }

    pub fn to_ini(&self) -> String {
        let mut content = String::new();
        content.push_str("# QuakeMap Configuration File\n");
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("earthquake_feed_url = \"{}\"\n", self.earthquake_feed_url));
        content.push_str(&format!("plates_feed_url = \"{}\"\n", self.plates_feed_url));
        content.push_str(&format!("fetch_mode = {}\n", self.fetch_mode.as_str()));
        let basemap = match self.basemap {
            Basemap::Street => "street",
            Basemap::Topographic => "topographic",
        };
        content.push_str(&format!("basemap = {}\n", basemap));
        if let Some(ref path) = self.snapshot_path {
            content.push_str(&format!("snapshot_path = \"{}\"\n", path));
        }
        content
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }
        std::fs::write(&config_path, self.to_ini()).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("quakemap.ini");
        path
    }
}
