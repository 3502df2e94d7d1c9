use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::filters::{FilterCatalog, FilterRule};
use crate::utils::error::Error;

/// Douglas-Peucker tolerance used when no configuration is given.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Polygon simplification settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimplifyOptions {
    /// Maximum distance a removed vertex may lie from the simplified ring,
    /// in coordinate units (degrees).
    pub tolerance: f64,
    /// Run plain Douglas-Peucker on the full ring. When false, vertices closer
    /// than `tolerance` to their predecessor are dropped first.
    pub high_quality: bool,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        SimplifyOptions {
            tolerance: DEFAULT_TOLERANCE,
            high_quality: true,
        }
    }
}

/// Point clustering for the trees source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterOptions {
    pub enabled: bool,
    pub radius: u32,
    pub max_zoom: u32,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        ClusterOptions {
            enabled: true,
            radius: 50,
            max_zoom: 14,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapConfig {
    pub style: String,
    /// Initial center as `[longitude, latitude]`.
    pub center: [f64; 2],
    pub zoom: f64,
    pub simplify: SimplifyOptions,
    pub clustering: ClusterOptions,
    pub heatzones: bool,
    pub filters: Option<Vec<FilterRule>>,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            style: "mapbox://styles/mapbox/streets-v12".to_string(),
            center: [13.404954, 52.520008],
            zoom: 11.0,
            simplify: SimplifyOptions::default(),
            clustering: ClusterOptions::default(),
            heatzones: false,
            filters: None,
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The configured catalog, or the built-in one when no override is set.
    pub fn catalog(&self) -> FilterCatalog {
        match &self.filters {
            Some(rules) => FilterCatalog::new(rules.clone()),
            None => FilterCatalog::default(),
        }
    }
}
