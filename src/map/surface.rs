use geojson::FeatureCollection;

use crate::config::{ClusterOptions, MapConfig};
use crate::utils::error::Error;

/// Identifier of a layer installed on a map surface.
///
/// Holding a handle does not keep the layer alive; the surface may already
/// have dropped it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub String);

/// Identifier of a source installed on a map surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceHandle(pub String);

impl LayerHandle {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl SourceHandle {
    pub fn id(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerType {
    Fill,
    Circle,
    Symbol,
    Heatmap,
}

/// Restricts a layer drawing a clustered source to one side of the clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterFilter {
    /// Only cluster bubbles (`has point_count`).
    Clustered,
    /// Only single points (`!has point_count`).
    Unclustered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub source: String,
    pub layer_type: LayerType,
    pub color: String,
    pub filter: Option<ClusterFilter>,
}

impl LayerSpec {
    pub fn new(id: &str, source: &str, layer_type: LayerType, color: &str) -> Self {
        LayerSpec {
            id: id.to_string(),
            source: source.to_string(),
            layer_type,
            color: color.to_string(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: ClusterFilter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// A GeoJSON source, optionally clustered.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    pub data: FeatureCollection,
    pub cluster: Option<ClusterOptions>,
}

impl SourceSpec {
    pub fn geojson(data: FeatureCollection) -> Self {
        SourceSpec {
            data,
            cluster: None,
        }
    }

    pub fn clustered(data: FeatureCollection, options: ClusterOptions) -> Self {
        SourceSpec {
            data,
            cluster: Some(options),
        }
    }
}

/// Initial view of a map surface.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub style: String,
    pub center: [f64; 2],
    pub zoom: f64,
}

impl From<&MapConfig> for MapOptions {
    fn from(config: &MapConfig) -> Self {
        MapOptions {
            style: config.style.clone(),
            center: config.center,
            zoom: config.zoom,
        }
    }
}

/// A popup anchored at a coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Popup {
    lng_lat: Option<[f64; 2]>,
    html: String,
}

impl Popup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_lng_lat(mut self, lng_lat: [f64; 2]) -> Self {
        self.lng_lat = Some(lng_lat);
        self
    }

    pub fn set_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    pub fn lng_lat(&self) -> Option<[f64; 2]> {
        self.lng_lat
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn add_to<S: MapSurface + ?Sized>(self, surface: &mut S) -> Result<(), Error> {
        if self.lng_lat.is_none() {
            return Err(Error::surface("add", "popup", "popup has no location"));
        }
        surface.add_popup(self)
    }
}

/// The primitives a rendering engine exposes for layers, sources and popups.
///
/// The surface owns every rendering object; callers only hold identifiers.
pub trait MapSurface {
    fn get_layer(&self, id: &str) -> Option<LayerHandle>;

    fn remove_layer(&mut self, id: &str) -> Result<(), Error>;

    fn get_source(&self, id: &str) -> Option<SourceHandle>;

    /// Fails while any layer still draws from the source.
    fn remove_source(&mut self, id: &str) -> Result<(), Error>;

    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<SourceHandle, Error>;

    /// Fails when the layer's source is not installed or the id is taken.
    fn add_layer(&mut self, layer: LayerSpec) -> Result<LayerHandle, Error>;

    fn add_popup(&mut self, popup: Popup) -> Result<(), Error>;
}
