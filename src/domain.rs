use geojson::Feature;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The property names used to classify features into thematic layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThematicKey {
    LeafType,
    Leisure,
    Landuse,
    Natural,
    LeafCycle,
}

impl ThematicKey {
    pub const ALL: [ThematicKey; 5] = [
        ThematicKey::LeafType,
        ThematicKey::Leisure,
        ThematicKey::Landuse,
        ThematicKey::Natural,
        ThematicKey::LeafCycle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThematicKey::LeafType => "leaf_type",
            ThematicKey::Leisure => "leisure",
            ThematicKey::Landuse => "landuse",
            ThematicKey::Natural => "natural",
            ThematicKey::LeafCycle => "leaf_cycle",
        }
    }

    /// Reads this key from a feature's properties as a string.
    pub fn value_of<'a>(&self, feature: &'a Feature) -> Option<&'a str> {
        feature
            .properties
            .as_ref()
            .and_then(|props| props.get(self.as_str()))
            .and_then(Value::as_str)
    }
}

/// Typed view over the thematic properties of a feature.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreenspaceProperties {
    pub leaf_type: Option<String>,
    pub leisure: Option<String>,
    pub landuse: Option<String>,
    pub natural: Option<String>,
    pub leaf_cycle: Option<String>,
}

impl GreenspaceProperties {
    pub fn from_feature(feature: &Feature) -> Self {
        let get = |key: ThematicKey| key.value_of(feature).map(str::to_string);
        GreenspaceProperties {
            leaf_type: get(ThematicKey::LeafType),
            leisure: get(ThematicKey::Leisure),
            landuse: get(ThematicKey::Landuse),
            natural: get(ThematicKey::Natural),
            leaf_cycle: get(ThematicKey::LeafCycle),
        }
    }

    pub fn get(&self, key: ThematicKey) -> Option<&str> {
        match key {
            ThematicKey::LeafType => self.leaf_type.as_deref(),
            ThematicKey::Leisure => self.leisure.as_deref(),
            ThematicKey::Landuse => self.landuse.as_deref(),
            ThematicKey::Natural => self.natural.as_deref(),
            ThematicKey::LeafCycle => self.leaf_cycle.as_deref(),
        }
    }

    /// Property map with only the keys that are set, in `ThematicKey::ALL` order.
    pub fn into_properties(self) -> Map<String, Value> {
        let mut props = Map::new();
        for key in ThematicKey::ALL {
            if let Some(value) = self.get(key) {
                props.insert(key.as_str().to_string(), Value::String(value.to_string()));
            }
        }
        props
    }

    pub fn is_tree(&self) -> bool {
        self.natural.as_deref() == Some("tree")
    }
}

/// Layer identifiers installed on the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapLayer {
    ParksLayer,
    GardensLayer,
    PlaygroundsLayer,
    PitchesLayer,
    ForestsLayer,
    WoodsLayer,
    HeatzonesLayer,
    TreesLayer,
    Clusters,
    ClusterCount,
    UnclusteredPoint,
}

impl MapLayer {
    pub const ALL: [MapLayer; 11] = [
        MapLayer::ParksLayer,
        MapLayer::GardensLayer,
        MapLayer::PlaygroundsLayer,
        MapLayer::PitchesLayer,
        MapLayer::ForestsLayer,
        MapLayer::WoodsLayer,
        MapLayer::HeatzonesLayer,
        MapLayer::TreesLayer,
        MapLayer::Clusters,
        MapLayer::ClusterCount,
        MapLayer::UnclusteredPoint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapLayer::ParksLayer => "parksLayer",
            MapLayer::GardensLayer => "gardensLayer",
            MapLayer::PlaygroundsLayer => "playgroundsLayer",
            MapLayer::PitchesLayer => "pitchesLayer",
            MapLayer::ForestsLayer => "forestsLayer",
            MapLayer::WoodsLayer => "woodsLayer",
            MapLayer::HeatzonesLayer => "heatzonesLayer",
            MapLayer::TreesLayer => "treesLayer",
            MapLayer::Clusters => "clusters",
            MapLayer::ClusterCount => "cluster-count",
            MapLayer::UnclusteredPoint => "unclustered-point",
        }
    }
}

/// Source identifiers installed on the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapSource {
    ParksSource,
    GardensSource,
    PlaygroundsSource,
    PitchesSource,
    ForestsSource,
    WoodsSource,
    HeatzonesSource,
    TreesSource,
}

impl MapSource {
    pub const ALL: [MapSource; 8] = [
        MapSource::ParksSource,
        MapSource::GardensSource,
        MapSource::PlaygroundsSource,
        MapSource::PitchesSource,
        MapSource::ForestsSource,
        MapSource::WoodsSource,
        MapSource::HeatzonesSource,
        MapSource::TreesSource,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapSource::ParksSource => "parksSource",
            MapSource::GardensSource => "gardensSource",
            MapSource::PlaygroundsSource => "playgroundsSource",
            MapSource::PitchesSource => "pitchesSource",
            MapSource::ForestsSource => "forestsSource",
            MapSource::WoodsSource => "woodsSource",
            MapSource::HeatzonesSource => "heatzonesSource",
            MapSource::TreesSource => "treesSource",
        }
    }
}

/// One thematic layer of the map, tying a layer id to its source id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Parks,
    Gardens,
    Playgrounds,
    Pitches,
    Forests,
    Woods,
    Heatzones,
    Trees,
}

impl LayerKind {
    pub fn layer(&self) -> MapLayer {
        match self {
            LayerKind::Parks => MapLayer::ParksLayer,
            LayerKind::Gardens => MapLayer::GardensLayer,
            LayerKind::Playgrounds => MapLayer::PlaygroundsLayer,
            LayerKind::Pitches => MapLayer::PitchesLayer,
            LayerKind::Forests => MapLayer::ForestsLayer,
            LayerKind::Woods => MapLayer::WoodsLayer,
            LayerKind::Heatzones => MapLayer::HeatzonesLayer,
            LayerKind::Trees => MapLayer::TreesLayer,
        }
    }

    pub fn source(&self) -> MapSource {
        match self {
            LayerKind::Parks => MapSource::ParksSource,
            LayerKind::Gardens => MapSource::GardensSource,
            LayerKind::Playgrounds => MapSource::PlaygroundsSource,
            LayerKind::Pitches => MapSource::PitchesSource,
            LayerKind::Forests => MapSource::ForestsSource,
            LayerKind::Woods => MapSource::WoodsSource,
            LayerKind::Heatzones => MapSource::HeatzonesSource,
            LayerKind::Trees => MapSource::TreesSource,
        }
    }

    /// Fill colour used when the layer is drawn.
    pub fn color(&self) -> &'static str {
        match self {
            LayerKind::Parks => "#4caf50",
            LayerKind::Gardens => "#8bc34a",
            LayerKind::Playgrounds => "#ffb300",
            LayerKind::Pitches => "#26a69a",
            LayerKind::Forests => "#1b5e20",
            LayerKind::Woods => "#33691e",
            LayerKind::Heatzones => "#e53935",
            LayerKind::Trees => "#2e7d32",
        }
    }

    /// Resolves a filter rule key to the layer it feeds.
    pub fn for_filter_key(key: &str) -> Option<LayerKind> {
        match key {
            "parks" => Some(LayerKind::Parks),
            "gardens" => Some(LayerKind::Gardens),
            "playgrounds" => Some(LayerKind::Playgrounds),
            "pitches" => Some(LayerKind::Pitches),
            "forests" => Some(LayerKind::Forests),
            "woods" => Some(LayerKind::Woods),
            "trees" | "deciduous" | "broadleaved" | "needleleaved" => Some(LayerKind::Trees),
            _ => None,
        }
    }
}
