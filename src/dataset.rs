use std::fs;
use std::path::Path;

use geojson::{FeatureCollection, GeoJson};
use log::{info, warn};

use crate::config::SimplifyOptions;
use crate::geometry::simplify::simplify_feature;
use crate::utils::error::Error;

/// Parses a GeoJSON document that must be a FeatureCollection.
pub fn parse_feature_collection(geojson: &str) -> Result<FeatureCollection, Error> {
    match geojson.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(Error::InvalidFeatureCollection),
    }
}

/// A dataset simplified once at load time and ready to be partitioned.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    collection: FeatureCollection,
    excluded: usize,
}

impl Dataset {
    /// Simplifies every feature of `raw`.
    ///
    /// Features with malformed geometry are left out and counted in
    /// [`Dataset::excluded`]; the rest keep their order.
    pub fn load(raw: &FeatureCollection, options: &SimplifyOptions) -> Self {
        let mut features = Vec::with_capacity(raw.features.len());
        let mut excluded = 0;

        for (index, feature) in raw.features.iter().enumerate() {
            match simplify_feature(feature, options) {
                Ok(simplified) => features.push(simplified),
                Err(e) => {
                    warn!("Skipping feature {} ({:?}): {}", index, feature.id, e);
                    excluded += 1;
                }
            }
        }

        info!(
            "Loaded {} features ({} excluded) with tolerance {}",
            features.len(),
            excluded,
            options.tolerance
        );

        Dataset {
            collection: FeatureCollection {
                bbox: raw.bbox.clone(),
                features,
                foreign_members: raw.foreign_members.clone(),
            },
            excluded,
        }
    }

    pub fn from_geojson_str(geojson: &str, options: &SimplifyOptions) -> Result<Self, Error> {
        let raw = parse_feature_collection(geojson)?;
        Ok(Self::load(&raw, options))
    }

    pub fn from_path(path: impl AsRef<Path>, options: &SimplifyOptions) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)?;
        Self::from_geojson_str(&contents, options)
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Number of features dropped for malformed geometry.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn len(&self) -> usize {
        self.collection.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.features.is_empty()
    }
}
