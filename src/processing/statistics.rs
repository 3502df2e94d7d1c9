use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};

use crate::domain::GreenspaceProperties;

/// Counts per category and the leaf make-up of the trees in a dataset.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_parks: usize,
    pub total_gardens: usize,
    pub total_playgrounds: usize,
    pub total_pitches: usize,
    pub total_forests: usize,
    pub total_woods: usize,
    pub total_trees: usize,
    /// Share of trees, in percent.
    pub percentage_deciduous: f64,
    pub percentage_broadleaved: f64,
    pub percentage_needleleaved: f64,
}

impl Statistics {
    pub fn compute(collection: &FeatureCollection) -> Self {
        let mut stats = Statistics::default();
        let mut deciduous = 0usize;
        let mut broadleaved = 0usize;
        let mut needleleaved = 0usize;

        for feature in &collection.features {
            let props = GreenspaceProperties::from_feature(feature);

            match props.leisure.as_deref() {
                Some("park") => stats.total_parks += 1,
                Some("garden") => stats.total_gardens += 1,
                Some("playground") => stats.total_playgrounds += 1,
                Some("pitch") => stats.total_pitches += 1,
                _ => {}
            }
            if props.landuse.as_deref() == Some("forest") {
                stats.total_forests += 1;
            }
            if props.natural.as_deref() == Some("wood") {
                stats.total_woods += 1;
            }

            if props.is_tree() {
                stats.total_trees += 1;
                if props.leaf_cycle.as_deref() == Some("deciduous") {
                    deciduous += 1;
                }
                match props.leaf_type.as_deref() {
                    Some("broadleaved") => broadleaved += 1,
                    Some("needleleaved") => needleleaved += 1,
                    _ => {}
                }
            }
        }

        stats.percentage_deciduous = percentage(deciduous, stats.total_trees);
        stats.percentage_broadleaved = percentage(broadleaved, stats.total_trees);
        stats.percentage_needleleaved = percentage(needleleaved, stats.total_trees);
        stats
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::{Feature, Geometry, Value};
    use serde_json::Map;

    fn feature(props: &[(&str, &str)]) -> Feature {
        let mut feature = Feature::from(Geometry::new(Value::Point(vec![0.0, 0.0])));
        let mut map = Map::new();
        for (key, value) in props {
            map.insert(key.to_string(), (*value).into());
        }
        feature.properties = Some(map);
        feature
    }

    #[test]
    fn test_empty_dataset() {
        let stats = Statistics::compute(&FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        });
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn test_counts_and_percentages() {
        let collection = FeatureCollection {
            bbox: None,
            features: vec![
                feature(&[("leisure", "park")]),
                feature(&[("leisure", "park")]),
                feature(&[("leisure", "playground")]),
                feature(&[("landuse", "forest")]),
                feature(&[("natural", "wood")]),
                feature(&[("natural", "tree"), ("leaf_cycle", "deciduous"), ("leaf_type", "broadleaved")]),
                feature(&[("natural", "tree"), ("leaf_cycle", "evergreen"), ("leaf_type", "needleleaved")]),
                feature(&[("natural", "tree"), ("leaf_cycle", "deciduous"), ("leaf_type", "broadleaved")]),
                feature(&[("natural", "tree")]),
            ],
            foreign_members: None,
        };
        let stats = Statistics::compute(&collection);
        assert_eq!(stats.total_parks, 2);
        assert_eq!(stats.total_playgrounds, 1);
        assert_eq!(stats.total_gardens, 0);
        assert_eq!(stats.total_forests, 1);
        assert_eq!(stats.total_woods, 1);
        assert_eq!(stats.total_trees, 4);
        assert_eq!(stats.percentage_deciduous, 50.0);
        assert_eq!(stats.percentage_broadleaved, 50.0);
        assert_eq!(stats.percentage_needleleaved, 25.0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Statistics::default()).unwrap();
        assert!(json.get("totalParks").is_some());
        assert!(json.get("percentageNeedleleaved").is_some());
    }
}
