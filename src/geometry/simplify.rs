use geo::{Coord, LineString, Simplify};
use geojson::{Feature, FeatureCollection, Geometry, PolygonType, Position, Value};
use rayon::prelude::*;

use crate::config::SimplifyOptions;
use crate::utils::error::Error;
use crate::utils::geometry::{line_string_to_ring, ring_to_line_string};

/// Simplifies every polygon ring of a feature collection.
///
/// Polygon and MultiPolygon rings are reduced with Douglas-Peucker; every other
/// geometry passes through unchanged. The output has the same features in the
/// same order with the same properties. The input is left untouched.
///
/// # Arguments
/// * `collection` - The collection to simplify.
/// * `options` - Tolerance and quality settings.
/// # Returns
/// The simplified collection, or the first `Error::MalformedGeometry` encountered.
pub fn simplify(
    collection: &FeatureCollection,
    options: &SimplifyOptions,
) -> Result<FeatureCollection, Error> {
    let features = collection
        .features
        .iter()
        .map(|feature| simplify_feature(feature, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        bbox: collection.bbox.clone(),
        features,
        foreign_members: collection.foreign_members.clone(),
    })
}

/// Same as [`simplify`], with features processed on the rayon pool.
/// Feature order is preserved.
pub fn simplify_parallel(
    collection: &FeatureCollection,
    options: &SimplifyOptions,
) -> Result<FeatureCollection, Error> {
    let features = collection
        .features
        .par_iter()
        .map(|feature| simplify_feature(feature, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        bbox: collection.bbox.clone(),
        features,
        foreign_members: collection.foreign_members.clone(),
    })
}

/// Simplifies a single feature. Features without geometry are returned as-is.
pub fn simplify_feature(feature: &Feature, options: &SimplifyOptions) -> Result<Feature, Error> {
    let geometry = match &feature.geometry {
        Some(geometry) => Some(simplify_geometry(geometry, options)?),
        None => None,
    };

    Ok(Feature {
        bbox: feature.bbox.clone(),
        geometry,
        id: feature.id.clone(),
        properties: feature.properties.clone(),
        foreign_members: feature.foreign_members.clone(),
    })
}

fn simplify_geometry(geometry: &Geometry, options: &SimplifyOptions) -> Result<Geometry, Error> {
    let value = match &geometry.value {
        Value::Polygon(rings) => Value::Polygon(simplify_polygon(rings, options)?),
        Value::MultiPolygon(polygons) => Value::MultiPolygon(
            polygons
                .iter()
                .map(|rings| simplify_polygon(rings, options))
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Point(_)
        | Value::MultiPoint(_)
        | Value::LineString(_)
        | Value::MultiLineString(_)
        | Value::GeometryCollection(_) => return Ok(geometry.clone()),
    };

    Ok(Geometry {
        bbox: geometry.bbox.clone(),
        value,
        foreign_members: geometry.foreign_members.clone(),
    })
}

fn simplify_polygon(rings: &PolygonType, options: &SimplifyOptions) -> Result<PolygonType, Error> {
    rings
        .iter()
        .map(|ring| simplify_ring(ring, options))
        .collect()
}

/// Simplifies one ring.
///
/// The first and last vertices are always kept, so a closed ring stays closed,
/// and the result never has more vertices than the input.
pub fn simplify_ring(ring: &[Position], options: &SimplifyOptions) -> Result<Vec<Position>, Error> {
    let line_string = ring_to_line_string(ring)?;

    // Nothing to drop, or no usable tolerance
    if line_string.0.len() <= 2 || options.tolerance.is_nan() || options.tolerance <= 0.0 {
        return Ok(line_string_to_ring(line_string));
    }

    let line_string = if options.high_quality {
        line_string
    } else {
        drop_near_vertices(line_string, options.tolerance)
    };

    Ok(line_string_to_ring(line_string.simplify(&options.tolerance)))
}

/// Drops vertices closer than `tolerance` to the previously kept vertex.
/// The last vertex is always kept.
fn drop_near_vertices(line_string: LineString<f64>, tolerance: f64) -> LineString<f64> {
    let squared_tolerance = tolerance * tolerance;
    let coords = line_string.0;
    let last_index = coords.len().saturating_sub(1);

    let mut kept: Vec<Coord<f64>> = Vec::with_capacity(coords.len());
    for (index, &coord) in coords.iter().enumerate() {
        let keep = index == last_index
            || match kept.last() {
                Some(previous) => squared_distance(*previous, coord) > squared_tolerance,
                None => true,
            };
        if keep {
            kept.push(coord);
        }
    }
    LineString::new(kept)
}

fn squared_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let delta = a - b;
    delta.x * delta.x + delta.y * delta.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    // Helper function to create a feature collection
    fn create_feature_collection(geometries: Vec<Value>) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: geometries
                .into_iter()
                .map(|value| {
                    let mut props = Map::new();
                    props.insert("leisure".to_string(), "park".into());
                    Feature {
                        bbox: None,
                        geometry: Some(Geometry::new(value)),
                        id: None,
                        properties: Some(props),
                        foreign_members: None,
                    }
                })
                .collect(),
            foreign_members: None,
        }
    }

    // Closed ring of a square with a wobbly bottom edge
    fn wobbly_square() -> Vec<Position> {
        vec![
            vec![0.0, 0.0],
            vec![0.25, 0.001],
            vec![0.5, -0.002],
            vec![0.75, 0.001],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ]
    }

    fn rings_of(collection: &FeatureCollection, index: usize) -> Vec<Vec<Position>> {
        match &collection.features[index].geometry.as_ref().unwrap().value {
            Value::Polygon(rings) => rings.clone(),
            Value::MultiPolygon(polygons) => polygons.iter().flatten().cloned().collect(),
            other => panic!("Expected a polygon, found {}", other.type_name()),
        }
    }

    #[test]
    fn test_empty_collection() {
        let empty = create_feature_collection(vec![]);
        let simplified = simplify(&empty, &SimplifyOptions::default()).unwrap();
        assert_eq!(simplified.features.len(), 0);
    }

    #[test]
    fn test_cardinality_and_order_preserved() {
        let collection = create_feature_collection(vec![
            Value::Point(vec![1.0, 2.0]),
            Value::Polygon(vec![wobbly_square()]),
            Value::LineString(vec![vec![0.0, 0.0], vec![0.5, 0.001], vec![1.0, 0.0]]),
            Value::MultiPolygon(vec![vec![wobbly_square()], vec![wobbly_square()]]),
        ]);
        let simplified = simplify(&collection, &SimplifyOptions::default()).unwrap();
        assert_eq!(simplified.features.len(), collection.features.len());
        let kinds: Vec<&str> = simplified
            .features
            .iter()
            .map(|f| f.geometry.as_ref().unwrap().value.type_name())
            .collect();
        assert_eq!(kinds, vec!["Point", "Polygon", "LineString", "MultiPolygon"]);
        for (before, after) in collection.features.iter().zip(&simplified.features) {
            assert_eq!(before.properties, after.properties);
        }
    }

    #[test]
    fn test_non_polygons_untouched() {
        let collection = create_feature_collection(vec![
            Value::Point(vec![1.0, 2.0]),
            Value::MultiPoint(vec![vec![0.0, 0.0], vec![0.0, 0.001]]),
            Value::LineString(vec![vec![0.0, 0.0], vec![0.5, 0.001], vec![1.0, 0.0]]),
            Value::MultiLineString(vec![vec![vec![0.0, 0.0], vec![0.5, 0.001], vec![1.0, 0.0]]]),
        ]);
        let simplified = simplify(&collection, &SimplifyOptions::default()).unwrap();
        assert_eq!(simplified, collection);
    }

    #[test]
    fn test_wobble_removed_and_ring_stays_closed() {
        let ring = wobbly_square();
        let collection = create_feature_collection(vec![Value::Polygon(vec![ring.clone()])]);
        let simplified = simplify(&collection, &SimplifyOptions::default()).unwrap();
        let rings = rings_of(&simplified, 0);
        assert_eq!(
            rings[0],
            vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
                vec![0.0, 1.0],
                vec![0.0, 0.0],
            ]
        );
        assert_eq!(rings[0].first(), ring.first());
        assert_eq!(rings[0].last(), ring.last());
    }

    #[test]
    fn test_every_ring_of_multipolygon_is_simplified() {
        let hole = vec![
            vec![0.2, 0.2],
            vec![0.4, 0.201],
            vec![0.6, 0.2],
            vec![0.6, 0.6],
            vec![0.2, 0.6],
            vec![0.2, 0.2],
        ];
        let collection = create_feature_collection(vec![Value::MultiPolygon(vec![
            vec![wobbly_square(), hole.clone()],
            vec![wobbly_square()],
        ])]);
        let original = rings_of(&collection, 0);
        let simplified = rings_of(
            &simplify(&collection, &SimplifyOptions::default()).unwrap(),
            0,
        );
        assert_eq!(simplified.len(), 3);
        for (before, after) in original.iter().zip(&simplified) {
            assert!(after.len() < before.len());
            assert_eq!(after.first(), before.first());
            assert_eq!(after.last(), before.last());
        }
    }

    #[test]
    fn test_square_keeps_its_corners() {
        let square = vec![
            vec![0.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 0.0],
        ];
        let simplified = simplify_ring(&square, &SimplifyOptions::default()).unwrap();
        assert_eq!(simplified, square);
    }

    #[test]
    fn test_tiny_ring_keeps_closing_vertices() {
        // Whole ring lies within tolerance
        let ring = vec![
            vec![0.0, 0.0],
            vec![0.001, 0.0],
            vec![0.001, 0.001],
            vec![0.0, 0.001],
            vec![0.0, 0.0],
        ];
        let simplified = simplify_ring(&ring, &SimplifyOptions::default()).unwrap();
        assert!(simplified.len() >= 2);
        assert!(simplified.len() <= ring.len());
        assert_eq!(simplified.first(), ring.first());
        assert_eq!(simplified.last(), ring.last());
    }

    #[test]
    fn test_low_quality_mode_drops_near_vertices() {
        let ring = vec![
            vec![0.0, 0.0],
            vec![0.001, 0.5],
            vec![0.0, 1.0],
            vec![0.0005, 1.001],
            vec![1.0, 1.0],
            vec![0.0, 0.0],
        ];
        let options = SimplifyOptions {
            tolerance: 0.01,
            high_quality: false,
        };
        let simplified = simplify_ring(&ring, &options).unwrap();
        assert!(!simplified.contains(&vec![0.0005, 1.001]));
        assert!(!simplified.contains(&vec![0.001, 0.5]));
        assert_eq!(simplified.first(), ring.first());
        assert_eq!(simplified.last(), ring.last());
    }

    #[test]
    fn test_zero_tolerance_keeps_everything() {
        let options = SimplifyOptions {
            tolerance: 0.0,
            high_quality: true,
        };
        let ring = wobbly_square();
        assert_eq!(simplify_ring(&ring, &options).unwrap(), ring);
    }

    #[test]
    fn test_malformed_ring_fails_fast() {
        let collection = create_feature_collection(vec![
            Value::Point(vec![1.0, 2.0]),
            Value::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![1.0, f64::NAN],
                vec![1.0, 1.0],
                vec![0.0, 0.0],
            ]]),
        ]);
        let result = simplify(&collection, &SimplifyOptions::default());
        assert!(matches!(result, Err(Error::MalformedGeometry { .. })));
    }

    #[test]
    fn test_three_dimensional_positions_are_rejected() {
        let ring = vec![vec![0.0, 0.0, 5.0], vec![1.0, 0.0, 5.0], vec![0.0, 0.0, 5.0]];
        assert!(simplify_ring(&ring, &SimplifyOptions::default()).is_err());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let collection = create_feature_collection(vec![Value::Polygon(vec![wobbly_square()])]);
        let copy = collection.clone();
        let _ = simplify(&collection, &SimplifyOptions::default()).unwrap();
        assert_eq!(collection, copy);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let collection = create_feature_collection(
            (0..32)
                .map(|i| {
                    if i % 2 == 0 {
                        Value::Polygon(vec![wobbly_square()])
                    } else {
                        Value::Point(vec![i as f64, 0.0])
                    }
                })
                .collect(),
        );
        let options = SimplifyOptions::default();
        assert_eq!(
            simplify_parallel(&collection, &options).unwrap(),
            simplify(&collection, &options).unwrap()
        );
    }

    #[test]
    fn test_feature_without_geometry_passes_through() {
        let feature = Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: None,
            foreign_members: None,
        };
        let simplified = simplify_feature(&feature, &SimplifyOptions::default()).unwrap();
        assert_eq!(simplified, feature);
    }
}
