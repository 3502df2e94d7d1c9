use geojson::{Feature, FeatureCollection, Geometry, Position, Value};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::GreenspaceProperties;

/// Generates a seeded synthetic greenspace FeatureCollection.
///
/// Features cycle through parks, gardens, playgrounds, pitches, forests,
/// woods and trees. Areas are dense, slightly noisy rings so simplification
/// has vertices to drop; forests are MultiPolygons with a hole. Trees are
/// points carrying leaf cycle and leaf type.
///
/// # Arguments
/// * `num_features` - The total number of features to generate.
/// * `vertices_per_ring` - Vertex count of every generated outer ring (at least 4).
/// * `seed` - Seed for the random number generator.
/// * `x_range` - Longitude range, e.g. `(13.1, 13.7)`.
/// * `y_range` - Latitude range, e.g. `(52.35, 52.65)`.
pub fn generate_greenspace_collection(
    num_features: usize,
    vertices_per_ring: usize,
    seed: u64,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> FeatureCollection {
    let mut rng = StdRng::seed_from_u64(seed);
    let vertices = vertices_per_ring.max(4);
    let mut features = Vec::with_capacity(num_features);

    for i in 0..num_features {
        let center = [
            rng.gen_range(x_range.0..x_range.1),
            rng.gen_range(y_range.0..y_range.1),
        ];
        let radius = rng.gen_range(0.02..0.08);

        let mut props = GreenspaceProperties::default();
        let value = match i % 7 {
            0 => {
                props.leisure = Some("park".to_string());
                Value::Polygon(vec![noisy_ring(&mut rng, center, radius, vertices)])
            }
            1 => {
                props.leisure = Some("garden".to_string());
                Value::Polygon(vec![noisy_ring(&mut rng, center, radius / 2.0, vertices)])
            }
            2 => {
                props.leisure = Some("playground".to_string());
                Value::Polygon(vec![noisy_ring(&mut rng, center, radius / 4.0, vertices)])
            }
            3 => {
                props.leisure = Some("pitch".to_string());
                Value::Polygon(vec![noisy_ring(&mut rng, center, radius / 4.0, vertices)])
            }
            4 => {
                props.landuse = Some("forest".to_string());
                let outer = noisy_ring(&mut rng, center, radius * 2.0, vertices);
                let hole = noisy_ring(&mut rng, center, radius / 2.0, vertices / 2);
                let satellite = [center[0] + radius * 3.0, center[1]];
                Value::MultiPolygon(vec![
                    vec![outer, hole],
                    vec![noisy_ring(&mut rng, satellite, radius / 2.0, vertices)],
                ])
            }
            5 => {
                props.natural = Some("wood".to_string());
                Value::Polygon(vec![noisy_ring(&mut rng, center, radius, vertices)])
            }
            _ => {
                props.natural = Some("tree".to_string());
                let leaf_cycle = if rng.gen_bool(0.7) { "deciduous" } else { "evergreen" };
                let leaf_type = if rng.gen_bool(0.6) { "broadleaved" } else { "needleleaved" };
                props.leaf_cycle = Some(leaf_cycle.to_string());
                props.leaf_type = Some(leaf_type.to_string());
                Value::Point(center.to_vec())
            }
        };

        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: Some(geojson::feature::Id::Number((i as u64).into())),
            properties: Some(props.into_properties()),
            foreign_members: None,
        });
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Closed ring around `center` with the radius jittered by up to 5%.
fn noisy_ring(rng: &mut StdRng, center: [f64; 2], radius: f64, vertices: usize) -> Vec<Position> {
    let vertices = vertices.max(3);
    let mut ring: Vec<Position> = (0..vertices)
        .map(|step| {
            let angle = step as f64 / vertices as f64 * std::f64::consts::TAU;
            let r = radius * rng.gen_range(0.95..1.05);
            vec![center[0] + r * angle.cos(), center[1] + r * angle.sin()]
        })
        .collect();
    ring.push(ring[0].clone());
    ring
}
