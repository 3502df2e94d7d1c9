use geojson::{Feature, Position, Value};
use serde_json::{Map, Value as JsonValue};

use crate::utils::error::Error;

/// First line of every popup description.
pub const DETAILS_HEADER: &str = "Details:";

/// Where to anchor a popup for a clicked feature, and what to show in it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedFeature {
    /// `[longitude, latitude]`
    pub coordinate: [f64; 2],
    /// The `Details:` header followed by one `key: value` line per property.
    pub properties_text: String,
    /// Stringified properties in iteration order.
    pub properties: Vec<(String, String)>,
}

/// What one step of descent into a coordinate array yields.
#[derive(Debug, Clone, Copy)]
enum Nested<'a> {
    Scalar(f64),
    Position(&'a [f64]),
    Ring(&'a [Position]),
}

/// Locates the first feature under the pointer.
///
/// # Arguments
/// * `features` - Features reported by the map surface for a click, topmost first.
/// # Returns
/// The popup anchor and text, `Error::MissingFeature` when nothing was hit, or
/// `Error::UnresolvableCoordinate` when no coordinate pair can be derived.
pub fn locate(features: &[Feature]) -> Result<LocatedFeature, Error> {
    let feature = features.first().ok_or(Error::MissingFeature)?;
    locate_feature(feature)
}

pub fn locate_feature(feature: &Feature) -> Result<LocatedFeature, Error> {
    let geometry = feature.geometry.as_ref().ok_or(Error::MissingFeature)?;
    let coordinate = resolve_coordinate(&geometry.value)?;
    let properties = stringify_properties(feature.properties.as_ref());

    Ok(LocatedFeature {
        coordinate,
        properties_text: properties_text(&properties),
        properties,
    })
}

/// Derives one representative `[longitude, latitude]` from any geometry.
///
/// Points yield their coordinate and polygons the first vertex of their outer
/// ring. The multi kinds and LineString descend two levels into their
/// coordinates; when that lands on a ring, its first vertex is taken. A
/// descent that lands on a bare number (LineString, MultiPoint) is rejected
/// like any other value that is not a pair of finite numbers.
pub fn resolve_coordinate(value: &Value) -> Result<[f64; 2], Error> {
    let nested = match value {
        Value::Point(position) => Some(Nested::Position(position)),
        Value::Polygon(rings) => rings.first().map(|ring| Nested::Ring(ring)),
        Value::MultiPoint(positions) | Value::LineString(positions) => positions
            .first()
            .and_then(|position| position.first())
            .map(|number| Nested::Scalar(*number)),
        Value::MultiLineString(lines) => lines
            .first()
            .and_then(|line| line.first())
            .map(|position| Nested::Position(position)),
        Value::MultiPolygon(polygons) => polygons
            .first()
            .and_then(|rings| rings.first())
            .map(|ring| Nested::Ring(ring)),
        Value::GeometryCollection(_) => {
            return Err(Error::UnresolvableCoordinate(format!(
                "unsupported geometry kind {}",
                value.type_name()
            )));
        }
    };

    let nested = nested.ok_or_else(|| {
        Error::UnresolvableCoordinate(format!("empty {} coordinates", value.type_name()))
    })?;

    validate_pair(unwrap_ring(nested)?)
}

// One extra level of nesting is unwrapped to its first element.
fn unwrap_ring(nested: Nested<'_>) -> Result<Nested<'_>, Error> {
    match nested {
        Nested::Ring(ring) => ring
            .first()
            .map(|position| Nested::Position(position))
            .ok_or_else(|| Error::UnresolvableCoordinate("empty ring".to_string())),
        other => Ok(other),
    }
}

fn validate_pair(nested: Nested<'_>) -> Result<[f64; 2], Error> {
    match nested {
        Nested::Position(&[longitude, latitude])
            if longitude.is_finite() && latitude.is_finite() =>
        {
            Ok([longitude, latitude])
        }
        Nested::Position(position) => Err(Error::UnresolvableCoordinate(format!(
            "expected a pair of finite numbers, found {:?}",
            position
        ))),
        Nested::Scalar(number) => Err(Error::UnresolvableCoordinate(format!(
            "expected a coordinate pair, found the number {}",
            number
        ))),
        Nested::Ring(_) => Err(Error::UnresolvableCoordinate(
            "expected a coordinate pair, found a ring".to_string(),
        )),
    }
}

fn stringify_properties(properties: Option<&Map<String, JsonValue>>) -> Vec<(String, String)> {
    properties
        .into_iter()
        .flatten()
        .map(|(key, value)| {
            let value = match value {
                JsonValue::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

fn properties_text(properties: &[(String, String)]) -> String {
    let mut text = String::from(DETAILS_HEADER);
    for (key, value) in properties {
        text.push('\n');
        text.push_str(key);
        text.push_str(": ");
        text.push_str(value);
    }
    text
}
