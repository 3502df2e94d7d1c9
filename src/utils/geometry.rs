use geo::{Coord, LineString};
use geojson::Position;

use crate::utils::error::Error;

/// Validates a GeoJSON position and converts it to a `geo::Coord`.
///
/// A valid position is exactly a longitude/latitude pair of finite numbers.
///
/// # Arguments
/// * `position` - The raw GeoJSON position.
/// # Returns
/// The coordinate, or `Error::MalformedGeometry` on wrong arity or non-finite values.
pub fn position_to_coord(position: &[f64]) -> Result<Coord<f64>, Error> {
    match position {
        [x, y] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
        [_, _] => Err(Error::malformed(format!(
            "non-finite coordinate {:?}",
            position
        ))),
        _ => Err(Error::malformed(format!(
            "expected 2 values per position, found {}",
            position.len()
        ))),
    }
}

/// Converts a GeoJSON ring into a `geo::LineString`, validating every position.
pub fn ring_to_line_string(ring: &[Position]) -> Result<LineString<f64>, Error> {
    ring.iter()
        .map(|position| position_to_coord(position))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// Converts a `geo::LineString` back into GeoJSON positions.
pub fn line_string_to_ring(line_string: LineString<f64>) -> Vec<Position> {
    line_string
        .into_iter()
        .map(|coord| vec![coord.x, coord.y])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_position() {
        let coord = position_to_coord(&[13.4, 52.5]).unwrap();
        assert_eq!(coord, Coord { x: 13.4, y: 52.5 });
    }

    #[test]
    fn test_wrong_arity_is_rejected() {
        assert!(matches!(
            position_to_coord(&[1.0]),
            Err(Error::MalformedGeometry { .. })
        ));
        assert!(matches!(
            position_to_coord(&[1.0, 2.0, 3.0]),
            Err(Error::MalformedGeometry { .. })
        ));
    }

    #[test]
    fn test_non_finite_is_rejected() {
        assert!(position_to_coord(&[f64::NAN, 1.0]).is_err());
        assert!(position_to_coord(&[1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_ring_conversion_keeps_order() {
        let ring = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 0.0]];
        let line_string = ring_to_line_string(&ring).unwrap();
        assert!(line_string.is_closed());
        assert_eq!(line_string_to_ring(line_string), ring);
    }

    #[test]
    fn test_ring_with_bad_position_fails() {
        let ring = vec![vec![0.0, 0.0], vec![1.0], vec![0.0, 0.0]];
        assert!(ring_to_line_string(&ring).is_err());
    }
}
