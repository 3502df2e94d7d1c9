use thiserror::Error;

// Define error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed geometry: {reason}")]
    MalformedGeometry { reason: String },
    #[error("No feature under pointer")]
    MissingFeature,
    #[error("Unresolvable coordinate: {0}")]
    UnresolvableCoordinate(String),
    #[error("Map surface rejected {operation} of '{id}': {reason}")]
    SurfaceMutation {
        operation: &'static str,
        id: String,
        reason: String,
    },
    #[error("Invalid feature collection")]
    InvalidFeatureCollection,
    #[error("Error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error parsing GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedGeometry {
            reason: reason.into(),
        }
    }

    pub fn surface(operation: &'static str, id: &str, reason: impl Into<String>) -> Self {
        Error::SurfaceMutation {
            operation,
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
