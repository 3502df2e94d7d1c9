use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::generation::greenspace::generate_greenspace_collection;
use crate::utils::error::Error;

/// Berlin-sized extent used for generated datasets.
const X_RANGE: (f64, f64) = (13.1, 13.7);
const Y_RANGE: (f64, f64) = (52.35, 52.65);

/// Writes a seeded synthetic greenspace dataset to `path` as GeoJSON.
pub fn write_synthetic_dataset(
    path: impl AsRef<Path>,
    num_features: usize,
    seed: u64,
) -> Result<(), Error> {
    info!("Generating {} features...", num_features);
    let collection = generate_greenspace_collection(num_features, 64, seed, X_RANGE, Y_RANGE);

    let geojson_string = serde_json::to_string(&collection)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(geojson_string.as_bytes())?;

    info!("Data saved to {}", path.as_ref().display());
    Ok(())
}
