use geojson::Feature;
use log::error;

use crate::geometry::locate::{DETAILS_HEADER, LocatedFeature, locate};
use crate::map::surface::{MapSurface, Popup};
use crate::utils::error::Error;

/// Popup markup: a bold header, then one `key: value` line per property.
pub fn popup_html(located: &LocatedFeature) -> String {
    let mut html = format!("<strong>{}</strong><br>", DETAILS_HEADER);
    for (key, value) in &located.properties {
        html.push_str(key);
        html.push_str(": ");
        html.push_str(value);
        html.push_str("<br>");
    }
    html
}

/// Opens a popup for the first clicked feature.
///
/// # Arguments
/// * `surface` - The map surface to draw on.
/// * `features` - Features under the pointer, topmost first.
/// # Returns
/// `Ok(true)` when a popup was added, `Ok(false)` when the click carried no
/// feature or no usable coordinate. Surface failures are returned as errors.
pub fn show_popup<S: MapSurface + ?Sized>(
    surface: &mut S,
    features: &[Feature],
) -> Result<bool, Error> {
    let located = match locate(features) {
        Ok(located) => located,
        Err(Error::MissingFeature) => {
            error!("No features found in the click event");
            return Ok(false);
        }
        Err(Error::UnresolvableCoordinate(reason)) => {
            error!("Invalid coordinates: {}", reason);
            return Ok(false);
        }
        Err(other) => return Err(other),
    };

    Popup::new()
        .set_lng_lat(located.coordinate)
        .set_html(popup_html(&located))
        .add_to(surface)?;
    Ok(true)
}
