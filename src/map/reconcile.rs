use log::debug;

use crate::domain::{MapLayer, MapSource};
use crate::map::surface::MapSurface;
use crate::utils::error::Error;

/// Removes the named layers, then the named sources, from a map surface.
///
/// Only ids the surface currently reports are removed, so calling this when
/// nothing is installed is a no-op. All layers go before any source because a
/// surface refuses to drop a source that a layer still draws from. A failed
/// removal is returned as is; nothing is retried.
///
/// # Arguments
/// * `surface` - The live map surface.
/// * `layer_ids` - Layer ids to clear, in removal order.
/// * `source_ids` - Source ids to clear, in removal order.
pub fn reconcile<S, L, R>(surface: &mut S, layer_ids: &[L], source_ids: &[R]) -> Result<(), Error>
where
    S: MapSurface + ?Sized,
    L: AsRef<str>,
    R: AsRef<str>,
{
    for id in layer_ids {
        let id = id.as_ref();
        if surface.get_layer(id).is_some() {
            surface.remove_layer(id)?;
            debug!("Removed layer {}", id);
        }
    }

    for id in source_ids {
        let id = id.as_ref();
        if surface.get_source(id).is_some() {
            surface.remove_source(id)?;
            debug!("Removed source {}", id);
        }
    }

    Ok(())
}

/// Clears every layer and source id this crate ever installs.
pub fn reconcile_all<S: MapSurface + ?Sized>(surface: &mut S) -> Result<(), Error> {
    let layer_ids: Vec<&str> = MapLayer::ALL.iter().map(MapLayer::as_str).collect();
    let source_ids: Vec<&str> = MapSource::ALL.iter().map(MapSource::as_str).collect();
    reconcile(surface, &layer_ids, &source_ids)
}
