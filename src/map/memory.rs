use std::collections::HashSet;

use crate::map::surface::{
    LayerHandle, LayerSpec, MapOptions, MapSurface, Popup, SourceHandle, SourceSpec,
};
use crate::utils::error::Error;

/// A mutating call received by a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    RemoveLayer(String),
    RemoveSource(String),
    AddSource(String),
    AddLayer(String),
    AddPopup,
}

/// Headless map surface that keeps layers, sources and popups in memory.
///
/// Behaves like a rendering engine where it matters: ids are unique, layers
/// need an installed source, and a source cannot be removed while a layer
/// draws from it. Every mutating call is recorded in order.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    options: MapOptions,
    layers: Vec<LayerSpec>,
    sources: Vec<(String, SourceSpec)>,
    popups: Vec<Popup>,
    calls: Vec<SurfaceCall>,
    failing_removals: HashSet<String>,
}

impl MemorySurface {
    pub fn new(options: MapOptions) -> Self {
        MemorySurface {
            options,
            layers: Vec::new(),
            sources: Vec::new(),
            popups: Vec::new(),
            calls: Vec::new(),
            failing_removals: HashSet::new(),
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Makes every later removal of `id` (layer or source) fail.
    pub fn fail_removal_of(&mut self, id: &str) {
        self.failing_removals.insert(id.to_string());
    }

    pub fn layer(&self, id: &str) -> Option<&LayerSpec> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn source(&self, id: &str) -> Option<&SourceSpec> {
        self.sources
            .iter()
            .find(|(source_id, _)| source_id == id)
            .map(|(_, source)| source)
    }

    /// Layer ids in draw order.
    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.id.as_str()).collect()
    }

    pub fn source_ids(&self) -> Vec<&str> {
        self.sources.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    fn check_removal(&self, operation: &'static str, id: &str) -> Result<(), Error> {
        if self.failing_removals.contains(id) {
            return Err(Error::surface(operation, id, "removal rejected by surface"));
        }
        Ok(())
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        MemorySurface::new(MapOptions {
            style: String::new(),
            center: [0.0, 0.0],
            zoom: 0.0,
        })
    }
}

impl MapSurface for MemorySurface {
    fn get_layer(&self, id: &str) -> Option<LayerHandle> {
        self.layer(id).map(|layer| LayerHandle(layer.id.clone()))
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), Error> {
        self.calls.push(SurfaceCall::RemoveLayer(id.to_string()));
        self.check_removal("remove layer", id)?;
        let position = self
            .layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or_else(|| Error::surface("remove layer", id, "layer does not exist"))?;
        self.layers.remove(position);
        Ok(())
    }

    fn get_source(&self, id: &str) -> Option<SourceHandle> {
        self.source(id).map(|_| SourceHandle(id.to_string()))
    }

    fn remove_source(&mut self, id: &str) -> Result<(), Error> {
        self.calls.push(SurfaceCall::RemoveSource(id.to_string()));
        self.check_removal("remove source", id)?;
        if let Some(layer) = self.layers.iter().find(|layer| layer.source == id) {
            return Err(Error::surface(
                "remove source",
                id,
                format!("source is in use by layer '{}'", layer.id),
            ));
        }
        let position = self
            .sources
            .iter()
            .position(|(source_id, _)| source_id == id)
            .ok_or_else(|| Error::surface("remove source", id, "source does not exist"))?;
        self.sources.remove(position);
        Ok(())
    }

    fn add_source(&mut self, id: &str, source: SourceSpec) -> Result<SourceHandle, Error> {
        self.calls.push(SurfaceCall::AddSource(id.to_string()));
        if self.source(id).is_some() {
            return Err(Error::surface("add source", id, "source already exists"));
        }
        self.sources.push((id.to_string(), source));
        Ok(SourceHandle(id.to_string()))
    }

    fn add_layer(&mut self, layer: LayerSpec) -> Result<LayerHandle, Error> {
        self.calls.push(SurfaceCall::AddLayer(layer.id.clone()));
        if self.layer(&layer.id).is_some() {
            return Err(Error::surface("add layer", &layer.id, "layer already exists"));
        }
        if self.source(&layer.source).is_none() {
            return Err(Error::surface(
                "add layer",
                &layer.id,
                format!("source '{}' does not exist", layer.source),
            ));
        }
        let handle = LayerHandle(layer.id.clone());
        self.layers.push(layer);
        Ok(handle)
    }

    fn add_popup(&mut self, popup: Popup) -> Result<(), Error> {
        self.calls.push(SurfaceCall::AddPopup);
        self.popups.push(popup);
        Ok(())
    }
}
