use geojson::Feature;
use log::{debug, info, warn};

use crate::config::MapConfig;
use crate::dataset::Dataset;
use crate::filters::{FilterCatalog, FilterState};
use crate::map::install::install_partition;
use crate::map::popup::show_popup;
use crate::map::reconcile::reconcile_all;
use crate::map::surface::MapSurface;
use crate::processing::partition::{heatzones, partition};
use crate::processing::statistics::Statistics;
use crate::utils::error::Error;

/// Drives a map surface from a loaded dataset and the user's filter choices.
///
/// Every refresh clears all known layers and sources before installing the
/// current partitions. Methods take `&mut self`, so a refresh always runs to
/// completion before the next one starts.
pub struct GreenspaceMap<S: MapSurface> {
    surface: S,
    dataset: Dataset,
    catalog: FilterCatalog,
    state: FilterState,
    config: MapConfig,
}

impl<S: MapSurface> GreenspaceMap<S> {
    /// Creates the controller with every filter of the catalog switched on.
    /// Nothing is installed until [`GreenspaceMap::refresh`] runs.
    pub fn new(surface: S, dataset: Dataset, config: MapConfig) -> Self {
        let catalog = config.catalog();
        let state = FilterState::all(&catalog);
        GreenspaceMap {
            surface,
            dataset,
            catalog,
            state,
            config,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Swaps in a freshly loaded dataset and redraws.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> Result<usize, Error> {
        self.dataset = dataset;
        self.refresh()
    }

    /// Clears the surface and installs one source per active layer.
    ///
    /// # Returns
    /// The number of partitions installed.
    pub fn refresh(&mut self) -> Result<usize, Error> {
        reconcile_all(&mut self.surface)?;

        let collection = self.dataset.collection();
        let mut partitions = partition(collection, &self.catalog, &self.state);
        if self.config.heatzones {
            partitions.extend(heatzones(collection, &self.catalog, &self.state));
        }

        for layer_partition in &partitions {
            install_partition(&mut self.surface, layer_partition, &self.config.clustering)?;
        }

        info!(
            "Installed {} layers for {} active filters",
            partitions.len(),
            self.state.len()
        );
        Ok(partitions.len())
    }

    /// Switches a filter on or off and redraws.
    ///
    /// # Returns
    /// Whether the filter is active afterwards. Keys missing from the
    /// catalog are ignored.
    pub fn toggle_filter(&mut self, key: &str) -> Result<bool, Error> {
        if self.catalog.get(key).is_none() {
            warn!("Unknown filter '{}'", key);
            return Ok(false);
        }
        let active = self.state.toggle(key);
        debug!("Filter '{}' is now {}", key, if active { "on" } else { "off" });
        self.refresh()?;
        Ok(active)
    }

    pub fn set_filter(&mut self, key: &str, active: bool) -> Result<(), Error> {
        if self.state.is_active(key) != active {
            self.toggle_filter(key)?;
        }
        Ok(())
    }

    /// Shows a popup for the clicked features, if one can be placed.
    pub fn click(&mut self, features: &[Feature]) -> Result<bool, Error> {
        show_popup(&mut self.surface, features)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::compute(self.dataset.collection())
    }
}
