use std::collections::HashSet;

use geojson::Feature;
use serde::{Deserialize, Serialize};

use crate::domain::{LayerKind, ThematicKey};

/// A single `{key, property, value}` filter rule.
///
/// A feature matches when `properties[property]` is the string `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRule {
    pub key: String,
    pub property: ThematicKey,
    pub value: String,
}

impl FilterRule {
    pub fn new(key: &str, property: ThematicKey, value: &str) -> Self {
        FilterRule {
            key: key.to_string(),
            property,
            value: value.to_string(),
        }
    }

    pub fn matches(&self, feature: &Feature) -> bool {
        self.property.value_of(feature) == Some(self.value.as_str())
    }

    pub fn layer_kind(&self) -> Option<LayerKind> {
        LayerKind::for_filter_key(&self.key)
    }
}

/// Ordered, read-only list of filter rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterCatalog {
    rules: Vec<FilterRule>,
}

impl FilterCatalog {
    pub fn new(rules: Vec<FilterRule>) -> Self {
        FilterCatalog { rules }
    }

    pub fn rules(&self) -> &[FilterRule] {
        &self.rules
    }

    pub fn get(&self, key: &str) -> Option<&FilterRule> {
        self.rules.iter().find(|rule| rule.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.key.as_str())
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        FilterCatalog::new(vec![
            FilterRule::new("deciduous", ThematicKey::LeafCycle, "deciduous"),
            FilterRule::new("broadleaved", ThematicKey::LeafType, "broadleaved"),
            FilterRule::new("needleleaved", ThematicKey::LeafType, "needleleaved"),
            FilterRule::new("playgrounds", ThematicKey::Leisure, "playground"),
            FilterRule::new("pitches", ThematicKey::Leisure, "pitch"),
            FilterRule::new("forests", ThematicKey::Landuse, "forest"),
            FilterRule::new("woods", ThematicKey::Natural, "wood"),
            FilterRule::new("parks", ThematicKey::Leisure, "park"),
            FilterRule::new("gardens", ThematicKey::Leisure, "garden"),
        ])
    }
}

/// The set of filter keys the user currently has switched on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    active: HashSet<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every rule of the catalog switched on.
    pub fn all(catalog: &FilterCatalog) -> Self {
        FilterState {
            active: catalog.keys().map(str::to_string).collect(),
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.contains(key)
    }

    pub fn activate(&mut self, key: &str) {
        self.active.insert(key.to_string());
    }

    pub fn deactivate(&mut self, key: &str) {
        self.active.remove(key);
    }

    /// Flips a key and returns whether it is now active.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.active.remove(key) {
            false
        } else {
            self.active.insert(key.to_string());
            true
        }
    }

    /// Active rules of `catalog`, in catalog order.
    pub fn active_rules<'a>(
        &'a self,
        catalog: &'a FilterCatalog,
    ) -> impl Iterator<Item = &'a FilterRule> {
        catalog
            .rules()
            .iter()
            .filter(move |rule| self.is_active(&rule.key))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
