use geojson::{Feature, FeatureCollection};
use log::warn;

use crate::domain::LayerKind;
use crate::filters::{FilterCatalog, FilterRule, FilterState};

/// The features one thematic layer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPartition {
    pub kind: LayerKind,
    pub features: FeatureCollection,
}

impl LayerPartition {
    pub fn len(&self) -> usize {
        self.features.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.features.is_empty()
    }
}

/// Splits a collection into one partition per layer with an active rule.
///
/// Partitions come out in the catalog order of their first active rule. A
/// feature lands in a partition when any active rule of that layer matches it,
/// so it appears at most once per partition, and collection order is kept.
///
/// # Arguments
/// * `collection` - The simplified dataset.
/// * `catalog` - Filter rules to evaluate.
/// * `state` - Which rule keys are switched on.
pub fn partition(
    collection: &FeatureCollection,
    catalog: &FilterCatalog,
    state: &FilterState,
) -> Vec<LayerPartition> {
    let mut groups: Vec<(LayerKind, Vec<&FilterRule>)> = Vec::new();

    for rule in state.active_rules(catalog) {
        let Some(kind) = rule.layer_kind() else {
            warn!("Filter '{}' does not feed any layer, ignoring", rule.key);
            continue;
        };
        match groups.iter_mut().find(|(existing, _)| *existing == kind) {
            Some((_, rules)) => rules.push(rule),
            None => groups.push((kind, vec![rule])),
        }
    }

    groups
        .into_iter()
        .map(|(kind, rules)| LayerPartition {
            kind,
            features: select(collection, |feature| {
                rules.iter().any(|rule| rule.matches(feature))
            }),
        })
        .collect()
}

/// Every feature matched by any active rule, for the heatzones layer.
/// `None` when no rule is active.
pub fn heatzones(
    collection: &FeatureCollection,
    catalog: &FilterCatalog,
    state: &FilterState,
) -> Option<LayerPartition> {
    let rules: Vec<&FilterRule> = state
        .active_rules(catalog)
        .filter(|rule| rule.layer_kind().is_some())
        .collect();
    if rules.is_empty() {
        return None;
    }

    Some(LayerPartition {
        kind: LayerKind::Heatzones,
        features: select(collection, |feature| {
            rules.iter().any(|rule| rule.matches(feature))
        }),
    })
}

fn select<F>(collection: &FeatureCollection, predicate: F) -> FeatureCollection
where
    F: Fn(&Feature) -> bool,
{
    FeatureCollection {
        bbox: None,
        features: collection
            .features
            .iter()
            .filter(|feature| predicate(*feature))
            .cloned()
            .collect(),
        foreign_members: None,
    }
}
