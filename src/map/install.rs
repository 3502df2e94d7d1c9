use log::debug;

use crate::config::ClusterOptions;
use crate::domain::{LayerKind, MapLayer};
use crate::map::surface::{ClusterFilter, LayerSpec, LayerType, MapSurface, SourceSpec};
use crate::processing::partition::LayerPartition;
use crate::utils::error::Error;

/// Installs the source and layer(s) of one partition.
///
/// Trees get a clustered source drawn by the `clusters`, `cluster-count` and
/// `unclustered-point` layers when clustering is enabled. Every other kind is
/// one source and one layer. The ids must have been cleared beforehand.
pub fn install_partition<S: MapSurface + ?Sized>(
    surface: &mut S,
    partition: &LayerPartition,
    clustering: &ClusterOptions,
) -> Result<(), Error> {
    let kind = partition.kind;
    let source_id = kind.source().as_str();
    let clustered = kind == LayerKind::Trees && clustering.enabled;

    let source = if clustered {
        SourceSpec::clustered(partition.features.clone(), *clustering)
    } else {
        SourceSpec::geojson(partition.features.clone())
    };
    surface.add_source(source_id, source)?;

    for layer in layer_specs(kind, clustered) {
        surface.add_layer(layer)?;
    }

    debug!(
        "Installed {} features into {}",
        partition.len(),
        source_id
    );
    Ok(())
}

fn layer_specs(kind: LayerKind, clustered: bool) -> Vec<LayerSpec> {
    let source_id = kind.source().as_str();
    let color = kind.color();

    if clustered {
        return vec![
            LayerSpec::new(MapLayer::Clusters.as_str(), source_id, LayerType::Circle, color)
                .with_filter(ClusterFilter::Clustered),
            LayerSpec::new(
                MapLayer::ClusterCount.as_str(),
                source_id,
                LayerType::Symbol,
                color,
            )
            .with_filter(ClusterFilter::Clustered),
            LayerSpec::new(
                MapLayer::UnclusteredPoint.as_str(),
                source_id,
                LayerType::Circle,
                color,
            )
            .with_filter(ClusterFilter::Unclustered),
        ];
    }

    let layer_type = match kind {
        LayerKind::Trees => LayerType::Circle,
        LayerKind::Heatzones => LayerType::Heatmap,
        LayerKind::Parks
        | LayerKind::Gardens
        | LayerKind::Playgrounds
        | LayerKind::Pitches
        | LayerKind::Forests
        | LayerKind::Woods => LayerType::Fill,
    };
    vec![LayerSpec::new(kind.layer().as_str(), source_id, layer_type, color)]
}
