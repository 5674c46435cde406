//! Centroids and membership enrichment, run once all passes are done.

use geo::Coord;

use crate::identifiers::ElementKind;
use crate::models::entity::StopEntity;
use crate::models::types::{MembershipMatching, UNKNOWN};
use crate::pipeline::nodes::NodeCache;
use crate::pipeline::route_index::RouteIndex;
use crate::pipeline::stop_relations::StopAreaIndex;

/// Arithmetic mean of latitudes and longitudes, taken independently.
///
/// This is not an area centroid; for a platform outline it is the mean of its
/// vertices. Returns `None` for no coordinates.
pub fn mean_position<I>(coords: I) -> Option<Coord<f64>>
where
    I: IntoIterator<Item = Coord<f64>>,
{
    let mut lon_sum = 0.0;
    let mut lat_sum = 0.0;
    let mut count = 0usize;

    for coord in coords {
        lon_sum += coord.x;
        lat_sum += coord.y;
        count += 1;
    }

    if count == 0 {
        return None;
    }

    Some(Coord {
        x: lon_sum / count as f64,
        y: lat_sum / count as f64,
    })
}

/// Position a way or relation from the cached coordinates of its nodes.
/// Nodes keep the position they were built with.
pub fn locate(entity: &mut StopEntity, cache: &NodeCache) {
    if entity.kind() == ElementKind::Node {
        return;
    }

    entity.position = mean_position(
        entity
            .node_refs
            .iter()
            .filter_map(|id| cache.get(*id).copied()),
    );
}

/// Copy stop-area and route membership onto the entity.
///
/// Members of an unnamed stop area take their own name as area name.
pub fn attach_memberships(
    entity: &mut StopEntity,
    routes: &RouteIndex,
    areas: &StopAreaIndex,
    matching: MembershipMatching,
) {
    if let Some(area) = areas.lookup(entity.reference, matching) {
        let name = if area == UNKNOWN {
            entity.name.clone()
        } else {
            area.to_string()
        };
        entity.stop_area_name = Some(name);
    }

    entity.route = routes.lookup(entity.reference, matching).cloned();
}
