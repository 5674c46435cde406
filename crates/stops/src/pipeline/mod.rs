//! The multi-pass extraction driver.
//!
//! Passes are types: [`RelationPass`] -> [`WayPass`] -> [`NodePass`] ->
//! [`StopTable`]. Each `finish()` consumes its pass and hands the accumulated
//! state to the next one, so elements can only be fed in relation, way, node
//! order and the reference closures are frozen at the right time.

pub mod closure;
pub mod enrich;
pub mod nodes;
pub mod route_index;
pub mod stop_relations;
pub mod ways;

use hashbrown::HashMap;

use crate::identifiers::ElementRef;
use crate::models::elements::{NodeRecord, RelationRecord, WayRecord};
use crate::models::entity::StopEntity;
use crate::models::types::MembershipMatching;
use crate::stats::ExtractStats;
use crate::table::StopTable;
use crate::tags::Tags;

use closure::{ClosureBuilder, NodeClosure, NodeClosureBuilder, WayOwners};
use nodes::NodeCache;
use route_index::RouteIndex;
use stop_relations::StopAreaIndex;

/// Run options
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtractOptions {
    pub matching: MembershipMatching,
}

type Entities = HashMap<ElementRef, StopEntity>;

/// Run all passes over in-memory element sequences.
pub fn extract<R, W, N>(options: ExtractOptions, relations: R, ways: W, nodes: N) -> StopTable
where
    R: IntoIterator<Item = RelationRecord>,
    W: IntoIterator<Item = WayRecord>,
    N: IntoIterator<Item = NodeRecord>,
{
    let mut pass = RelationPass::new(options);
    for relation in relations {
        pass.process(&relation);
    }

    let mut pass = pass.finish();
    for way in ways {
        pass.process(&way);
    }

    let mut pass = pass.finish();
    for node in nodes {
        pass.process(&node);
    }

    pass.finish()
}

// ============================================================================
// Relation pass
// ============================================================================

/// First pass: route claims, stop relations and stop areas.
pub struct RelationPass {
    options: ExtractOptions,
    routes: RouteIndex,
    areas: StopAreaIndex,
    closure: ClosureBuilder,
    entities: Entities,
    stats: ExtractStats,
}

impl RelationPass {
    pub fn new(options: ExtractOptions) -> Self {
        Self {
            options,
            routes: RouteIndex::new(),
            areas: StopAreaIndex::new(),
            closure: ClosureBuilder::new(),
            entities: Entities::new(),
            stats: ExtractStats::default(),
        }
    }

    pub fn process(&mut self, relation: &RelationRecord) {
        self.stats.relations_seen += 1;

        if let Some(indexed) = self.routes.record_route(relation) {
            self.stats.route_relations += 1;
            self.stats.route_claims += indexed.claimed_members as u64;
            if indexed.unrecognized_service {
                self.stats.unrecognized_services += 1;
            }
        }

        if stop_relations::is_stop_relation(relation) {
            let (entity, resolved) =
                stop_relations::resolve_stop_relation(relation, &mut self.closure);
            self.entities.insert(entity.reference, entity);
            self.stats.stop_relations += 1;
            self.stats.nested_relations_skipped += resolved.nested_relations as u64;
        }

        if stop_relations::is_stop_area(relation) {
            let nested = self.areas.record_stop_area(relation);
            self.stats.stop_area_relations += 1;
            self.stats.nested_relations_skipped += nested as u64;
        }
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    pub fn finish(self) -> WayPass {
        let (owners, nodes) = self.closure.finish();
        log::info!(
            "Relation pass: {} routes, {} stop relations, {} stop areas",
            self.stats.route_relations,
            self.stats.stop_relations,
            self.stats.stop_area_relations
        );
        log::info!(
            "  {} route claims, {} ways and {} nodes referenced by stop relations",
            self.routes.len(),
            owners.len(),
            nodes.len()
        );

        WayPass {
            options: self.options,
            routes: self.routes,
            areas: self.areas,
            owners,
            nodes,
            entities: self.entities,
            stats: self.stats,
        }
    }
}

// ============================================================================
// Way pass
// ============================================================================

/// Second pass: stop ways and node lists of stop relations.
pub struct WayPass {
    options: ExtractOptions,
    routes: RouteIndex,
    areas: StopAreaIndex,
    owners: WayOwners,
    nodes: NodeClosureBuilder,
    entities: Entities,
    stats: ExtractStats,
}

impl WayPass {
    /// Cheap pre-check for readers; `process` repeats it.
    pub fn wants(&self, id: i64, tags: &Tags) -> bool {
        ways::is_way_of_interest(id, tags, &self.owners)
    }

    /// Count a way the reader filtered out with `wants`.
    pub fn skip(&mut self) {
        self.stats.ways_seen += 1;
    }

    pub fn process(&mut self, way: &WayRecord) {
        self.stats.ways_seen += 1;

        let resolved = ways::resolve_way(way, &self.owners, &mut self.nodes, &mut self.entities);
        if let Some(resolved) = resolved {
            self.stats.ways_of_interest += 1;
            if resolved.is_stop {
                self.stats.way_stops += 1;
            }
            self.stats.way_propagations += resolved.propagated_to as u64;
        }
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    pub fn finish(self) -> NodePass {
        let closure = self.nodes.finish();
        log::info!(
            "Way pass: {} ways of interest, {} stop ways, {} nodes referenced",
            self.stats.ways_of_interest,
            self.stats.way_stops,
            closure.len()
        );

        NodePass {
            options: self.options,
            routes: self.routes,
            areas: self.areas,
            cache: NodeCache::with_capacity(closure.len()),
            closure,
            entities: self.entities,
            stats: self.stats,
        }
    }
}

// ============================================================================
// Node pass
// ============================================================================

/// Third pass: coordinates and stop nodes.
pub struct NodePass {
    options: ExtractOptions,
    routes: RouteIndex,
    areas: StopAreaIndex,
    closure: NodeClosure,
    cache: NodeCache,
    entities: Entities,
    stats: ExtractStats,
}

impl NodePass {
    /// Cheap pre-check for readers; `process` repeats it.
    pub fn wants(&self, id: i64, tags: &Tags) -> bool {
        nodes::is_node_of_interest(id, tags, &self.closure)
    }

    /// Whether some way or relation needs this node's coordinate.
    pub fn is_referenced(&self, id: i64) -> bool {
        self.closure.contains(id)
    }

    /// Count a node the reader filtered out with `wants`.
    pub fn skip(&mut self) {
        self.stats.nodes_seen += 1;
    }

    pub fn process(&mut self, node: &NodeRecord) {
        self.stats.nodes_seen += 1;

        let resolved = nodes::resolve_node(node, &self.closure, &mut self.cache, &mut self.entities);
        if let Some(is_stop) = resolved {
            self.stats.coordinates_cached += 1;
            if is_stop {
                self.stats.node_stops += 1;
            }
        }
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    /// Locate ways and relations, attach memberships and freeze the table.
    pub fn finish(mut self) -> StopTable {
        log::info!(
            "Node pass: {} coordinates cached, {} stop nodes",
            self.cache.len(),
            self.stats.node_stops
        );

        for entity in self.entities.values_mut() {
            enrich::locate(entity, &self.cache);
            enrich::attach_memberships(entity, &self.routes, &self.areas, self.options.matching);
        }

        StopTable::from_entities(self.entities, self.stats)
    }
}

#[cfg(test)]
mod tests;
