//! Node resolution and the coordinate cache.

use geo::Coord;
use hashbrown::HashMap;

use crate::classify::{any_rule_matches, apply_rules, StopRule};
use crate::identifiers::ElementRef;
use crate::models::elements::NodeRecord;
use crate::models::entity::StopEntity;
use crate::pipeline::closure::NodeClosure;
use crate::tags::{is_stop_candidate, Tags};

/// Node ID to coordinate mapping (`x = lon`, `y = lat`)
#[derive(Debug, Default)]
pub struct NodeCache {
    nodes: HashMap<i64, Coord<f64>>,
}

impl NodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, id: i64, coord: Coord<f64>) {
        self.nodes.insert(id, coord);
    }

    pub fn get(&self, id: i64) -> Option<&Coord<f64>> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub fn is_node_of_interest(id: i64, tags: &Tags, closure: &NodeClosure) -> bool {
    is_stop_candidate(tags) || closure.contains(id)
}

/// Resolve a node: cache its coordinate and, when its own tags qualify,
/// build its entity.
///
/// Returns `None` when the node is not of interest, otherwise whether it
/// became a stop.
pub fn resolve_node(
    node: &NodeRecord,
    closure: &NodeClosure,
    cache: &mut NodeCache,
    entities: &mut HashMap<ElementRef, StopEntity>,
) -> Option<bool> {
    if !is_node_of_interest(node.id, &node.tags, closure) {
        return None;
    }

    let coord = Coord {
        x: node.lon,
        y: node.lat,
    };
    cache.insert(node.id, coord);

    if !any_rule_matches(&StopRule::ORDER, &node.tags) {
        return Some(false);
    }

    let mut entity = StopEntity::new(node.reference());
    entity.position = Some(coord);
    apply_rules(&StopRule::ORDER, &node.tags, &mut entity);
    entities.insert(entity.reference, entity);
    Some(true)
}
