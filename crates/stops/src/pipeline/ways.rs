//! Way resolution.

use hashbrown::HashMap;

use crate::classify::{any_rule_matches, apply_rules, StopRule};
use crate::identifiers::ElementRef;
use crate::models::elements::WayRecord;
use crate::models::entity::StopEntity;
use crate::pipeline::closure::{NodeClosureBuilder, WayOwners};
use crate::tags::{is_stop_candidate, Tags};

/// A way is kept when it is tagged as a stop/station or a stop relation
/// owns it.
pub fn is_way_of_interest(id: i64, tags: &Tags, owners: &WayOwners) -> bool {
    is_stop_candidate(tags) || owners.contains(id)
}

/// Outcome of resolving one way of interest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WayResolved {
    pub is_stop: bool,
    /// Owning relations whose node list was extended
    pub propagated_to: usize,
}

/// Resolve a way: collect its nodes, classify it, and append its node list
/// to every owning stop relation.
///
/// Returns `None` when the way is not of interest.
pub fn resolve_way(
    way: &WayRecord,
    owners: &WayOwners,
    nodes: &mut NodeClosureBuilder,
    entities: &mut HashMap<ElementRef, StopEntity>,
) -> Option<WayResolved> {
    if !is_way_of_interest(way.id, &way.tags, owners) {
        return None;
    }

    nodes.extend(&way.node_refs);
    let mut resolved = WayResolved::default();

    if any_rule_matches(&StopRule::ORDER, &way.tags) {
        let mut entity = StopEntity::new(way.reference());
        entity.node_refs = way.node_refs.clone();
        apply_rules(&StopRule::ORDER, &way.tags, &mut entity);
        entities.insert(entity.reference, entity);
        resolved.is_stop = true;
    }

    for owner in owners.owners(way.id) {
        if let Some(relation) = entities.get_mut(owner) {
            relation.node_refs.extend_from_slice(&way.node_refs);
            resolved.propagated_to += 1;
        }
    }

    Some(resolved)
}
