//! Stop relations and stop-area memberships.
//!
//! A relation tagged `public_transport=platform|stop_position` is itself a
//! stop: it becomes a [`StopEntity`] whose node list is seeded with its node
//! members and later extended with the nodes of its way members. A relation
//! tagged `public_transport=stop_area` names its members.
//!
//! Relations nested inside these relations are not followed.

use hashbrown::HashMap;

use crate::classify::{apply_rules, StopRule};
use crate::identifiers::{ElementKind, ElementRef};
use crate::models::elements::RelationRecord;
use crate::models::entity::StopEntity;
use crate::models::types::{MembershipMatching, UNKNOWN};
use crate::pipeline::closure::ClosureBuilder;
use crate::tags::{tag_is, PUBLIC_TRANSPORT};

pub fn is_stop_area(relation: &RelationRecord) -> bool {
    tag_is(&relation.tags, PUBLIC_TRANSPORT, "stop_area")
}

pub fn is_stop_relation(relation: &RelationRecord) -> bool {
    StopRule::PublicTransportStop.matches(&relation.tags)
}

/// Outcome of resolving one stop relation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StopRelationResolved {
    pub node_members: usize,
    pub way_members: usize,
    pub nested_relations: usize,
}

/// Register a stop relation's members in the closure and build its entity.
pub fn resolve_stop_relation(
    relation: &RelationRecord,
    closure: &mut ClosureBuilder,
) -> (StopEntity, StopRelationResolved) {
    let owner = relation.reference();
    let mut entity = StopEntity::new(owner);
    let mut resolved = StopRelationResolved::default();

    for member in &relation.members {
        match member.kind {
            ElementKind::Node => {
                closure.add_node(member.id);
                entity.node_refs.push(member.id);
                resolved.node_members += 1;
            }
            ElementKind::Way => {
                closure.add_way_owner(member.id, owner);
                entity.way_refs.push(member.id);
                resolved.way_members += 1;
            }
            ElementKind::Relation => {
                log::warn!(
                    "Stop relation {} has nested relation member {}; its members are not followed",
                    relation.id,
                    member.id
                );
                resolved.nested_relations += 1;
            }
        }
    }

    apply_rules(&StopRule::RELATION_ORDER, &relation.tags, &mut entity);
    (entity, resolved)
}

/// Stop-area name per member.
#[derive(Debug, Default)]
pub struct StopAreaIndex {
    names: HashMap<ElementRef, String>,
}

impl StopAreaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every member of a stop area under the area's name; a member
    /// seen in several areas keeps the last one. Returns the number of
    /// nested relation members.
    pub fn record_stop_area(&mut self, relation: &RelationRecord) -> usize {
        let name = relation.name().unwrap_or(UNKNOWN);
        let mut nested = 0;

        for member in &relation.members {
            if member.kind == ElementKind::Relation {
                log::warn!(
                    "Stop area {} has nested relation member {}; its members are not followed",
                    relation.id,
                    member.id
                );
                nested += 1;
            }
            self.names.insert(member.reference(), name.to_string());
        }

        nested
    }

    pub fn get(&self, member: &ElementRef) -> Option<&str> {
        self.names.get(member).map(String::as_str)
    }

    /// Find the stop-area name that applies to `entity`. `ById` prefers the
    /// entity's own kind, then node, way, relation.
    pub fn lookup(&self, entity: ElementRef, matching: MembershipMatching) -> Option<&str> {
        match matching {
            MembershipMatching::ByReference => self.get(&entity),
            MembershipMatching::ById => self.get(&entity).or_else(|| {
                ElementKind::ALL
                    .into_iter()
                    .find_map(|kind| self.get(&entity.with_kind(kind)))
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
