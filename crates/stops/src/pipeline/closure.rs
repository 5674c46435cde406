//! Reference closures, built in stages.
//!
//! The map graph only has forward references (relation -> way -> node), so
//! the ids a later pass must keep are only known once the earlier passes are
//! done. Each stage type exposes exactly the mutations allowed at that point:
//!
//! - relation pass: [`ClosureBuilder`], way owners and node ids both writable
//! - way pass: [`WayOwners`] read-only, [`NodeClosureBuilder`] add-only
//! - node pass: [`NodeClosure`] read-only

use hashbrown::{HashMap, HashSet};

use crate::identifiers::ElementRef;

/// Closure state written during the relation pass.
#[derive(Debug, Default)]
pub struct ClosureBuilder {
    node_ids: HashSet<i64>,
    way_owners: HashMap<i64, Vec<ElementRef>>,
}

impl ClosureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A node whose coordinate some stop relation needs.
    pub fn add_node(&mut self, id: i64) {
        self.node_ids.insert(id);
    }

    /// Record that `owner` has way `way_id` as a member. A way may have
    /// several owners; the same owner may be recorded more than once.
    pub fn add_way_owner(&mut self, way_id: i64, owner: ElementRef) {
        self.way_owners.entry(way_id).or_default().push(owner);
    }

    /// Freeze the way owners and hand the node ids on to the way pass.
    pub fn finish(self) -> (WayOwners, NodeClosureBuilder) {
        (
            WayOwners {
                owners: self.way_owners,
            },
            NodeClosureBuilder {
                node_ids: self.node_ids,
            },
        )
    }
}

/// Way id -> owning stop relations. Read-only after the relation pass.
#[derive(Debug, Default)]
pub struct WayOwners {
    owners: HashMap<i64, Vec<ElementRef>>,
}

impl WayOwners {
    pub fn contains(&self, way_id: i64) -> bool {
        self.owners.contains_key(&way_id)
    }

    pub fn owners(&self, way_id: i64) -> &[ElementRef] {
        self.owners.get(&way_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Node ids collected so far; the way pass may only add to it.
#[derive(Debug, Default)]
pub struct NodeClosureBuilder {
    node_ids: HashSet<i64>,
}

impl NodeClosureBuilder {
    pub fn extend(&mut self, ids: &[i64]) {
        self.node_ids.extend(ids.iter().copied());
    }

    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    pub fn finish(self) -> NodeClosure {
        NodeClosure {
            node_ids: self.node_ids,
        }
    }
}

/// Every node id needed for coordinate lookup. Read-only.
#[derive(Debug, Default)]
pub struct NodeClosure {
    node_ids: HashSet<i64>,
}

impl NodeClosure {
    pub fn contains(&self, id: i64) -> bool {
        self.node_ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }
}
