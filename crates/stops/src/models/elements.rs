//! Input records handed to the pipeline by a map-data reader.
//!
//! Readers convert whatever container they decode into these records, keeping
//! only the relevant tags (see [`crate::tags::collect_relevant`]).

use crate::identifiers::{ElementKind, ElementRef};
use crate::tags::{Tags, NAME};

/// Relation member
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub kind: ElementKind,
    pub id: i64,
    pub role: String,
}

impl Member {
    pub fn new(kind: ElementKind, id: i64, role: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            role: role.into(),
        }
    }

    pub fn reference(&self) -> ElementRef {
        ElementRef::new(self.kind, self.id)
    }
}

#[derive(Clone, Debug, Default)]
pub struct RelationRecord {
    pub id: i64,
    pub tags: Tags,
    pub members: Vec<Member>,
}

impl RelationRecord {
    pub fn reference(&self) -> ElementRef {
        ElementRef::relation(self.id)
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.get(NAME).map(String::as_str)
    }
}

/// A way with node references (no coordinates)
#[derive(Clone, Debug, Default)]
pub struct WayRecord {
    pub id: i64,
    pub tags: Tags,
    pub node_refs: Vec<i64>,
}

impl WayRecord {
    pub fn reference(&self) -> ElementRef {
        ElementRef::way(self.id)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeRecord {
    pub id: i64,
    pub tags: Tags,
    pub lat: f64,
    pub lon: f64,
}

impl NodeRecord {
    pub fn reference(&self) -> ElementRef {
        ElementRef::node(self.id)
    }
}
