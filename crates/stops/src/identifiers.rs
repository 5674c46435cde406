//! Kind-scoped identifiers for map elements.
//!
//! Node, way and relation ids live in separate namespaces: node 42 and way 42
//! are unrelated elements. Every index in this crate is therefore keyed by
//! [`ElementRef`], never by a bare id.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use crate::models::types::StopsError;

/// The three element kinds of the map graph.
///
/// Ordering is node < way < relation, which is also the row order of the
/// output table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub const ALL: [ElementKind; 3] = [ElementKind::Node, ElementKind::Way, ElementKind::Relation];
}

/// A (kind, id) pair identifying one element of the map graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: i64,
}

impl ElementRef {
    pub fn new(kind: ElementKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn node(id: i64) -> Self {
        Self::new(ElementKind::Node, id)
    }

    pub fn way(id: i64) -> Self {
        Self::new(ElementKind::Way, id)
    }

    pub fn relation(id: i64) -> Self {
        Self::new(ElementKind::Relation, id)
    }

    /// The same numeric id under another kind.
    pub fn with_kind(self, kind: ElementKind) -> Self {
        Self::new(kind, self.id)
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

impl FromStr for ElementRef {
    type Err = StopsError;

    /// Parses the `kind/id` form produced by `Display`, e.g. `way/123`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once('/')
            .ok_or_else(|| StopsError::InvalidReference(s.to_string()))?;
        let kind = ElementKind::from_str(kind)
            .map_err(|_| StopsError::UnknownElementKind(kind.to_string()))?;
        let id = id
            .parse::<i64>()
            .map_err(|_| StopsError::InvalidReference(s.to_string()))?;
        Ok(Self::new(kind, id))
    }
}
