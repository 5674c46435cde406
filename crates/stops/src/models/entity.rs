//! The resolved stop entity.

use geo::Coord;

use crate::identifiers::{ElementKind, ElementRef};
use crate::models::types::{Classification, RouteClaim, UNKNOWN};

/// One resolved transport element (platform, stop position or station).
///
/// Positions use `x = lon`, `y = lat`.
#[derive(Clone, Debug, PartialEq)]
pub struct StopEntity {
    pub reference: ElementRef,
    pub name: String,
    pub classification: Classification,
    pub public_transport_tag: Option<String>,
    pub railway_tag: Option<String>,
    /// Node ids whose coordinates locate this entity (ways and relations)
    pub node_refs: Vec<i64>,
    /// Way members (relations only)
    pub way_refs: Vec<i64>,
    pub position: Option<Coord<f64>>,
    /// Winning route claim, set during enrichment
    pub route: Option<RouteClaim>,
    /// Stop-area name, set during enrichment
    pub stop_area_name: Option<String>,
}

impl StopEntity {
    pub fn new(reference: ElementRef) -> Self {
        Self {
            reference,
            name: UNKNOWN.to_string(),
            classification: Classification::unknown(),
            public_transport_tag: None,
            railway_tag: None,
            node_refs: Vec::new(),
            way_refs: Vec::new(),
            position: None,
            route: None,
            stop_area_name: None,
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.reference.kind
    }

    pub fn lat(&self) -> Option<f64> {
        self.position.map(|c| c.y)
    }

    pub fn lon(&self) -> Option<f64> {
        self.position.map(|c| c.x)
    }

    pub fn is_located(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_in_route(&self) -> bool {
        self.route.is_some()
    }

    pub fn is_in_stop_area(&self) -> bool {
        self.stop_area_name.is_some()
    }
}
