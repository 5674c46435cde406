//! # put-stops
//!
//! Public transport stop extraction from OpenStreetMap relations, ways and
//! nodes.
//!
//! ## Features
//!
//! - **Multi-pass resolution**: relations, then ways, then nodes, with the
//!   reference closures frozen between passes
//! - **Route claims**: every stop keeps the highest-ranked route serving it
//! - **Stop areas**: members inherit the name of their `stop_area`
//! - **Flat output**: one CSV row per stop, optional GeoJSON points and
//!   aggregated stop clusters
//!
//! ## Example
//!
//! ```
//! use put_stops::prelude::*;
//!
//! let tags = |pairs: &[(&str, &str)]| collect_relevant(pairs.iter().copied());
//!
//! let route = RelationRecord {
//!     id: 1,
//!     tags: tags(&[("route", "train"), ("service", "regional")]),
//!     members: vec![Member::new(ElementKind::Way, 10, "platform")],
//! };
//! let platform = WayRecord {
//!     id: 10,
//!     tags: tags(&[("public_transport", "platform"), ("train", "yes")]),
//!     node_refs: vec![100, 101],
//! };
//! let nodes = vec![
//!     NodeRecord { id: 100, tags: Tags::new(), lat: 48.0, lon: 9.0 },
//!     NodeRecord { id: 101, tags: Tags::new(), lat: 48.2, lon: 9.2 },
//! ];
//!
//! let table = extract(ExtractOptions::default(), vec![route], vec![platform], nodes);
//! let stop = table.get(&ElementRef::way(10)).unwrap();
//! assert_eq!(stop.classification.general, GeneralType::Rail);
//! assert_eq!(stop.route.as_ref().unwrap().priority, 3);
//! assert!((stop.lat().unwrap() - 48.1).abs() < 1e-9);
//! ```

pub mod aggregate;
pub mod classify;
pub mod identifiers;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod stats;
pub mod table;
pub mod tags;

// Re-exports for convenience
pub mod prelude {
    pub use crate::aggregate::{cluster_stops, ClusterRecord, StopCluster};
    pub use crate::identifiers::*;
    pub use crate::models::*;
    pub use crate::output::{
        stops_to_geojson, write_clusters_csv, write_stops_csv, write_stops_geojson,
    };
    pub use crate::pipeline::{extract, ExtractOptions, NodePass, RelationPass, WayPass};
    pub use crate::stats::ExtractStats;
    pub use crate::table::{StopRecord, StopTable};
    pub use crate::tags::{collect_relevant, Tags};
}

pub use prelude::*;
