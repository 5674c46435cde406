//! Stop clusters: stops grouped by stop area (or own name) and general type,
//! with the weight and catchment radius derived from their best service.

use std::collections::BTreeMap;

use geo::Coord;
use serde::Serialize;

use crate::models::entity::StopEntity;
use crate::models::types::GeneralType;
use crate::pipeline::enrich::mean_position;
use crate::table::StopTable;

/// Catchment radius in metres per weight, highest weight first.
const CATCHMENT_RADII: [(u8, u32); 5] = [(5, 1000), (4, 500), (3, 250), (2, 175), (1, 100)];

/// Name of a train service priority, or `""` for everything below commuter.
pub fn service_label(priority: Option<u8>) -> &'static str {
    match priority {
        Some(1) => "high_speed",
        Some(2) => "long_distance",
        Some(3) => "regional",
        Some(4) => "commuter",
        _ => "",
    }
}

pub fn weight(general: GeneralType, label: &str) -> u8 {
    match (general, label) {
        (GeneralType::Rail, "high_speed" | "long_distance") => 5,
        (GeneralType::Rail, "regional") => 4,
        (GeneralType::Rail, "commuter" | "") => 3,
        (GeneralType::Bus, _) => 1,
        _ => 0,
    }
}

pub fn catchment_radius(weight: u8) -> u32 {
    CATCHMENT_RADII
        .iter()
        .find(|(w, _)| *w == weight)
        .map_or(0, |(_, radius)| *radius)
}

/// Stops sharing a stop area (or name) and a general type.
#[derive(Clone, Debug, PartialEq)]
pub struct StopCluster {
    pub key: String,
    pub general_type: GeneralType,
    /// Unique values in first-seen order
    pub names: Vec<String>,
    pub specific_types: Vec<String>,
    pub route_types: Vec<String>,
    pub service_priority: Option<u8>,
    pub stop_area_name: Option<String>,
    pub feature_count: usize,
    pub position: Coord<f64>,
}

impl StopCluster {
    pub fn service_label(&self) -> &'static str {
        service_label(self.service_priority)
    }

    pub fn weight(&self) -> u8 {
        weight(self.general_type, self.service_label())
    }

    pub fn catchment_radius(&self) -> u32 {
        catchment_radius(self.weight())
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

#[derive(Default)]
struct Accumulator<'a> {
    members: Vec<&'a StopEntity>,
}

impl Accumulator<'_> {
    fn build(self, key: String, general_type: GeneralType) -> Option<StopCluster> {
        let position = mean_position(self.members.iter().filter_map(|e| e.position))?;

        let mut cluster = StopCluster {
            key,
            general_type,
            names: Vec::new(),
            specific_types: Vec::new(),
            route_types: Vec::new(),
            service_priority: None,
            stop_area_name: None,
            feature_count: self.members.len(),
            position,
        };

        for entity in &self.members {
            push_unique(&mut cluster.names, &entity.name);
            if let Some(specific) = entity.classification.specific() {
                push_unique(&mut cluster.specific_types, specific);
            }
            if let Some(route) = &entity.route {
                push_unique(&mut cluster.route_types, &route.route_type);
                cluster.service_priority = Some(
                    cluster
                        .service_priority
                        .map_or(route.priority, |p| p.min(route.priority)),
                );
            }
            if cluster.stop_area_name.is_none() {
                cluster.stop_area_name = entity.stop_area_name.clone();
            }
        }

        Some(cluster)
    }
}

/// Group the located stops of `table`. Clusters are ordered by key, then
/// general type; members keep table order.
pub fn cluster_stops(table: &StopTable) -> Vec<StopCluster> {
    let mut groups: BTreeMap<(String, GeneralType), Accumulator> = BTreeMap::new();

    for entity in table.iter().filter(|e| e.is_located()) {
        let key = entity
            .stop_area_name
            .clone()
            .unwrap_or_else(|| entity.name.clone());
        groups
            .entry((key, entity.classification.general))
            .or_default()
            .members
            .push(entity);
    }

    let clusters: Vec<StopCluster> = groups
        .into_iter()
        .filter_map(|((key, general), acc)| acc.build(key, general))
        .collect();

    log::debug!(
        "Aggregated {} located stops into {} clusters",
        clusters.iter().map(|c| c.feature_count).sum::<usize>(),
        clusters.len()
    );
    clusters
}

/// One flattened cluster row. List columns are `;`-joined.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterRecord {
    pub key: String,
    pub general_type: GeneralType,
    pub names: String,
    pub specific_types: String,
    pub route_types: String,
    pub service_priority: Option<u8>,
    pub service_type: &'static str,
    pub stop_area_name: Option<String>,
    pub feature_count: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub weight: u8,
    pub catchment_radius_m: u32,
}

impl From<&StopCluster> for ClusterRecord {
    fn from(cluster: &StopCluster) -> Self {
        Self {
            key: cluster.key.clone(),
            general_type: cluster.general_type,
            names: cluster.names.join(";"),
            specific_types: cluster.specific_types.join(";"),
            route_types: cluster.route_types.join(";"),
            service_priority: cluster.service_priority,
            service_type: cluster.service_label(),
            stop_area_name: cluster.stop_area_name.clone(),
            feature_count: cluster.feature_count,
            latitude: cluster.position.y,
            longitude: cluster.position.x,
            weight: cluster.weight(),
            catchment_radius_m: cluster.catchment_radius(),
        }
    }
}
