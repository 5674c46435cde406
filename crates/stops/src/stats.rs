/// Statistics about one extraction run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub relations_seen: u64,
    pub route_relations: u64,
    pub route_claims: u64,
    pub unrecognized_services: u64,
    pub stop_relations: u64,
    pub stop_area_relations: u64,
    pub nested_relations_skipped: u64,

    pub ways_seen: u64,
    pub ways_of_interest: u64,
    pub way_stops: u64,
    pub way_propagations: u64,

    pub nodes_seen: u64,
    pub coordinates_cached: u64,
    pub node_stops: u64,

    pub node_entities: usize,
    pub way_entities: usize,
    pub relation_entities: usize,
    pub unlocatable_entities: usize,
    pub in_route: usize,
    pub in_stop_area: usize,
}

impl ExtractStats {
    pub fn total_entities(&self) -> usize {
        self.node_entities + self.way_entities + self.relation_entities
    }

    pub fn log_summary(&self) {
        log::info!("=== Extraction Statistics ===");
        log::info!(
            "Relations: {} seen, {} routes ({} claims), {} stop relations, {} stop areas",
            self.relations_seen,
            self.route_relations,
            self.route_claims,
            self.stop_relations,
            self.stop_area_relations
        );
        log::info!(
            "Ways: {} seen, {} of interest, {} stops, {} propagated to relations",
            self.ways_seen,
            self.ways_of_interest,
            self.way_stops,
            self.way_propagations
        );
        log::info!(
            "Nodes: {} seen, {} coordinates cached, {} stops",
            self.nodes_seen,
            self.coordinates_cached,
            self.node_stops
        );
        log::info!(
            "Stops (result): {} ({} nodes, {} ways, {} relations)",
            self.total_entities(),
            self.node_entities,
            self.way_entities,
            self.relation_entities
        );
        log::info!(
            "In a route: {}, in a stop area: {}",
            self.in_route,
            self.in_stop_area
        );
        if self.unrecognized_services > 0 {
            log::warn!(
                "Routes with unrecognized train service: {}",
                self.unrecognized_services
            );
        }
        if self.nested_relations_skipped > 0 {
            log::warn!(
                "Nested relation members skipped: {}",
                self.nested_relations_skipped
            );
        }
        if self.unlocatable_entities > 0 {
            log::warn!(
                "Stops without resolvable coordinates: {}",
                self.unlocatable_entities
            );
        }
    }
}
