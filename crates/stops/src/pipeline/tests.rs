use approx::assert_relative_eq;

use super::*;
use crate::identifiers::ElementKind;
use crate::models::elements::Member;
use crate::models::types::GeneralType;
use crate::output::write_stops_csv;
use crate::tags::collect_relevant;

fn tags(pairs: &[(&str, &str)]) -> Tags {
    collect_relevant(pairs.iter().copied())
}

fn relation(id: i64, t: &[(&str, &str)], members: Vec<Member>) -> RelationRecord {
    RelationRecord {
        id,
        tags: tags(t),
        members,
    }
}

fn way(id: i64, t: &[(&str, &str)], node_refs: Vec<i64>) -> WayRecord {
    WayRecord {
        id,
        tags: tags(t),
        node_refs,
    }
}

fn node(id: i64, t: &[(&str, &str)], lat: f64, lon: f64) -> NodeRecord {
    NodeRecord {
        id,
        tags: tags(t),
        lat,
        lon,
    }
}

fn station_relations() -> Vec<RelationRecord> {
    vec![
        relation(
            100,
            &[("route", "train"), ("service", "regional")],
            vec![
                Member::new(ElementKind::Node, 1, "stop"),
                Member::new(ElementKind::Way, 20, "platform"),
                Member::new(ElementKind::Relation, 300, "platform"),
            ],
        ),
        relation(
            101,
            &[("route", "train"), ("service", "long_distance")],
            vec![Member::new(ElementKind::Node, 1, "stop")],
        ),
        relation(
            102,
            &[("route", "bus")],
            vec![Member::new(ElementKind::Node, 1, "stop_entry_only")],
        ),
        relation(
            300,
            &[("public_transport", "platform"), ("name", "Gleis 1")],
            vec![
                Member::new(ElementKind::Way, 20, ""),
                Member::new(ElementKind::Way, 21, ""),
                Member::new(ElementKind::Node, 5, ""),
            ],
        ),
        relation(
            301,
            &[("public_transport", "platform"), ("name", "Gleis 2")],
            vec![Member::new(ElementKind::Way, 21, "")],
        ),
        relation(
            400,
            &[("public_transport", "stop_area"), ("name", "Hauptbahnhof")],
            vec![
                Member::new(ElementKind::Node, 1, "stop"),
                Member::new(ElementKind::Way, 20, "platform"),
                Member::new(ElementKind::Relation, 300, "platform"),
            ],
        ),
    ]
}

fn station_ways() -> Vec<WayRecord> {
    vec![
        way(
            20,
            &[
                ("public_transport", "platform"),
                ("railway", "platform"),
                ("train", "yes"),
                ("name", "Bahnsteig"),
            ],
            vec![2, 3],
        ),
        way(21, &[], vec![3, 4]),
        way(22, &[("highway", "residential")], vec![9]),
    ]
}

fn station_nodes() -> Vec<NodeRecord> {
    vec![
        node(
            1,
            &[
                ("public_transport", "stop_position"),
                ("train", "yes"),
                ("name", "Hbf"),
            ],
            48.0,
            9.0,
        ),
        node(2, &[], 48.0, 9.0),
        node(3, &[], 48.2, 9.2),
        node(4, &[], 48.4, 9.4),
        node(
            5,
            &[
                ("public_transport", "platform"),
                ("bus", "yes"),
                ("name", "Steig A"),
            ],
            48.6,
            9.6,
        ),
        node(9, &[("amenity", "bench")], 50.0, 10.0),
    ]
}

fn run(options: ExtractOptions) -> StopTable {
    extract(options, station_relations(), station_ways(), station_nodes())
}

#[test]
fn test_entities_in_table_order() {
    let table = run(ExtractOptions::default());
    let order: Vec<ElementRef> = table.iter().map(|e| e.reference).collect();
    assert_eq!(
        order,
        vec![
            ElementRef::node(1),
            ElementRef::node(5),
            ElementRef::way(20),
            ElementRef::relation(300),
            ElementRef::relation(301),
        ]
    );
}

#[test]
fn test_lowest_priority_claim_wins() {
    let table = run(ExtractOptions::default());
    let stop = table.get(&ElementRef::node(1)).unwrap();

    let route = stop.route.as_ref().unwrap();
    assert_eq!(route.priority, 2);
    assert_eq!(route.route_type, "train");
    assert_eq!(route.service_type, "long_distance");
    assert_eq!(stop.classification.general, GeneralType::Rail);
    assert_eq!(stop.classification.specific(), Some("train"));
    assert_eq!(stop.stop_area_name.as_deref(), Some("Hauptbahnhof"));
}

#[test]
fn test_stop_way_is_located_and_claimed() {
    let table = run(ExtractOptions::default());
    let platform = table.get(&ElementRef::way(20)).unwrap();

    assert_eq!(platform.name, "Bahnsteig");
    assert_eq!(platform.node_refs, vec![2, 3]);
    assert_relative_eq!(platform.lat().unwrap(), 48.1, epsilon = 1e-9);
    assert_relative_eq!(platform.lon().unwrap(), 9.1, epsilon = 1e-9);
    assert_eq!(platform.route.as_ref().map(|r| r.priority), Some(3));
    assert_eq!(platform.stop_area_name.as_deref(), Some("Hauptbahnhof"));
}

#[test]
fn test_way_nodes_fan_out_to_every_owner() {
    let table = run(ExtractOptions::default());

    let first = table.get(&ElementRef::relation(300)).unwrap();
    assert_eq!(first.way_refs, vec![20, 21]);
    assert_eq!(first.node_refs, vec![5, 2, 3, 3, 4]);
    assert_relative_eq!(first.lat().unwrap(), 48.28, epsilon = 1e-9);
    assert_relative_eq!(first.lon().unwrap(), 9.28, epsilon = 1e-9);
    assert_eq!(first.classification.specific(), Some("unknown"));
    assert_eq!(first.route.as_ref().map(|r| r.priority), Some(3));

    let second = table.get(&ElementRef::relation(301)).unwrap();
    assert_eq!(second.node_refs, vec![3, 4]);
    assert_relative_eq!(second.lat().unwrap(), 48.3, epsilon = 1e-9);
    assert!(!second.is_in_route());
    assert!(!second.is_in_stop_area());
}

#[test]
fn test_node_member_keeps_its_own_classification() {
    let table = run(ExtractOptions::default());
    let count = table
        .iter()
        .filter(|e| e.reference == ElementRef::node(5))
        .count();
    assert_eq!(count, 1);

    let platform = table.get(&ElementRef::node(5)).unwrap();
    assert_eq!(platform.name, "Steig A");
    assert_eq!(platform.classification.general, GeneralType::Bus);
    assert_eq!(platform.classification.specific(), Some("bus"));
    assert_eq!(platform.lat(), Some(48.6));
}

#[test]
fn test_run_statistics() {
    let table = run(ExtractOptions::default());
    let stats = table.stats();

    assert_eq!(stats.relations_seen, 6);
    assert_eq!(stats.route_relations, 3);
    assert_eq!(stats.route_claims, 4);
    assert_eq!(stats.stop_relations, 2);
    assert_eq!(stats.stop_area_relations, 1);

    assert_eq!(stats.ways_seen, 3);
    assert_eq!(stats.ways_of_interest, 2);
    assert_eq!(stats.way_stops, 1);
    assert_eq!(stats.way_propagations, 3);

    assert_eq!(stats.nodes_seen, 6);
    assert_eq!(stats.coordinates_cached, 5);
    assert_eq!(stats.node_stops, 2);

    assert_eq!(stats.total_entities(), 5);
    assert_eq!(stats.unlocatable_entities, 0);
    assert_eq!(stats.in_route, 3);
    assert_eq!(stats.in_stop_area, 3);
}

#[test]
fn test_unlocatable_relation_has_no_position() {
    let relations = vec![relation(
        500,
        &[("public_transport", "stop_position")],
        vec![Member::new(ElementKind::Way, 600, "")],
    )];

    let table = extract(ExtractOptions::default(), relations, Vec::new(), Vec::new());
    let stop = table.get(&ElementRef::relation(500)).unwrap();
    assert!(!stop.is_located());
    assert_eq!(table.stats().unlocatable_entities, 1);
}

#[test]
fn test_matching_by_id_ignores_kind() {
    let relations = || {
        vec![relation(
            1,
            &[("route", "bus")],
            vec![Member::new(ElementKind::Node, 7, "stop")],
        )]
    };
    let ways = || {
        vec![way(
            7,
            &[("public_transport", "platform"), ("highway", "platform")],
            vec![70, 71],
        )]
    };
    let nodes = || vec![node(70, &[], 1.0, 2.0), node(71, &[], 3.0, 4.0)];

    let strict = extract(ExtractOptions::default(), relations(), ways(), nodes());
    assert!(!strict.get(&ElementRef::way(7)).unwrap().is_in_route());

    let loose = extract(
        ExtractOptions {
            matching: MembershipMatching::ById,
        },
        relations(),
        ways(),
        nodes(),
    );
    let platform = loose.get(&ElementRef::way(7)).unwrap();
    assert_eq!(platform.route.as_ref().map(|r| r.route_type.as_str()), Some("bus"));
    assert_eq!(platform.route.as_ref().map(|r| r.priority), Some(10));
}

#[test]
fn test_rerun_is_byte_identical() {
    let mut first = Vec::new();
    write_stops_csv(&run(ExtractOptions::default()), &mut first).unwrap();

    let mut second = Vec::new();
    write_stops_csv(&run(ExtractOptions::default()), &mut second).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}
