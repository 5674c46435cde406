//! The final, immutable stop table and its flattened rows.

use hashbrown::HashMap;
use serde::Serialize;

use crate::identifiers::{ElementKind, ElementRef};
use crate::models::entity::StopEntity;
use crate::models::types::GeneralType;
use crate::stats::ExtractStats;

/// Resolved stops ordered by (kind, id).
#[derive(Clone, Debug)]
pub struct StopTable {
    entities: Vec<StopEntity>,
    stats: ExtractStats,
}

impl StopTable {
    pub(crate) fn from_entities(
        entities: HashMap<ElementRef, StopEntity>,
        mut stats: ExtractStats,
    ) -> Self {
        let mut entities: Vec<StopEntity> = entities.into_values().collect();
        entities.sort_by_key(|e| e.reference);

        for entity in &entities {
            match entity.kind() {
                ElementKind::Node => stats.node_entities += 1,
                ElementKind::Way => stats.way_entities += 1,
                ElementKind::Relation => stats.relation_entities += 1,
            }
            if !entity.is_located() {
                stats.unlocatable_entities += 1;
            }
            if entity.is_in_route() {
                stats.in_route += 1;
            }
            if entity.is_in_stop_area() {
                stats.in_stop_area += 1;
            }
        }

        Self { entities, stats }
    }

    pub fn get(&self, reference: &ElementRef) -> Option<&StopEntity> {
        self.entities
            .binary_search_by_key(reference, |e| e.reference)
            .ok()
            .map(|i| &self.entities[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StopEntity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[StopEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }

    /// Flattened output rows, in table order.
    pub fn records(&self) -> impl Iterator<Item = StopRecord> + '_ {
        self.entities.iter().map(StopRecord::from)
    }
}

/// One flattened output row. List columns are `;`-joined ids.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StopRecord {
    pub id: i64,
    pub object_kind: ElementKind,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub way_refs: String,
    pub node_refs: String,
    pub public_transport_tag: Option<String>,
    pub railway_tag: Option<String>,
    pub is_in_stop_area: bool,
    pub stop_area_name: Option<String>,
    pub is_in_route: bool,
    pub route_type: Option<String>,
    pub service_type: Option<String>,
    pub service_priority: Option<u8>,
    pub general_type: GeneralType,
    pub specific_type: Option<String>,
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

impl From<&StopEntity> for StopRecord {
    fn from(entity: &StopEntity) -> Self {
        let route = entity.route.as_ref();
        Self {
            id: entity.reference.id,
            object_kind: entity.kind(),
            name: entity.name.clone(),
            latitude: entity.lat(),
            longitude: entity.lon(),
            way_refs: join_ids(&entity.way_refs),
            node_refs: join_ids(&entity.node_refs),
            public_transport_tag: entity.public_transport_tag.clone(),
            railway_tag: entity.railway_tag.clone(),
            is_in_stop_area: entity.is_in_stop_area(),
            stop_area_name: entity.stop_area_name.clone(),
            is_in_route: entity.is_in_route(),
            route_type: route.map(|r| r.route_type.clone()),
            service_type: route.map(|r| r.service_type.clone()),
            service_priority: route.map(|r| r.priority),
            general_type: entity.classification.general,
            specific_type: entity.classification.specific.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::RouteClaim;
    use geo::Coord;

    #[test]
    fn test_table_is_sorted_and_counted() {
        let mut map = HashMap::new();
        for r in [
            ElementRef::relation(1),
            ElementRef::node(5),
            ElementRef::way(2),
            ElementRef::node(3),
        ] {
            map.insert(r, StopEntity::new(r));
        }
        map.get_mut(&ElementRef::node(5)).unwrap().position = Some(Coord { x: 9.0, y: 48.0 });

        let table = StopTable::from_entities(map, ExtractStats::default());
        let order: Vec<ElementRef> = table.iter().map(|e| e.reference).collect();
        assert_eq!(
            order,
            vec![
                ElementRef::node(3),
                ElementRef::node(5),
                ElementRef::way(2),
                ElementRef::relation(1),
            ]
        );

        let stats = table.stats();
        assert_eq!(stats.node_entities, 2);
        assert_eq!(stats.way_entities, 1);
        assert_eq!(stats.relation_entities, 1);
        assert_eq!(stats.unlocatable_entities, 3);

        assert!(table.get(&ElementRef::way(2)).is_some());
        assert!(table.get(&ElementRef::way(5)).is_none());
    }

    #[test]
    fn test_record_flattening() {
        let mut entity = StopEntity::new(ElementRef::relation(42));
        entity.name = "Hauptbahnhof".into();
        entity.node_refs = vec![1, 2, 3];
        entity.way_refs = vec![10, 11];
        entity.position = Some(Coord { x: 9.18, y: 48.78 });
        entity.route = Some(RouteClaim {
            kind: ElementKind::Relation,
            route_type: "train".into(),
            service_type: "regional".into(),
            priority: 3,
        });

        let record = StopRecord::from(&entity);
        assert_eq!(record.id, 42);
        assert_eq!(record.object_kind, ElementKind::Relation);
        assert_eq!(record.node_refs, "1;2;3");
        assert_eq!(record.way_refs, "10;11");
        assert_eq!(record.latitude, Some(48.78));
        assert_eq!(record.longitude, Some(9.18));
        assert!(record.is_in_route);
        assert_eq!(record.service_priority, Some(3));
        assert!(!record.is_in_stop_area);
        assert_eq!(record.stop_area_name, None);
        assert_eq!(record.general_type, GeneralType::Unknown);
        assert_eq!(record.specific_type.as_deref(), Some("unknown"));
    }
}
