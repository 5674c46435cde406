//! Route claims: which stops and platforms are served by which routes.
//!
//! Every `route=*` relation claims its `stop` and `platform` members. When
//! several routes claim the same member, the claim with the numerically lowest
//! priority wins; ties keep the earlier claim.

use hashbrown::HashMap;

use crate::identifiers::{ElementKind, ElementRef};
use crate::models::elements::RelationRecord;
use crate::models::types::{
    train_service_priority, MembershipMatching, RouteClaim, DEFAULT_SERVICE_PRIORITY,
};
use crate::tags::{Tags, ROUTE, SERVICE};

/// Member roles a route claims.
const CLAIMED_ROLES: [&str; 2] = ["stop", "platform"];

/// Service classification of one route relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteService {
    pub route_type: String,
    pub service_type: String,
    pub priority: u8,
    /// False when a train `service` value is not in the priority table
    pub recognized: bool,
}

impl RouteService {
    /// Derive the service of a relation, if it is a route at all.
    pub fn from_tags(tags: &Tags) -> Option<Self> {
        let route_type = tags.get(ROUTE)?;

        let service = match tags.get(SERVICE) {
            Some(service) if route_type == "train" => service,
            _ => {
                return Some(Self {
                    route_type: route_type.clone(),
                    service_type: String::new(),
                    priority: DEFAULT_SERVICE_PRIORITY,
                    recognized: true,
                })
            }
        };

        let priority = train_service_priority(service);
        Some(Self {
            route_type: route_type.clone(),
            service_type: service.clone(),
            priority: priority.unwrap_or(DEFAULT_SERVICE_PRIORITY),
            recognized: priority.is_some(),
        })
    }

    fn claim_for(&self, kind: ElementKind) -> RouteClaim {
        RouteClaim {
            kind,
            route_type: self.route_type.clone(),
            service_type: self.service_type.clone(),
            priority: self.priority,
        }
    }
}

/// Outcome of indexing one route relation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteIndexed {
    /// Stop/platform members seen
    pub claimed_members: usize,
    /// Members whose best claim changed
    pub updated_claims: usize,
    pub unrecognized_service: bool,
}

/// Best route claim per member.
#[derive(Debug, Default)]
pub struct RouteIndex {
    claims: HashMap<ElementRef, RouteClaim>,
}

impl RouteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a relation. Returns `None` when it is not a route.
    pub fn record_route(&mut self, relation: &RelationRecord) -> Option<RouteIndexed> {
        let service = RouteService::from_tags(&relation.tags)?;
        let mut indexed = RouteIndexed::default();

        if !service.recognized {
            log::warn!(
                "Route relation {} has unrecognized train service '{}', using priority {}",
                relation.id,
                service.service_type,
                DEFAULT_SERVICE_PRIORITY
            );
            indexed.unrecognized_service = true;
        }

        for member in relation
            .members
            .iter()
            .filter(|m| CLAIMED_ROLES.contains(&m.role.as_str()))
        {
            indexed.claimed_members += 1;
            if self.claim(member.reference(), &service) {
                indexed.updated_claims += 1;
            }
        }

        Some(indexed)
    }

    /// Upsert a claim; replaces an existing one only on strictly lower
    /// priority. Returns whether the stored claim changed.
    pub fn claim(&mut self, member: ElementRef, service: &RouteService) -> bool {
        let candidate = service.claim_for(member.kind);
        match self.claims.get_mut(&member) {
            Some(current) if !candidate.outranks(current) => false,
            Some(current) => {
                *current = candidate;
                true
            }
            None => {
                self.claims.insert(member, candidate);
                true
            }
        }
    }

    pub fn get(&self, member: &ElementRef) -> Option<&RouteClaim> {
        self.claims.get(member)
    }

    /// Find the claim that applies to `entity`.
    ///
    /// `ById` considers claims on the same numeric id under every kind and
    /// returns the lowest priority; the entity's own kind wins ties, then
    /// node, way, relation.
    pub fn lookup(&self, entity: ElementRef, matching: MembershipMatching) -> Option<&RouteClaim> {
        match matching {
            MembershipMatching::ByReference => self
                .get(&entity)
                .filter(|claim| claim.kind == entity.kind),
            MembershipMatching::ById => {
                let mut best = self.get(&entity);
                for kind in ElementKind::ALL.into_iter().filter(|k| *k != entity.kind) {
                    if let Some(claim) = self.get(&entity.with_kind(kind)) {
                        if best.map_or(true, |b| claim.outranks(b)) {
                            best = Some(claim);
                        }
                    }
                }
                best
            }
        }
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
