//! Tag classification rules.
//!
//! Two pure functions map a filtered tag set to a [`Classification`]. On top
//! of them, [`StopRule`] describes the three independent stop rules applied
//! to ways and nodes. Rules run in [`StopRule::ORDER`] on a single mutable
//! [`StopEntity`], so a later matching rule overwrites the fields an earlier
//! one set.

use crate::models::entity::StopEntity;
use crate::models::types::{Classification, GeneralType, UNKNOWN};
use crate::tags::{
    filter_keys, tag_in, tag_is, Tags, BUS, HIGHWAY, NAME, PUBLIC_TRANSPORT, RAILWAY,
    RAILWAY_STATION_VALUES, STATION, STOP_VALUES,
};

/// Rail modes checked in order by `classify_transport_tags`.
const RAIL_MODES: [&str; 4] = ["train", "subway", "light_rail", "tram"];

/// `station` values that name a rail mode.
const STATION_MODES: [&str; 5] = ["train", "subway", "light_rail", "monorail", "funicular"];

const TRANSPORT_KEYS: [&str; 7] = ["train", "subway", "light_rail", "tram", RAILWAY, BUS, HIGHWAY];
const RAILWAY_STATION_KEYS: [&str; 2] = [STATION, RAILWAY];
const PUBLIC_TRANSPORT_STATION_KEYS: [&str; 3] = [STATION, RAILWAY, BUS];

/// Classify a stop (platform / stop position) from its tags.
///
/// The first matching rule wins:
/// 1. `train|subway|light_rail|tram=yes` -> (rail, that key)
/// 2. `bus=yes` -> (bus, bus)
/// 3. `highway=bus_stop` -> (bus, bus)
/// 4. `railway=platform` -> (rail, railway_platform)
/// 5. `highway=platform` -> (bus, highway_platform)
/// 6. otherwise (unknown, unknown)
pub fn classify_transport_tags(tags: &Tags) -> Classification {
    if let Some(mode) = RAIL_MODES.iter().find(|mode| tag_is(tags, mode, "yes")) {
        return Classification::new(GeneralType::Rail, *mode);
    }
    if tag_is(tags, BUS, "yes") || tag_is(tags, HIGHWAY, "bus_stop") {
        return Classification::new(GeneralType::Bus, "bus");
    }
    if tag_is(tags, RAILWAY, "platform") {
        return Classification::new(GeneralType::Rail, "railway_platform");
    }
    if tag_is(tags, HIGHWAY, "platform") {
        return Classification::new(GeneralType::Bus, "highway_platform");
    }
    Classification::unknown()
}

/// Classify a station from its tags.
///
/// A rail `station=*` mode wins, then `bus=yes`; anything else is rail with
/// the `railway` value (possibly absent) as specific type.
pub fn classify_station_tags(tags: &Tags) -> Classification {
    if let Some(station) = tags.get(STATION).filter(|s| STATION_MODES.contains(&s.as_str())) {
        return Classification::new(GeneralType::Rail, station.as_str());
    }
    if tag_is(tags, BUS, "yes") {
        return Classification::new(GeneralType::Bus, "bus");
    }
    Classification {
        general: GeneralType::Rail,
        specific: tags.get(RAILWAY).cloned(),
    }
}

/// Classification rules for stop elements, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopRule {
    /// `public_transport=platform|stop_position`
    PublicTransportStop,
    /// `railway=station|halt|tram_stop`
    RailwayStation,
    /// `public_transport=station`, only when `RailwayStation` does not match
    PublicTransportStation,
}

impl StopRule {
    pub const ORDER: [StopRule; 3] = [
        StopRule::PublicTransportStop,
        StopRule::RailwayStation,
        StopRule::PublicTransportStation,
    ];

    /// Relations are only ever stops, never stations.
    pub const RELATION_ORDER: [StopRule; 1] = [StopRule::PublicTransportStop];

    pub fn matches(self, tags: &Tags) -> bool {
        match self {
            StopRule::PublicTransportStop => tag_in(tags, PUBLIC_TRANSPORT, &STOP_VALUES),
            StopRule::RailwayStation => tag_in(tags, RAILWAY, &RAILWAY_STATION_VALUES),
            StopRule::PublicTransportStation => {
                tag_is(tags, PUBLIC_TRANSPORT, "station")
                    && !StopRule::RailwayStation.matches(tags)
            }
        }
    }

    /// Classify with the tag subset this rule looks at.
    pub fn classify(self, tags: &Tags) -> Classification {
        match self {
            StopRule::PublicTransportStop => {
                classify_transport_tags(&filter_keys(tags, &TRANSPORT_KEYS))
            }
            StopRule::RailwayStation => {
                classify_station_tags(&filter_keys(tags, &RAILWAY_STATION_KEYS))
            }
            StopRule::PublicTransportStation => {
                classify_station_tags(&filter_keys(tags, &PUBLIC_TRANSPORT_STATION_KEYS))
            }
        }
    }

    /// Write this rule's fields into `entity`.
    pub fn apply(self, tags: &Tags, entity: &mut StopEntity) {
        entity.name = tags
            .get(NAME)
            .cloned()
            .unwrap_or_else(|| UNKNOWN.to_string());
        entity.classification = self.classify(tags);

        match self {
            StopRule::PublicTransportStop => {
                entity.public_transport_tag = tags.get(PUBLIC_TRANSPORT).cloned();
            }
            StopRule::RailwayStation => {
                entity.railway_tag = tags.get(RAILWAY).cloned();
            }
            StopRule::PublicTransportStation => {
                entity.public_transport_tag = tags.get(PUBLIC_TRANSPORT).cloned();
                entity.railway_tag = tags.get(RAILWAY).cloned();
            }
        }
    }
}

/// Apply every matching rule of `rules` in order. Returns whether any matched.
pub fn apply_rules(rules: &[StopRule], tags: &Tags, entity: &mut StopEntity) -> bool {
    let mut matched = false;
    for rule in rules.iter().filter(|rule| rule.matches(tags)) {
        rule.apply(tags, entity);
        matched = true;
    }
    matched
}

/// True when at least one of `rules` matches.
pub fn any_rule_matches(rules: &[StopRule], tags: &Tags) -> bool {
    rules.iter().any(|rule| rule.matches(tags))
}
