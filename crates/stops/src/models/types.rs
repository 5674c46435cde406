//! Core data types and enums for stop extraction.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use crate::identifiers::ElementKind;

// ============================================================================
// Enums
// ============================================================================

/// Coarse service category of a stop
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GeneralType {
    Rail,
    Bus,
    Unknown,
}

/// How route claims and stop-area memberships are matched to entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MembershipMatching {
    /// Kind and id must both match.
    #[default]
    ByReference,
    /// Only the numeric id must match; kinds are ignored.
    ById,
}

// ============================================================================
// Data Structures
// ============================================================================

/// Sentinel for untagged names and unmatched classifications.
pub const UNKNOWN: &str = "unknown";

/// (general_type, specific_type) pair assigned by the classification rules.
///
/// `specific` is `None` only when a station rule falls back to a missing
/// `railway` tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub general: GeneralType,
    pub specific: Option<String>,
}

impl Classification {
    pub fn new(general: GeneralType, specific: impl Into<String>) -> Self {
        Self {
            general,
            specific: Some(specific.into()),
        }
    }

    pub fn unknown() -> Self {
        Self::new(GeneralType::Unknown, UNKNOWN)
    }

    pub fn specific(&self) -> Option<&str> {
        self.specific.as_deref()
    }
}

impl Default for Classification {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Priority given to routes without a recognized train service.
pub const DEFAULT_SERVICE_PRIORITY: u8 = 10;

/// Train `service` values ranked by precedence (lower wins).
pub const TRAIN_SERVICE_PRIORITIES: [(&str, u8); 9] = [
    ("high_speed", 1),
    ("long_distance", 2),
    ("regional", 3),
    ("commuter", 4),
    ("night", 5),
    ("tourism", 6),
    ("car", 7),
    ("car_shuttle", 8),
    ("event", 9),
];

/// Look up the priority of a train `service` tag value.
pub fn train_service_priority(service: &str) -> Option<u8> {
    TRAIN_SERVICE_PRIORITIES
        .iter()
        .find(|(name, _)| *name == service)
        .map(|(_, priority)| *priority)
}

/// One route relation's claim on a stop or platform member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteClaim {
    /// Kind of the claimed member
    pub kind: ElementKind,
    pub route_type: String,
    pub service_type: String,
    pub priority: u8,
}

impl RouteClaim {
    /// True when this claim should replace `current`.
    pub fn outranks(&self, current: &RouteClaim) -> bool {
        self.priority < current.priority
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StopsError {
    #[error("Unknown element kind: {0}")]
    UnknownElementKind(String),

    #[error("Invalid element reference: {0}")]
    InvalidReference(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StopsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_train_service_priority_table() {
        assert_eq!(train_service_priority("high_speed"), Some(1));
        assert_eq!(train_service_priority("long_distance"), Some(2));
        assert_eq!(train_service_priority("regional"), Some(3));
        assert_eq!(train_service_priority("commuter"), Some(4));
        assert_eq!(train_service_priority("night"), Some(5));
        assert_eq!(train_service_priority("tourism"), Some(6));
        assert_eq!(train_service_priority("car"), Some(7));
        assert_eq!(train_service_priority("car_shuttle"), Some(8));
        assert_eq!(train_service_priority("event"), Some(9));
        assert_eq!(train_service_priority("busy"), None);
    }

    #[test]
    fn test_claim_outranks_only_when_strictly_lower() {
        let claim = |priority| RouteClaim {
            kind: ElementKind::Node,
            route_type: "train".into(),
            service_type: String::new(),
            priority,
        };
        assert!(claim(1).outranks(&claim(3)));
        assert!(!claim(3).outranks(&claim(3)));
        assert!(!claim(10).outranks(&claim(3)));
    }

    #[test]
    fn test_general_type_strings() {
        assert_eq!(GeneralType::Rail.to_string(), "rail");
        assert_eq!(GeneralType::Bus.as_ref(), "bus");
        assert_eq!("unknown".parse::<GeneralType>().unwrap(), GeneralType::Unknown);
    }
}
