//! Input records, stop entities and shared types.

pub mod elements;
pub mod entity;
pub mod types;

// Re-exports for convenience
pub use elements::{Member, NodeRecord, RelationRecord, WayRecord};
pub use entity::StopEntity;
pub use types::{
    Classification, GeneralType, MembershipMatching, Result, RouteClaim, StopsError,
    DEFAULT_SERVICE_PRIORITY, UNKNOWN,
};
