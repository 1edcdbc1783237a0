//! RegionWard domain layer
//!
//! Pure types and invariants for region-trigger configuration: the closed
//! trigger-event registry, the per-region [`TriggerRecord`], the
//! comma-joined set codec shared by ban and permission lists, and the
//! per-player state driven by the host's tick. No I/O lives here; the
//! engine crate owns ports, services, and persistence.

pub mod entities;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use entities::{normalize_text, TriggerRecord};
pub use events::{
    validate_list, EventListValidation, EventSet, EventSpec, TriggerEvent, UnknownEventToken,
    EVENT_TABLE, NONE_TOKEN,
};
pub use ids::{RegionId, TriggerId, WorldId};
pub use value_objects::{DelimitedList, PlayerTriggerState};
