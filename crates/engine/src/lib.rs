//! Region trigger engine
//!
//! The host-facing half of the region trigger system: outbound ports to
//! the host server and its backing store, the trigger service that keeps
//! the in-memory record cache consistent with SQLite, and the SQLite
//! adapter itself. Pure domain types live in `regionward-domain`.

pub mod app;
pub mod application;
pub mod infrastructure;

pub use app::TriggerEngine;
pub use application::error::TriggerError;
pub use application::ports::outbound::{
    GroupProviderPort, HostRegion, RegionBounds, RegionProviderPort, RepositoryError,
    TriggerRepositoryPort, TriggerRow,
};
pub use application::services::{EventListUpdate, TriggerService};
pub use infrastructure::config::AppConfig;
pub use infrastructure::host::{InMemoryGroupRegistry, InMemoryRegionRegistry};
pub use infrastructure::persistence::SqliteTriggerRepository;

#[cfg(any(test, feature = "testing"))]
pub use application::ports::outbound::{
    MockGroupProviderPort, MockRegionProviderPort, MockTriggerRepositoryPort,
};
