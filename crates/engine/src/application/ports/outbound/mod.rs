mod host;
mod trigger_repository;

pub use host::{GroupProviderPort, HostRegion, RegionBounds, RegionProviderPort};
pub use trigger_repository::{RepositoryError, TriggerRepositoryPort, TriggerRow};

#[cfg(any(test, feature = "testing"))]
pub use host::{MockGroupProviderPort, MockRegionProviderPort};
#[cfg(any(test, feature = "testing"))]
pub use trigger_repository::MockTriggerRepositoryPort;
