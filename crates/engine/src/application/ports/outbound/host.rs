//! Host collaborator ports - Region geometry and permission groups
//!
//! The host game server owns region geometry, the group registry, and the
//! active world. These ports are the engine's read-only view of that
//! state. They are synchronous: the host keeps both registries in memory,
//! and the gameplay callbacks that hit them cannot afford to await.

use serde::{Deserialize, Serialize};

use regionward_domain::{RegionId, WorldId};

/// Rectangular region geometry, in world tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl RegionBounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }
}

/// A host-owned region as seen through [`RegionProviderPort`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRegion {
    pub id: RegionId,
    pub name: String,
    /// Z-order; the higher region wins where geometries overlap
    pub z: i32,
    pub bounds: RegionBounds,
}

impl HostRegion {
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.bounds.contains(x, y)
    }
}

/// Read access to the host's active-world region registry
///
/// The registry only knows regions of the currently loaded world, which
/// is what scopes [`reload`](crate::application::services::TriggerService::reload)
/// to the active world.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait RegionProviderPort: Send + Sync {
    fn region_by_name(&self, name: &str) -> Option<HostRegion>;
    fn region_by_id(&self, id: RegionId) -> Option<HostRegion>;
    fn active_world(&self) -> WorldId;
}

/// Read access to the host's permission-group registry
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait GroupProviderPort: Send + Sync {
    fn group_exists(&self, name: &str) -> bool;
}
