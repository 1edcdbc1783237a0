//! In-memory host registries
//!
//! Stand-ins for the host server's region and group state. The host owns
//! these collections; the engine only reads them, so interior mutability
//! with a std `RwLock` is enough (lookups are sync and never held across
//! awaits).

use std::collections::HashMap;
use std::sync::RwLock;

use regionward_domain::{RegionId, WorldId};

use crate::application::ports::outbound::{GroupProviderPort, HostRegion, RegionProviderPort};

pub struct InMemoryRegionRegistry {
    world: WorldId,
    regions: RwLock<HashMap<RegionId, HostRegion>>,
}

impl InMemoryRegionRegistry {
    pub fn new(world: WorldId) -> Self {
        Self {
            world,
            regions: RwLock::new(HashMap::new()),
        }
    }

    pub fn upsert(&self, region: HostRegion) {
        if let Ok(mut regions) = self.regions.write() {
            regions.insert(region.id, region);
        }
    }

    pub fn remove(&self, region_id: RegionId) {
        if let Ok(mut regions) = self.regions.write() {
            regions.remove(&region_id);
        }
    }
}

impl RegionProviderPort for InMemoryRegionRegistry {
    fn region_by_name(&self, name: &str) -> Option<HostRegion> {
        self.regions
            .read()
            .ok()?
            .values()
            .find(|region| region.name == name)
            .cloned()
    }

    fn region_by_id(&self, region_id: RegionId) -> Option<HostRegion> {
        self.regions.read().ok()?.get(&region_id).cloned()
    }

    fn active_world(&self) -> WorldId {
        self.world
    }
}

#[derive(Default)]
pub struct InMemoryGroupRegistry {
    groups: RwLock<Vec<String>>,
}

impl InMemoryGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&self, name: impl Into<String>) {
        let name = name.into();
        if let Ok(mut groups) = self.groups.write() {
            if !groups.contains(&name) {
                groups.push(name);
            }
        }
    }
}

impl GroupProviderPort for InMemoryGroupRegistry {
    fn group_exists(&self, name: &str) -> bool {
        self.groups
            .read()
            .map(|groups| groups.iter().any(|g| g == name))
            .unwrap_or(false)
    }
}
