//! TriggerRecord entity - Per-region trigger configuration
//!
//! One record per host region (region_id is unique across records; the
//! store enforces it). The record owns membership queries for the
//! gameplay callbacks and the ban/permission set mutations; all persisted
//! set fields go through the encode/decode boundary of [`DelimitedList`]
//! and [`EventSet`].

use serde::{Deserialize, Serialize};

use crate::events::{EventSet, TriggerEvent};
use crate::ids::{RegionId, TriggerId};
use crate::value_objects::DelimitedList;

/// Trigger configuration attached to exactly one host region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRecord {
    /// Store-assigned surrogate key; `TriggerId::UNSAVED` until persisted
    pub id: TriggerId,
    /// Host region this configuration belongs to
    pub region_id: RegionId,
    /// Active trigger behaviors
    pub events: EventSet,
    /// Message sent on entry; None means the host's default greeting
    pub enter_msg: Option<String>,
    /// Message sent on leave; None means the host's default farewell
    pub leave_msg: Option<String>,
    /// Periodic message; None disables the periodic sender entirely
    pub message: Option<String>,
    /// Seconds between periodic messages; 0 disables repetition
    pub msg_interval: u32,
    /// Host permission-group name applied while inside; revalidated on load
    pub temp_group: Option<String>,
    /// Banned item names (matched case-insensitively)
    pub item_bans: DelimitedList<String>,
    /// Banned projectile ids
    pub proj_bans: DelimitedList<i32>,
    /// Banned tile ids
    pub tile_bans: DelimitedList<i32>,
    /// Permission tokens granted while `temppermission` is active
    /// (stored lowercased)
    pub permissions: DelimitedList<String>,
}

impl TriggerRecord {
    /// Fresh, unpersisted record with no events.
    pub fn new(region_id: RegionId) -> Self {
        Self {
            id: TriggerId::UNSAVED,
            region_id,
            events: EventSet::new(),
            enter_msg: None,
            leave_msg: None,
            message: None,
            msg_interval: 0,
            temp_group: None,
            item_bans: DelimitedList::new(),
            proj_bans: DelimitedList::new(),
            tile_bans: DelimitedList::new(),
            permissions: DelimitedList::new(),
        }
    }

    pub fn has_event(&self, event: TriggerEvent) -> bool {
        self.events.contains(event)
    }

    // ==========================================================================
    // Item bans (names, case-insensitive)
    // ==========================================================================

    pub fn item_is_banned(&self, name: &str) -> bool {
        self.item_bans
            .iter()
            .any(|banned| banned.eq_ignore_ascii_case(name))
    }

    /// Returns false when the item is already banned.
    pub fn ban_item(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.item_is_banned(&name) {
            return false;
        }
        self.item_bans.insert(name)
    }

    /// Returns false when the item was not banned.
    pub fn unban_item(&mut self, name: &str) -> bool {
        let stored = self
            .item_bans
            .iter()
            .find(|banned| banned.eq_ignore_ascii_case(name))
            .cloned();
        match stored {
            Some(stored) => self.item_bans.remove(&stored),
            None => false,
        }
    }

    // ==========================================================================
    // Projectile / tile bans (numeric ids)
    // ==========================================================================

    pub fn projectile_is_banned(&self, id: i32) -> bool {
        self.proj_bans.contains(&id)
    }

    pub fn ban_projectile(&mut self, id: i32) -> bool {
        self.proj_bans.insert(id)
    }

    pub fn unban_projectile(&mut self, id: i32) -> bool {
        self.proj_bans.remove(&id)
    }

    pub fn tile_is_banned(&self, id: i32) -> bool {
        self.tile_bans.contains(&id)
    }

    pub fn ban_tile(&mut self, id: i32) -> bool {
        self.tile_bans.insert(id)
    }

    pub fn unban_tile(&mut self, id: i32) -> bool {
        self.tile_bans.remove(&id)
    }

    // ==========================================================================
    // Temporary permissions (tokens, stored lowercased)
    // ==========================================================================

    pub fn has_permission(&self, token: &str) -> bool {
        self.permissions.contains(&token.to_lowercase())
    }

    /// Lowercases the token; blank tokens are ignored. Returns false for
    /// blanks and duplicates.
    pub fn add_permission(&mut self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        if token.is_empty() {
            return false;
        }
        self.permissions.insert(token)
    }

    pub fn remove_permission(&mut self, token: &str) -> bool {
        self.permissions.remove(&token.trim().to_lowercase())
    }
}

/// Normalize an optional free-text field: whitespace-only input means
/// "unset" and becomes None.
pub fn normalize_text(value: Option<&str>) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        _ => None,
    }
}
