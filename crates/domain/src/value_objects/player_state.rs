//! Per-player trigger state kept by the host's session adapters
//!
//! The engine itself is stateless about players; adapters attach one of
//! these to each session and drive it from the host's per-second tick and
//! region enter/leave callbacks.

use serde::{Deserialize, Serialize};

/// Mutable per-player state for trigger effects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTriggerState {
    /// PvP was forced on by a `pvp` region and may not be toggled off
    pub forced_pvp: bool,
    /// PvP was forced off by a `nopvp` region and may not be toggled on
    pub forced_no_pvp: bool,
    /// Seconds elapsed toward the next periodic message
    msg_cooldown: u32,
}

impl PlayerTriggerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the periodic-message cooldown by one second.
    ///
    /// Returns true when `interval` seconds have elapsed, resetting the
    /// counter. An interval of 0 disables repetition and never fires.
    pub fn tick_message_cooldown(&mut self, interval: u32) -> bool {
        if interval == 0 {
            return false;
        }
        if self.msg_cooldown < interval {
            self.msg_cooldown += 1;
            return false;
        }
        self.msg_cooldown = 0;
        true
    }

    /// Clear state applied by a region, on leaving it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_fires_after_interval_elapses() {
        let mut state = PlayerTriggerState::new();
        assert!(!state.tick_message_cooldown(2));
        assert!(!state.tick_message_cooldown(2));
        assert!(state.tick_message_cooldown(2));
        // Counter resets after firing
        assert!(!state.tick_message_cooldown(2));
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut state = PlayerTriggerState::new();
        for _ in 0..10 {
            assert!(!state.tick_message_cooldown(0));
        }
    }

    #[test]
    fn reset_clears_forced_flags() {
        let mut state = PlayerTriggerState {
            forced_pvp: true,
            ..Default::default()
        };
        state.reset();
        assert_eq!(state, PlayerTriggerState::default());
    }
}
