//! Trigger event registry - The closed set of behaviors a region can carry
//!
//! Every trigger behavior has a canonical lowercase token (the persisted
//! form), zero or more human-readable aliases, and a description used by
//! admin-facing help output. The set is closed and known at compile time,
//! so the registry is a hand-written constant table rather than anything
//! discovered at runtime.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentinel token meaning "no events"; never a member of an active set.
pub const NONE_TOKEN: &str = "none";

/// A trigger behavior that can be attached to a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerEvent {
    /// Send a message when a player enters the region
    EnterMessage,
    /// Send a message when a player leaves the region
    LeaveMessage,
    /// Send a message at a configurable interval while inside
    PeriodicMessage,
    /// Apply a temporary permission group while inside
    TempGroup,
    /// Disallow specific items while inside
    ItemBan,
    /// Disallow specific projectiles while inside
    ProjectileBan,
    /// Disallow placing specific tiles while inside
    TileBan,
    /// Damage players entering the region
    Kill,
    /// Players are invulnerable while inside
    Godmode,
    /// Force PvP on while inside
    ForcePvp,
    /// Force PvP off while inside
    NoPvp,
    /// Deny entry to the region
    Private,
    /// Region-local chat channel
    RegionChat,
    /// Force third-person view, for spectating events
    ThirdView,
    /// Grant temporary permissions while inside
    TempPermission,
}

/// One row of the registry table
pub struct EventSpec {
    pub event: TriggerEvent,
    /// Canonical lowercase token, the persisted form
    pub token: &'static str,
    /// Alternative spellings accepted from admin input
    pub aliases: &'static [&'static str],
    pub description: &'static str,
}

/// The full registry, in declaration order.
pub const EVENT_TABLE: &[EventSpec] = &[
    EventSpec {
        event: TriggerEvent::EnterMessage,
        token: "entermsg",
        aliases: &["entermessage"],
        description: "Sends a message when a player enters the region.",
    },
    EventSpec {
        event: TriggerEvent::LeaveMessage,
        token: "leavemsg",
        aliases: &["leavemessage"],
        description: "Sends a message when a player leaves the region.",
    },
    EventSpec {
        event: TriggerEvent::PeriodicMessage,
        token: "message",
        aliases: &["msg"],
        description: "Sends a message to players in the region at an interval.",
    },
    EventSpec {
        event: TriggerEvent::TempGroup,
        token: "tempgroup",
        aliases: &["tg"],
        description: "Applies a temporary group to players in the region.",
    },
    EventSpec {
        event: TriggerEvent::ItemBan,
        token: "itemban",
        aliases: &["itembans"],
        description: "Disallows specific items inside the region.",
    },
    EventSpec {
        event: TriggerEvent::ProjectileBan,
        token: "projban",
        aliases: &["projbans", "projectileban"],
        description: "Disallows specific projectiles inside the region.",
    },
    EventSpec {
        event: TriggerEvent::TileBan,
        token: "tileban",
        aliases: &["tilebans"],
        description: "Disallows placing specific tiles inside the region.",
    },
    EventSpec {
        event: TriggerEvent::Kill,
        token: "kill",
        aliases: &[],
        description: "Damages players entering the region.",
    },
    EventSpec {
        event: TriggerEvent::Godmode,
        token: "godmode",
        aliases: &["god"],
        description: "Players in the region are invulnerable.",
    },
    EventSpec {
        event: TriggerEvent::ForcePvp,
        token: "pvp",
        aliases: &["forcepvp"],
        description: "Forces PvP on inside the region.",
    },
    EventSpec {
        event: TriggerEvent::NoPvp,
        token: "nopvp",
        aliases: &["forbidpvp"],
        description: "Forbids PvP inside the region.",
    },
    EventSpec {
        event: TriggerEvent::Private,
        token: "private",
        aliases: &[],
        description: "Denies entry to the region.",
    },
    EventSpec {
        event: TriggerEvent::RegionChat,
        token: "regionchat",
        aliases: &["chat"],
        description: "Enables a region-local chat channel.",
    },
    EventSpec {
        event: TriggerEvent::ThirdView,
        token: "thirdview",
        aliases: &["3dview"],
        description: "Changes the player viewpoint, for spectated events.",
    },
    EventSpec {
        event: TriggerEvent::TempPermission,
        token: "temppermission",
        aliases: &["tempperm", "tp"],
        description: "Grants temporary permissions to players in the region.",
    },
];

impl TriggerEvent {
    /// All events in registry order.
    pub fn all() -> impl Iterator<Item = TriggerEvent> {
        EVENT_TABLE.iter().map(|spec| spec.event)
    }

    fn spec(self) -> &'static EventSpec {
        // The table is total over the enum; the lookup cannot miss.
        EVENT_TABLE
            .iter()
            .find(|spec| spec.event == self)
            .expect("event missing from EVENT_TABLE")
    }

    /// Canonical lowercase token, the persisted form.
    pub fn token(self) -> &'static str {
        self.spec().token
    }

    pub fn description(self) -> &'static str {
        self.spec().description
    }

    /// Resolve a single token to its canonical event.
    ///
    /// Matching is case-insensitive and accepts aliases. Blank input and
    /// the `none` sentinel resolve to nothing.
    pub fn from_token(token: &str) -> Option<TriggerEvent> {
        let token = token.trim().to_lowercase();
        if token.is_empty() || token == NONE_TOKEN {
            return None;
        }
        EVENT_TABLE
            .iter()
            .find(|spec| spec.token == token || spec.aliases.contains(&token.as_str()))
            .map(|spec| spec.event)
    }

    /// True iff the token names a known event (canonical or alias).
    pub fn is_known_token(token: &str) -> bool {
        Self::from_token(token).is_some()
    }
}

impl fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TriggerEvent {
    type Err = UnknownEventToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| UnknownEventToken(s.trim().to_lowercase()))
    }
}

/// Token that matched neither a canonical event name nor an alias
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event token: {0}")]
pub struct UnknownEventToken(pub String);

/// Outcome of validating a comma-separated event list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListValidation {
    /// Known tokens, mapped to their canonical events, input order kept.
    /// Duplicates are preserved; deduplication happens when merging into
    /// a record's event set.
    pub valid: Vec<TriggerEvent>,
    /// Unknown tokens, verbatim (trimmed, lowercased)
    pub invalid: Vec<String>,
}

impl EventListValidation {
    pub fn is_empty(&self) -> bool {
        self.valid.is_empty() && self.invalid.is_empty()
    }
}

/// Split a comma-separated event list and partition it into known and
/// unknown tokens.
///
/// Blank segments and the `none` sentinel are dropped silently rather than
/// reported as invalid.
pub fn validate_list(csv: &str) -> EventListValidation {
    let mut result = EventListValidation::default();
    for raw in csv.split(',') {
        let token = raw.trim().to_lowercase();
        if token.is_empty() || token == NONE_TOKEN {
            continue;
        }
        match TriggerEvent::from_token(&token) {
            Some(event) => result.valid.push(event),
            None => result.invalid.push(token),
        }
    }
    result
}

/// Insertion-ordered set of trigger events
///
/// The persisted form is the comma-joined canonical tokens, with the
/// `none` sentinel standing in for the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSet(Vec<TriggerEvent>);

impl EventSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a persisted event string, ignoring blanks, `none`, and
    /// tokens no longer present in the registry. Callers that need to
    /// report unknown tokens run [`validate_list`] first.
    pub fn decode(encoded: &str) -> Self {
        let mut set = Self::new();
        for raw in encoded.split(',') {
            if let Some(event) = TriggerEvent::from_token(raw) {
                set.insert(event);
            }
        }
        set
    }

    /// Encode to the persisted form; the empty set encodes as `none`.
    pub fn encode(&self) -> String {
        if self.0.is_empty() {
            return NONE_TOKEN.to_string();
        }
        self.0
            .iter()
            .map(|e| e.token())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn contains(&self, event: TriggerEvent) -> bool {
        self.0.contains(&event)
    }

    /// Returns false (and leaves the set unchanged) for duplicates.
    pub fn insert(&mut self, event: TriggerEvent) -> bool {
        if self.contains(event) {
            return false;
        }
        self.0.push(event);
        true
    }

    pub fn remove(&mut self, event: TriggerEvent) -> bool {
        let before = self.0.len();
        self.0.retain(|e| *e != event);
        self.0.len() != before
    }

    /// Insert every event from `events`, deduplicating against the
    /// current members. Returns the events actually added.
    pub fn merge(&mut self, events: impl IntoIterator<Item = TriggerEvent>) -> Vec<TriggerEvent> {
        events.into_iter().filter(|e| self.insert(*e)).collect()
    }

    /// Remove every event in `events`; absent members are ignored.
    pub fn subtract(&mut self, events: impl IntoIterator<Item = TriggerEvent>) {
        for event in events {
            self.remove(event);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = TriggerEvent> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TriggerEvent> for EventSet {
    fn from_iter<I: IntoIterator<Item = TriggerEvent>>(iter: I) -> Self {
        let mut set = Self::new();
        for event in iter {
            set.insert(event);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_tokens_resolve() {
        assert_eq!(
            TriggerEvent::from_token("entermsg"),
            Some(TriggerEvent::EnterMessage)
        );
        assert_eq!(TriggerEvent::from_token("kill"), Some(TriggerEvent::Kill));
    }

    #[test]
    fn aliases_resolve_to_the_same_event() {
        assert_eq!(
            TriggerEvent::from_token("entermessage"),
            Some(TriggerEvent::EnterMessage)
        );
        assert_eq!(
            TriggerEvent::from_token("tempperm"),
            Some(TriggerEvent::TempPermission)
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            TriggerEvent::from_token("  EnterMSG "),
            Some(TriggerEvent::EnterMessage)
        );
        assert_eq!(
            TriggerEvent::from_token("GODMODE"),
            Some(TriggerEvent::Godmode)
        );
    }

    #[test]
    fn none_and_blank_are_never_events() {
        assert_eq!(TriggerEvent::from_token("none"), None);
        assert_eq!(TriggerEvent::from_token("NONE"), None);
        assert_eq!(TriggerEvent::from_token("   "), None);
        assert_eq!(TriggerEvent::from_token(""), None);
        assert!(!TriggerEvent::is_known_token("none"));
    }

    #[test]
    fn every_event_appears_in_the_table_once() {
        for event in TriggerEvent::all() {
            assert_eq!(
                EVENT_TABLE.iter().filter(|s| s.event == event).count(),
                1,
                "{event} must have exactly one table row"
            );
        }
    }

    #[test]
    fn tokens_and_aliases_are_unique_across_the_table() {
        let mut seen = std::collections::HashSet::new();
        for spec in EVENT_TABLE {
            assert!(seen.insert(spec.token), "duplicate token {}", spec.token);
            for alias in spec.aliases {
                assert!(seen.insert(alias), "duplicate alias {alias}");
            }
        }
    }

    #[test]
    fn validate_list_partitions_known_and_unknown() {
        let result = validate_list("entermsg,Bogus,KILL,wat");
        assert_eq!(
            result.valid,
            vec![TriggerEvent::EnterMessage, TriggerEvent::Kill]
        );
        assert_eq!(result.invalid, vec!["bogus".to_string(), "wat".to_string()]);
    }

    #[test]
    fn validate_list_drops_blanks_and_none_silently() {
        let result = validate_list(" , none ,, entermsg ,");
        assert_eq!(result.valid, vec![TriggerEvent::EnterMessage]);
        assert!(result.invalid.is_empty());
    }

    #[test]
    fn validate_list_of_empty_input_is_empty() {
        assert!(validate_list("").is_empty());
        assert!(validate_list("  ").is_empty());
        assert!(validate_list("none").is_empty());
    }

    #[test]
    fn validate_list_keeps_duplicates() {
        // Deduplication is the merge's job, not the validator's.
        let result = validate_list("kill,kill");
        assert_eq!(result.valid, vec![TriggerEvent::Kill, TriggerEvent::Kill]);
    }

    #[test]
    fn event_set_encodes_empty_as_none() {
        let set = EventSet::new();
        assert_eq!(set.encode(), "none");
        assert!(EventSet::decode("none").is_empty());
        assert!(EventSet::decode("").is_empty());
    }

    #[test]
    fn event_set_round_trips_in_insertion_order() {
        let mut set = EventSet::new();
        set.insert(TriggerEvent::Kill);
        set.insert(TriggerEvent::EnterMessage);
        assert_eq!(set.encode(), "kill,entermsg");
        assert_eq!(EventSet::decode("kill,entermsg"), set);
    }

    #[test]
    fn event_set_insert_rejects_duplicates() {
        let mut set = EventSet::new();
        assert!(set.insert(TriggerEvent::Kill));
        assert!(!set.insert(TriggerEvent::Kill));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn event_set_merge_reports_newly_added() {
        let mut set = EventSet::decode("entermsg");
        let added = set.merge([
            TriggerEvent::EnterMessage,
            TriggerEvent::Kill,
            TriggerEvent::Kill,
        ]);
        assert_eq!(added, vec![TriggerEvent::Kill]);
        assert_eq!(set.encode(), "entermsg,kill");
    }

    #[test]
    fn event_set_decode_skips_unknown_tokens() {
        let set = EventSet::decode("entermsg,notathing,kill");
        assert_eq!(set.encode(), "entermsg,kill");
    }
}
