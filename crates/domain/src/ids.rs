use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Surrogate key assigned by the backing store
define_id!(TriggerId);

// Host-owned identifiers
define_id!(RegionId);
define_id!(WorldId);

impl TriggerId {
    /// Sentinel for a record that has not been persisted yet.
    pub const UNSAVED: TriggerId = TriggerId(-1);

    pub const fn is_saved(self) -> bool {
        self.0 >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsaved_sentinel_is_not_saved() {
        assert!(!TriggerId::UNSAVED.is_saved());
        assert!(TriggerId::new(0).is_saved());
        assert!(TriggerId::new(42).is_saved());
    }

    #[test]
    fn ids_round_trip_through_i64() {
        let id = RegionId::new(7);
        assert_eq!(i64::from(id), 7);
        assert_eq!(RegionId::from(7), id);
        assert_eq!(id.to_string(), "7");
    }
}
