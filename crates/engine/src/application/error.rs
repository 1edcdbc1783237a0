//! Unified error type for trigger store operations
//!
//! Distinguishes caller mistakes (validation, unknown region, membership
//! conflicts) from store-consistency faults so command adapters can
//! branch on kind instead of matching message strings.

use thiserror::Error;

use crate::application::ports::outbound::RepositoryError;

/// Error returned by every trigger store operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    /// The host has no region by that name, or the region has no record
    #[error("no region named '{name}' is configured")]
    RegionNotFound { name: String },

    /// Create was called for a region that already has a record
    #[error("region '{name}' already has trigger configuration")]
    AlreadyConfigured { name: String },

    /// The event list was empty, `none`, or contained no known token
    #[error("invalid event list: {0}")]
    InvalidEventList(String),

    /// The temp-group name does not resolve to a host group
    #[error("no group named '{name}' exists")]
    GroupNotFound { name: String },

    /// Add of an entry that is already in the ban set
    #[error("'{entry}' is already banned in this region")]
    AlreadyBanned { entry: String },

    /// Remove of an entry that is not in the ban set
    #[error("'{entry}' is not banned in this region")]
    NotBanned { entry: String },

    /// Argument validation failed
    #[error("validation failed: {0}")]
    Validation(String),

    /// The backing store rejected or lost the write
    #[error(transparent)]
    Store(#[from] RepositoryError),
}

impl TriggerError {
    pub fn region_not_found(name: impl Into<String>) -> Self {
        Self::RegionNotFound { name: name.into() }
    }

    pub fn already_configured(name: impl Into<String>) -> Self {
        Self::AlreadyConfigured { name: name.into() }
    }

    pub fn group_not_found(name: impl Into<String>) -> Self {
        Self::GroupNotFound { name: name.into() }
    }

    pub fn already_banned(entry: impl Into<String>) -> Self {
        Self::AlreadyBanned {
            entry: entry.into(),
        }
    }

    pub fn not_banned(entry: impl Into<String>) -> Self {
        Self::NotBanned {
            entry: entry.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_kind() {
        let err: TriggerError = RepositoryError::NoRowsAffected.into();
        assert!(matches!(
            err,
            TriggerError::Store(RepositoryError::NoRowsAffected)
        ));
        assert_eq!(err.to_string(), "database error: no affected rows");
    }

    #[test]
    fn membership_errors_name_the_entry() {
        let err = TriggerError::already_banned("tile 10");
        assert_eq!(err.to_string(), "'tile 10' is already banned in this region");
    }
}
