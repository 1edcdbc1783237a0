//! Overlap resolution - Pick the authoritative region among overlapping ones
//!
//! When several configured regions contain a query point, only the one
//! with the highest z-order applies. On equal z the first-encountered
//! candidate wins; callers iterate the cache in load order, so the policy
//! is deterministic for a given cache state, and it is covered by tests
//! because it is observable.

use std::sync::Arc;

use regionward_domain::TriggerRecord;

/// Return the candidate with the greatest z, first-encountered winning
/// ties. Empty input yields None.
pub fn topmost(
    candidates: impl IntoIterator<Item = (Arc<TriggerRecord>, i32)>,
) -> Option<Arc<TriggerRecord>> {
    let mut best: Option<(Arc<TriggerRecord>, i32)> = None;
    for (record, z) in candidates {
        match best {
            Some((_, best_z)) if z <= best_z => {}
            _ => best = Some((record, z)),
        }
    }
    best.map(|(record, _)| record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use regionward_domain::RegionId;

    fn record(region: i64) -> Arc<TriggerRecord> {
        Arc::new(TriggerRecord::new(RegionId::new(region)))
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(topmost(Vec::new()).is_none());
    }

    #[test]
    fn highest_z_wins() {
        let picked = topmost(vec![(record(1), 1), (record(2), 5)]).map(|r| r.region_id);
        assert_eq!(picked, Some(RegionId::new(2)));
    }

    #[test]
    fn first_of_equal_z_wins_deterministically() {
        let candidates = vec![(record(1), 3), (record(2), 7), (record(3), 7), (record(4), 1)];
        for _ in 0..10 {
            let picked = topmost(candidates.clone()).map(|r| r.region_id);
            assert_eq!(picked, Some(RegionId::new(2)));
        }
    }
}
