//! services/client/src/flows/guard.rs
//!
//! Refuses a second action on a target while the first is still in flight.

use pairpad_core::domain::RecordId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Default)]
pub struct ActionGuard {
    in_flight: Arc<Mutex<HashSet<RecordId>>>,
}

/// Holds a target until dropped.
#[derive(Debug)]
pub struct InFlight {
    target: RecordId,
    in_flight: Arc<Mutex<HashSet<RecordId>>>,
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `target`, or returns `None` when an action on it is already running.
    pub fn try_begin(&self, target: RecordId) -> Option<InFlight> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if !in_flight.insert(target) {
            return None;
        }
        Some(InFlight {
            target,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_busy(&self, target: RecordId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&target)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_target_is_refused_until_released() {
        let guard = ActionGuard::new();
        let first = guard.try_begin(RecordId(4)).unwrap();
        assert!(guard.try_begin(RecordId(4)).is_none());
        assert!(guard.is_busy(RecordId(4)));

        drop(first);
        assert!(!guard.is_busy(RecordId(4)));
        assert!(guard.try_begin(RecordId(4)).is_some());
    }

    #[test]
    fn different_targets_proceed_together() {
        let guard = ActionGuard::new();
        let _a = guard.try_begin(RecordId(1)).unwrap();
        assert!(guard.try_begin(RecordId(2)).is_some());
    }
}
