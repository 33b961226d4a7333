//! Marker contracts for state snapshots and actions

use crate::StoreError;
use std::fmt::Debug;

/// An immutable snapshot of everything a store tracks.
///
/// A store never mutates a snapshot in place: reducers receive a copy and
/// return the replacement.
pub trait State: Clone + Send + Sync + 'static {
    /// Check the invariants of this snapshot.
    ///
    /// Called once when a store is constructed; a violation rejects the
    /// construction instead of repairing the state.
    fn validate(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A fully specified description of one intended state transition.
///
/// Actions carry data only.
pub trait Action: Clone + Debug + Send + Sync + 'static {}
