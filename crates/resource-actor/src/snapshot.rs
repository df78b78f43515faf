//! # Snapshots
//!
//! A [`Snapshot`] is where an actor keeps a durable copy of its whole collection.
//! The actor calls [`Snapshot::load`] once, before its loop starts, and
//! [`Snapshot::save`] after every mutation that succeeded in memory.

/// Boxed error returned by snapshot backends.
pub type SnapshotError = Box<dyn std::error::Error + Send + Sync>;

/// Durable storage for one actor's collection.
pub trait Snapshot<T>: Send + Sync {
    /// Returns the persisted entities in their stored order. An absent snapshot is an empty list.
    fn load(&self) -> Result<Vec<T>, SnapshotError>;

    /// Replaces the persisted collection with `items`.
    fn save(&self, items: &[&T]) -> Result<(), SnapshotError>;
}

/// A snapshot that never persists anything. The default for a fresh actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSnapshot;

impl<T> Snapshot<T> for NoSnapshot {
    fn load(&self) -> Result<Vec<T>, SnapshotError> {
        Ok(Vec::new())
    }

    fn save(&self, _items: &[&T]) -> Result<(), SnapshotError> {
        Ok(())
    }
}
