//! Publication of the latest classification result.
//!
//! The producer publishes an immutable snapshot into an atomically swappable cell; readers grab
//! the current `Arc` without taking a lock, so neither side ever blocks the other. Last write
//! wins and readers may observe a slightly stale value, which is accepted: freshness here is
//! best effort, not correctness critical.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::Serialize;

use crate::hand::fingers::Finger;

/// The latest finger count, in the shape served over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FingerSnapshot {
    /// Total extended fingers, summed across all hands in the frame.
    pub finger_count: u32,
    /// Extended fingers (serialized as indices, 0 = thumb … 4 = pinky) of the most recently
    /// classified hand.
    pub extended_fingers: Vec<Finger>,
    /// Palm orientation of the most recently classified hand.
    pub palm_facing: bool,
    /// Sequence number of the frame this was computed from.
    #[serde(skip)]
    pub frame: u64,
}

impl FingerSnapshot {
    /// Snapshot for a frame with no detected hands.
    pub fn empty(frame: u64) -> Self {
        Self {
            finger_count: 0,
            extended_fingers: Vec::new(),
            palm_facing: false,
            frame,
        }
    }
}

/// Single-slot broadcast register holding the most recent [`FingerSnapshot`].
#[derive(Default)]
pub struct SnapshotCell {
    inner: ArcSwapOption<FingerSnapshot>,
}

impl SnapshotCell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new snapshot, replacing the previous one.
    pub fn publish(&self, snapshot: FingerSnapshot) {
        self.inner.store(Some(Arc::new(snapshot)));
    }

    /// Returns the most recently published snapshot, or `None` before the first publish.
    pub fn latest(&self) -> Option<Arc<FingerSnapshot>> {
        self.inner.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_before_first_publish() {
        let cell = SnapshotCell::new();
        assert!(cell.latest().is_none());
    }

    #[test]
    fn last_write_wins() {
        let cell = SnapshotCell::new();
        cell.publish(FingerSnapshot::empty(1));
        cell.publish(FingerSnapshot {
            finger_count: 3,
            extended_fingers: vec![Finger::Index, Finger::Middle, Finger::Ring],
            palm_facing: true,
            frame: 2,
        });

        let latest = cell.latest().unwrap();
        assert_eq!(latest.frame, 2);
        assert_eq!(latest.finger_count, 3);
    }

    #[test]
    fn readers_keep_older_snapshots_alive() {
        let cell = SnapshotCell::new();
        cell.publish(FingerSnapshot::empty(1));
        let old = cell.latest().unwrap();
        cell.publish(FingerSnapshot::empty(2));
        // A reader holding the old Arc is unaffected by the swap.
        assert_eq!(old.frame, 1);
        assert_eq!(cell.latest().unwrap().frame, 2);
    }

    #[test]
    fn serializes_to_the_wire_shape() {
        let snapshot = FingerSnapshot {
            finger_count: 2,
            extended_fingers: vec![Finger::Thumb, Finger::Pinky],
            palm_facing: false,
            frame: 42,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "finger_count": 2,
                "extended_fingers": [0, 4],
                "palm_facing": false,
            })
        );
    }
}
