use std::sync::Arc;

use yubi::detector::{DetectError, HandDetector, ScriptedDetector};
use yubi::hand::fingers::Finger;
use yubi::hand::landmark::Landmark;
use yubi::hand::poses;
use yubi::pipeline;
use yubi::snapshot::SnapshotCell;
use yubi::source::Frame;

fn frame(seq: u64) -> Frame {
    Frame {
        width: 1280,
        height: 720,
        seq,
    }
}

#[test]
fn scripted_frames_turn_into_snapshots() {
    let mut detector = ScriptedDetector::new(vec![
        vec![poses::open_palm_landmarks()],
        vec![],
        vec![poses::fist_landmarks(), poses::pointing_index_landmarks()],
    ]);

    let snapshot = pipeline::process_frame(&mut detector, &frame(0)).unwrap();
    assert_eq!(snapshot.finger_count, 5);
    assert_eq!(snapshot.extended_fingers.len(), 5);
    assert!(snapshot.palm_facing);
    assert_eq!(snapshot.frame, 0);

    let snapshot = pipeline::process_frame(&mut detector, &frame(1)).unwrap();
    assert_eq!(snapshot.finger_count, 0);
    assert!(snapshot.extended_fingers.is_empty());
    assert!(!snapshot.palm_facing);

    // Two hands: counts sum, the finger set and palm flag of the last hand win.
    let snapshot = pipeline::process_frame(&mut detector, &frame(2)).unwrap();
    assert_eq!(snapshot.finger_count, 1);
    assert_eq!(snapshot.extended_fingers, vec![Finger::Index]);
}

#[test]
fn malformed_hands_are_skipped() {
    let mut detector = ScriptedDetector::new(vec![vec![
        vec![Landmark::default(); 7],
        poses::open_palm_landmarks(),
    ]]);

    let snapshot = pipeline::process_frame(&mut detector, &frame(0)).unwrap();
    assert_eq!(snapshot.finger_count, 5);
}

#[test]
fn classifier_worker_publishes_results() {
    let cell = Arc::new(SnapshotCell::new());
    assert!(cell.latest().is_none());

    let detector = ScriptedDetector::new(vec![vec![poses::open_palm_landmarks()]]);
    let mut worker = pipeline::classifier_worker(detector, cell.clone()).unwrap();
    worker.send(frame(7));
    // Dropping joins the worker, guaranteeing the frame was processed.
    drop(worker);

    let snapshot = cell.latest().expect("snapshot published");
    assert_eq!(snapshot.finger_count, 5);
    assert_eq!(snapshot.frame, 7);
}

struct BrokenDetector;

impl HandDetector for BrokenDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Vec<Landmark>>, DetectError> {
        Err(DetectError::new("sensor offline"))
    }
}

#[test]
fn detector_failures_skip_the_frame() {
    let cell = Arc::new(SnapshotCell::new());
    let mut worker = pipeline::classifier_worker(BrokenDetector, cell.clone()).unwrap();
    worker.send(frame(0));
    drop(worker);

    // Nothing published; readers would keep serving their last known-good result.
    assert!(cell.latest().is_none());
}
