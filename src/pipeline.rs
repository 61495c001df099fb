//! The frame processing pipeline: capture → detect → classify → publish.
//!
//! Every stage reports failure through its own error type and the driving loop decides what to
//! do with it: capture failures are retried after a short delay, detection failures skip the
//! frame, and a malformed hand is skipped individually. Readers are never affected; they keep
//! serving the last published snapshot.

use std::{io, sync::Arc, thread, time::Duration};

use crate::{
    detector::{DetectError, HandDetector},
    hand::{fingers, landmark::Hand},
    snapshot::{FingerSnapshot, SnapshotCell},
    source::{Frame, FrameSource},
    timer::{FpsCounter, Timer},
    worker::Worker,
};

/// Delay before retrying after a failed capture.
pub const CAPTURE_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Runs detection and classification for one frame.
///
/// Hands whose landmark list violates the 21-point contract are logged and skipped without
/// producing a partial result. Counts are summed across the detected hands; the extended-finger
/// set and palm flag of the last classified hand win. A frame with no hands still yields a
/// (zeroed) snapshot.
pub fn process_frame<D: HandDetector>(
    detector: &mut D,
    frame: &Frame,
) -> Result<FingerSnapshot, DetectError> {
    let raw_hands = detector.detect(frame)?;

    let mut snapshot = FingerSnapshot::empty(frame.seq);
    for (i, landmarks) in raw_hands.iter().enumerate() {
        let hand = match Hand::from_slice(landmarks) {
            Ok(hand) => hand,
            Err(e) => {
                log::warn!("frame {}: skipping hand {i}: {e}", frame.seq);
                continue;
            }
        };

        let result = fingers::classify(&hand);
        snapshot.finger_count += u32::from(result.extended_count());
        snapshot.extended_fingers = result.extended_fingers().collect();
        snapshot.palm_facing = result.palm_facing_camera();
    }
    Ok(snapshot)
}

/// Spawns the worker thread that detects, classifies and publishes incoming frames.
pub fn classifier_worker<D>(mut detector: D, cell: Arc<SnapshotCell>) -> io::Result<Worker<Frame>>
where
    D: HandDetector + Send + 'static,
{
    let mut fps = FpsCounter::new("classifier");
    let mut t_process = Timer::new("process");

    Worker::builder().name("classifier").spawn(move |frame: Frame| {
        let guard = t_process.start();
        match process_frame(&mut detector, &frame) {
            Ok(snapshot) => cell.publish(snapshot),
            Err(e) => log::warn!("frame {}: {e}; skipping frame", frame.seq),
        }
        drop(guard);
        fps.tick_with([&t_process]);
    })
}

/// Feeds frames from `source` into the classifier worker, forever.
///
/// Capture failures are logged and retried after [`CAPTURE_RETRY_DELAY`]; they never propagate
/// to readers.
pub fn capture_loop<S: FrameSource>(mut source: S, mut worker: Worker<Frame>) -> ! {
    let mut fps = FpsCounter::new("capture");
    loop {
        match source.capture() {
            Ok(frame) => {
                worker.send(frame);
                fps.tick();
            }
            Err(e) => {
                log::warn!("{e}; retrying");
                thread::sleep(CAPTURE_RETRY_DELAY);
            }
        }
    }
}
