//! The hand landmark detection seam.
//!
//! The actual pose estimation model is an external black box that yields 21 3D keypoints per
//! detected hand. Pipelines receive the detector as an injected dependency instead of reaching
//! for a process-wide singleton, so tests and demos can substitute a scripted fake.

use crate::hand::landmark::Landmark;
use crate::source::Frame;

/// Produces raw landmark lists, one per hand detected in a frame.
///
/// Implementations are expected to return 21 landmarks per hand; consumers validate the count
/// when turning the raw list into a [`Hand`](crate::hand::landmark::Hand).
pub trait HandDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Vec<Landmark>>, DetectError>;
}

/// Error returned by a failing [`HandDetector`].
#[derive(Debug, thiserror::Error)]
#[error("hand detection failed: {msg}")]
pub struct DetectError {
    msg: String,
}

impl DetectError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// A deterministic fake detector cycling through scripted per-frame landmark sets.
pub struct ScriptedDetector {
    script: Vec<Vec<Vec<Landmark>>>,
    next: usize,
}

impl ScriptedDetector {
    /// Creates a detector that yields the entries of `script` in order, restarting from the
    /// beginning once the script runs out.
    pub fn new(script: Vec<Vec<Vec<Landmark>>>) -> Self {
        Self { script, next: 0 }
    }

    /// A looping demo script: open palm, "one" gesture, fist, empty frame.
    pub fn demo() -> Self {
        use crate::hand::poses;

        Self::new(vec![
            vec![poses::open_palm_landmarks()],
            vec![poses::pointing_index_landmarks()],
            vec![poses::fist_landmarks()],
            vec![],
        ])
    }
}

impl HandDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Vec<Landmark>>, DetectError> {
        if self.script.is_empty() {
            return Ok(Vec::new());
        }
        let hands = self.script[self.next].clone();
        self.next = (self.next + 1) % self.script.len();
        Ok(hands)
    }
}
