//! Frame acquisition.
//!
//! Camera access itself is a capture-backend concern; the pipeline only needs a [`FrameSource`]
//! it can pull frames from, one at a time, with capture failures reported per frame.

use std::thread;
use std::time::{Duration, Instant};

/// A captured camera frame.
///
/// The pixel payload stays with the capture backend; consumers here only need the dimensions and
/// a sequence number to attribute results to frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Monotonically increasing frame number assigned by the source.
    pub seq: u64,
}

/// Error returned by a failing [`FrameSource`].
#[derive(Debug, thiserror::Error)]
#[error("frame capture failed: {msg}")]
pub struct CaptureError {
    msg: String,
}

impl CaptureError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// A source of camera frames.
pub trait FrameSource {
    /// Captures the next frame, blocking until one is available.
    fn capture(&mut self) -> Result<Frame, CaptureError>;
}

/// Produces empty frames at a fixed rate, for running the stack without a camera.
pub struct SyntheticSource {
    width: u32,
    height: u32,
    interval: Duration,
    next_frame: Instant,
    seq: u64,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            interval: Duration::from_secs(1) / fps.max(1),
            next_frame: Instant::now(),
            seq: 0,
        }
    }
}

impl FrameSource for SyntheticSource {
    fn capture(&mut self) -> Result<Frame, CaptureError> {
        if let Some(wait) = self.next_frame.checked_duration_since(Instant::now()) {
            thread::sleep(wait);
        }
        self.next_frame += self.interval;

        let frame = Frame {
            width: self.width,
            height: self.height,
            seq: self.seq,
        };
        self.seq += 1;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_frames_are_numbered() {
        let mut source = SyntheticSource::new(1280, 720, 1000);
        let first = source.capture().unwrap();
        let second = source.capture().unwrap();
        assert_eq!(first.seq, 0);
        assert_eq!(second.seq, 1);
        assert_eq!(first.width, 1280);
        assert_eq!(first.height, 720);
    }
}
