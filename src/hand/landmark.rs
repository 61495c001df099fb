//! The 21-point hand landmark skeleton.

use serde::{Deserialize, Serialize};

/// Number of landmarks that make up a [`Hand`].
pub const LANDMARK_COUNT: usize = 21;

/// A single 3D keypoint on a tracked hand, as produced by the external pose estimator.
///
/// `x` and `y` are normalized image coordinates in `[0, 1]`, origin in the top-left corner, `y`
/// increasing downwards. `z` is a relative depth; more negative values are closer to the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// The ordered 21-landmark skeleton of one detected hand.
///
/// Landmark order follows the usual anatomical convention (see [`LandmarkIdx`]). A `Hand` always
/// contains exactly [`LANDMARK_COUNT`] landmarks; the count is validated on construction, so the
/// classifier never has to.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
}

/// Error returned when a landmark list of the wrong length is turned into a [`Hand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected 21 hand landmarks, got {0}")]
pub struct InvalidLandmarkCount(pub usize);

impl Hand {
    /// Creates a `Hand` from a landmark list, validating the landmark count.
    ///
    /// No partial value is produced on failure.
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, InvalidLandmarkCount> {
        Self::from_slice(&landmarks)
    }

    /// Like [`Hand::new`], but copies out of a borrowed slice.
    pub fn from_slice(landmarks: &[Landmark]) -> Result<Self, InvalidLandmarkCount> {
        let landmarks = landmarks
            .try_into()
            .map_err(|_| InvalidLandmarkCount(landmarks.len()))?;
        Ok(Self { landmarks })
    }

    /// Returns the landmark at `index`.
    #[inline]
    pub fn landmark(&self, index: LandmarkIdx) -> Landmark {
        self.landmarks[index as usize]
    }

    #[inline]
    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }
}

/// Names for the hand pose landmarks.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

/// The five fingertip landmarks, thumb first.
pub const FINGERTIPS: &[LandmarkIdx] = {
    use LandmarkIdx::*;
    &[ThumbTip, IndexFingerTip, MiddleFingerTip, RingFingerTip, PinkyTip]
};
