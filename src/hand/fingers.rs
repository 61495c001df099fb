//! Finger-extension classification and palm orientation.
//!
//! Extension is decided by the cosine of the joint angle at a finger's PIP joint (the IP joint
//! for the thumb), between the joint→tip and joint→knuckle vectors. A straight finger puts tip
//! and knuckle in roughly opposite directions from the joint, cosine near -1; a curled finger
//! folds the tip back towards the knuckle, cosine near 0 or positive. Unlike the tip-above-
//! knuckle test in [`upright_count`], this stays correct when the hand is rotated in the image
//! plane.

use nalgebra::Vector3;

use super::landmark::{Hand, InvalidLandmarkCount, Landmark, LandmarkIdx, FINGERTIPS};

/// Joint-angle cosine below which a finger counts as extended (joint angle over ~120°).
///
/// Tuned to separate "clearly folded" from "clearly extended" with margin for tracking jitter,
/// not to detect perfect straightness.
pub const EXTENDED_COS_THRESHOLD: f32 = -0.5;

/// Vector magnitudes below this are treated as degenerate geometry.
const MIN_MAGNITUDE: f32 = 1e-6;

/// One of the five fingers, in anatomical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb = 0,
    Index = 1,
    Middle = 2,
    Ring = 3,
    Pinky = 4,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// The (knuckle, joint, tip) landmark triple whose joint angle decides extension.
    fn joint_chain(self) -> (LandmarkIdx, LandmarkIdx, LandmarkIdx) {
        use LandmarkIdx::*;
        match self {
            Finger::Thumb => (ThumbMcp, ThumbIp, ThumbTip),
            Finger::Index => (IndexFingerMcp, IndexFingerPip, IndexFingerTip),
            Finger::Middle => (MiddleFingerMcp, MiddleFingerPip, MiddleFingerTip),
            Finger::Ring => (RingFingerMcp, RingFingerPip, RingFingerTip),
            Finger::Pinky => (PinkyMcp, PinkyPip, PinkyTip),
        }
    }
}

/// Fingers serialize as their index (0 = thumb … 4 = pinky), the shape the HTTP surface expects.
impl serde::Serialize for Finger {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// Which fingers are extended and whether the palm faces the camera.
///
/// Derived purely from a [`Hand`]; no hidden state, recomputed from scratch every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationResult {
    extended: [bool; 5],
    palm_facing_camera: bool,
}

impl ClassificationResult {
    /// Returns whether `finger` was classified as extended.
    #[inline]
    pub fn is_extended(&self, finger: Finger) -> bool {
        self.extended[finger as usize]
    }

    /// Iterates over the extended fingers, thumb first.
    pub fn extended_fingers(&self) -> impl Iterator<Item = Finger> + '_ {
        Finger::ALL
            .into_iter()
            .filter(|finger| self.extended[*finger as usize])
    }

    /// Number of extended fingers. Always equal to the size of [`extended_fingers`].
    ///
    /// [`extended_fingers`]: Self::extended_fingers
    pub fn extended_count(&self) -> u8 {
        self.extended.iter().filter(|extended| **extended).count() as u8
    }

    /// Whether the palm (rather than the back of the hand) faces the observing camera.
    #[inline]
    pub fn palm_facing_camera(&self) -> bool {
        self.palm_facing_camera
    }
}

#[inline]
fn vec3(landmark: Landmark) -> Vector3<f32> {
    Vector3::new(landmark.x, landmark.y, landmark.z)
}

/// Cosine of the angle between two vectors.
///
/// Defined as `1.0` when either vector is (near) zero-length, so that degenerate geometry
/// classifies as "not extended" instead of dividing by zero.
fn cos_angle(v1: Vector3<f32>, v2: Vector3<f32>) -> f32 {
    let (m1, m2) = (v1.norm(), v2.norm());
    if m1 < MIN_MAGNITUDE || m2 < MIN_MAGNITUDE {
        return 1.0;
    }
    v1.dot(&v2) / (m1 * m2)
}

fn is_extended(hand: &Hand, finger: Finger) -> bool {
    let (knuckle, joint, tip) = finger.joint_chain();
    let joint = vec3(hand.landmark(joint));
    let to_tip = vec3(hand.landmark(tip)) - joint;
    let to_knuckle = vec3(hand.landmark(knuckle)) - joint;
    cos_angle(to_tip, to_knuckle) < EXTENDED_COS_THRESHOLD
}

/// Heuristic palm orientation.
///
/// The cross product of wrist→index-MCP and wrist→pinky-MCP approximates the palm normal; its
/// z-component being negative means the palm points at the camera. Independently, the fingertips
/// being on average closer to the camera than the wrist also suggests a facing palm. Either
/// signal alone is sufficient, which over-triggers "facing" near 90° profile poses; the OR is
/// inherited tuning and deliberately kept (see DESIGN.md).
fn palm_facing_camera(hand: &Hand) -> bool {
    use LandmarkIdx::*;

    let wrist = vec3(hand.landmark(Wrist));
    let to_index = vec3(hand.landmark(IndexFingerMcp)) - wrist;
    let to_pinky = vec3(hand.landmark(PinkyMcp)) - wrist;
    let normal = to_index.cross(&to_pinky);

    let mean_tip_z = FINGERTIPS
        .iter()
        .map(|&tip| hand.landmark(tip).z)
        .sum::<f32>()
        / FINGERTIPS.len() as f32;

    normal.z < 0.0 || mean_tip_z < wrist.z
}

/// Classifies which fingers of `hand` are extended and whether its palm faces the camera.
///
/// Pure and stateless; identical input always produces identical output.
pub fn classify(hand: &Hand) -> ClassificationResult {
    let mut extended = [false; 5];
    for finger in Finger::ALL {
        extended[finger as usize] = is_extended(hand, finger);
    }

    ClassificationResult {
        extended,
        palm_facing_camera: palm_facing_camera(hand),
    }
}

/// Validating entry point for callers holding a raw landmark list.
///
/// Fails without producing a partial result when the list does not contain exactly 21 landmarks.
pub fn classify_landmarks(
    landmarks: &[Landmark],
) -> Result<ClassificationResult, InvalidLandmarkCount> {
    Ok(classify(&Hand::from_slice(landmarks)?))
}

/// The simpler finger count of the desktop game variant: the thumb counts when its tip is to the
/// right of the IP joint, other fingers when their tip is above the PIP joint.
///
/// Cheap, but only valid for an upright right hand; [`classify`] is the rotation-invariant test.
pub fn upright_count(hand: &Hand) -> u8 {
    use LandmarkIdx::*;

    let mut count = 0;
    if hand.landmark(ThumbTip).x > hand.landmark(ThumbIp).x {
        count += 1;
    }
    let chains = [
        (IndexFingerTip, IndexFingerPip),
        (MiddleFingerTip, MiddleFingerPip),
        (RingFingerTip, RingFingerPip),
        (PinkyTip, PinkyPip),
    ];
    for (tip, pip) in chains {
        if hand.landmark(tip).y < hand.landmark(pip).y {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::hand::poses;

    use super::*;

    #[test]
    fn open_palm_extends_all_fingers() {
        let result = classify(&poses::open_palm());
        assert_eq!(result.extended_count(), 5);
        assert_eq!(result.extended_fingers().collect::<Vec<_>>(), Finger::ALL);
        assert!(result.palm_facing_camera());
    }

    #[test]
    fn fist_extends_nothing() {
        let result = classify(&poses::fist());
        assert_eq!(result.extended_count(), 0);
        assert_eq!(result.extended_fingers().count(), 0);
        for finger in Finger::ALL {
            assert!(!result.is_extended(finger), "{finger:?} wrongly extended");
        }
    }

    #[test]
    fn one_gesture_extends_only_the_index() {
        let result = classify(&poses::pointing_index());
        assert_eq!(result.extended_count(), 1);
        assert_eq!(
            result.extended_fingers().collect::<Vec<_>>(),
            [Finger::Index]
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let hand = poses::open_palm();
        assert_eq!(classify(&hand), classify(&hand));
        assert_eq!(classify(&poses::fist()), classify(&poses::fist()));
    }

    #[test]
    fn coincident_landmarks_do_not_panic() {
        use LandmarkIdx::*;

        // Collapse the middle fingertip onto its PIP joint. The zero-length joint→tip vector
        // must classify the middle finger as not extended instead of dividing by zero.
        let mut landmarks = poses::open_palm_landmarks();
        landmarks[MiddleFingerTip as usize] = landmarks[MiddleFingerPip as usize];

        let result = classify_landmarks(&landmarks).unwrap();
        assert!(!result.is_extended(Finger::Middle));
        assert_eq!(result.extended_count(), 4);
    }

    #[test]
    fn palm_flips_away_when_depth_reverses() {
        let facing = poses::open_palm();
        let away = poses::depth_flipped(&facing);

        assert!(classify(&facing).palm_facing_camera());
        let flipped = classify(&away);
        assert!(!flipped.palm_facing_camera());
        // The finger pose itself is unaffected by mirroring the depth axis.
        assert_eq!(flipped.extended_count(), 5);
    }

    #[test]
    fn palm_normal_alone_decides_orientation() {
        // Flatten depth so no fingertip is closer to the camera than the wrist, leaving the
        // cross-product palm normal as the only orientation signal.
        let flat = |landmarks: Vec<Landmark>| {
            let landmarks = landmarks
                .into_iter()
                .map(|lm| Landmark::new(lm.x, lm.y, 0.0))
                .collect();
            Hand::new(landmarks).unwrap()
        };

        // The open-palm fixture has its knuckles ordered so the normal points away (z > 0).
        let away = flat(poses::open_palm_landmarks());
        assert!(!classify(&away).palm_facing_camera());

        // Mirroring x flips the normal's z sign, turning the palm towards the camera.
        let mirrored = poses::open_palm_landmarks()
            .into_iter()
            .map(|lm| Landmark::new(1.0 - lm.x, lm.y, lm.z))
            .collect();
        let facing = flat(mirrored);
        assert!(classify(&facing).palm_facing_camera());
    }

    #[test]
    fn wrong_landmark_count_is_rejected() {
        let landmarks = poses::open_palm_landmarks();
        assert_eq!(
            classify_landmarks(&landmarks[..20]),
            Err(InvalidLandmarkCount(20))
        );

        let mut too_many = landmarks;
        too_many.push(Landmark::default());
        assert_eq!(
            classify_landmarks(&too_many),
            Err(InvalidLandmarkCount(22))
        );
    }

    #[test]
    fn degenerate_cosine_is_one() {
        let zero = Vector3::zeros();
        let unit = Vector3::x();
        assert_relative_eq!(cos_angle(zero, unit), 1.0);
        assert_relative_eq!(cos_angle(unit, zero), 1.0);
        assert_relative_eq!(cos_angle(unit, -unit), -1.0);
        assert_relative_eq!(cos_angle(unit, Vector3::y()), 0.0);
    }

    #[test]
    fn upright_count_matches_on_upright_poses() {
        assert_eq!(upright_count(&poses::open_palm()), 5);
        assert_eq!(upright_count(&poses::fist()), 0);
        assert_eq!(upright_count(&poses::pointing_index()), 1);
    }
}
