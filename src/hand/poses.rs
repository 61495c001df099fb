//! Synthetic hand poses for demos and tests.
//!
//! Coordinates follow the landmark convention: normalized x/y with y growing downwards and
//! negative z towards the camera. All poses describe an upright right hand with the wrist near
//! the bottom of the image and the palm towards the camera.

use super::landmark::{Hand, Landmark};

fn lm(x: f32, y: f32, z: f32) -> Landmark {
    Landmark::new(x, y, z)
}

/// Fully open hand, fingers splayed, palm towards the camera.
pub fn open_palm() -> Hand {
    Hand::new(open_palm_landmarks()).unwrap()
}

/// Landmark list of [`open_palm`], for callers that feed raw landmarks.
pub fn open_palm_landmarks() -> Vec<Landmark> {
    vec![
        // wrist
        lm(0.50, 0.80, 0.00),
        // thumb: CMC, MCP, IP, TIP
        lm(0.58, 0.72, -0.01),
        lm(0.64, 0.62, -0.02),
        lm(0.68, 0.55, -0.03),
        lm(0.73, 0.48, -0.05),
        // index: MCP, PIP, DIP, TIP
        lm(0.42, 0.55, -0.02),
        lm(0.42, 0.45, 0.00),
        lm(0.42, 0.35, -0.02),
        lm(0.42, 0.25, -0.05),
        // middle
        lm(0.48, 0.54, -0.02),
        lm(0.48, 0.44, 0.00),
        lm(0.48, 0.33, -0.02),
        lm(0.48, 0.22, -0.05),
        // ring
        lm(0.54, 0.55, -0.02),
        lm(0.54, 0.45, 0.00),
        lm(0.54, 0.35, -0.02),
        lm(0.54, 0.25, -0.05),
        // pinky
        lm(0.60, 0.57, -0.02),
        lm(0.60, 0.49, 0.00),
        lm(0.60, 0.42, -0.02),
        lm(0.60, 0.35, -0.05),
    ]
}

/// Closed fist: all fingers curled back towards the palm, thumb folded across.
pub fn fist() -> Hand {
    Hand::new(fist_landmarks()).unwrap()
}

/// Landmark list of [`fist`].
pub fn fist_landmarks() -> Vec<Landmark> {
    vec![
        // wrist
        lm(0.50, 0.80, 0.00),
        // thumb folded back towards its knuckle
        lm(0.57, 0.73, -0.01),
        lm(0.63, 0.66, -0.02),
        lm(0.67, 0.60, -0.03),
        lm(0.63, 0.63, -0.06),
        // index, tip curled down past the PIP joint
        lm(0.42, 0.55, -0.02),
        lm(0.42, 0.46, -0.04),
        lm(0.43, 0.50, -0.07),
        lm(0.43, 0.56, -0.07),
        // middle
        lm(0.48, 0.54, -0.02),
        lm(0.48, 0.45, -0.04),
        lm(0.49, 0.49, -0.07),
        lm(0.49, 0.55, -0.07),
        // ring
        lm(0.54, 0.55, -0.02),
        lm(0.54, 0.46, -0.04),
        lm(0.55, 0.50, -0.07),
        lm(0.55, 0.56, -0.07),
        // pinky
        lm(0.60, 0.57, -0.02),
        lm(0.60, 0.50, -0.04),
        lm(0.61, 0.53, -0.07),
        lm(0.61, 0.58, -0.07),
    ]
}

/// "One" gesture: index extended, everything else curled.
pub fn pointing_index() -> Hand {
    Hand::new(pointing_index_landmarks()).unwrap()
}

/// Landmark list of [`pointing_index`].
pub fn pointing_index_landmarks() -> Vec<Landmark> {
    let mut landmarks = fist_landmarks();
    // Straighten the index chain (MCP, PIP, DIP, TIP).
    landmarks[5] = lm(0.42, 0.55, -0.02);
    landmarks[6] = lm(0.42, 0.45, 0.00);
    landmarks[7] = lm(0.42, 0.35, -0.02);
    landmarks[8] = lm(0.42, 0.25, -0.05);
    landmarks
}

/// Mirrors `hand` depth-wise, turning the back of the hand towards the camera while keeping the
/// image-plane finger pose.
pub fn depth_flipped(hand: &Hand) -> Hand {
    let landmarks = hand
        .landmarks()
        .iter()
        .map(|lm| Landmark::new(lm.x, lm.y, -lm.z))
        .collect();
    Hand::new(landmarks).unwrap()
}
