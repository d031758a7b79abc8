//! Hand gesture classification.
//!
//! An ordered decision list over the extracted hand features. Handedness
//! only affects the thumbs-up direction test; every other rule is
//! handedness-invariant.

use serde::{Deserialize, Serialize};

use crate::features::HandFeatures;
use crate::types::{Gesture, Handedness};

// Calibration constants inherited from the source material, in normalized
// coordinate units.
pub const OK_PINCH_DISTANCE: f32 = 0.05;
pub const HEART_PINCH_MIN: f32 = 0.1;
pub const HEART_PINCH_MAX: f32 = 0.25;

/// Gesture thresholds, overridable via config.json.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    pub ok_pinch_distance: f32,
    pub heart_pinch_min: f32,
    pub heart_pinch_max: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            ok_pinch_distance: OK_PINCH_DISTANCE,
            heart_pinch_min: HEART_PINCH_MIN,
            heart_pinch_max: HEART_PINCH_MAX,
        }
    }
}

/// Pure function: identical features and handedness always yield the
/// identical label.
pub fn classify_gesture(
    f: &HandFeatures,
    handedness: Handedness,
    t: &GestureThresholds,
) -> Option<Gesture> {
    // 1. OK: thumb and index pinched into a circle, other fingers up.
    if f.thumb_index_distance < t.ok_pinch_distance
        && f.middle_extended
        && f.ring_extended
        && f.pinky_extended
    {
        return Some(Gesture::Ok);
    }

    // 2. Like: thumb up and pointing away from the body center, fingers
    // curled. The x sign flips with handedness.
    let thumb_points_out = match handedness {
        Handedness::Right => f.thumb_direction < 0.0,
        Handedness::Left => f.thumb_direction > 0.0,
    };
    let fingers_curled =
        !f.index_extended && !f.middle_extended && !f.ring_extended && !f.pinky_extended;
    if thumb_points_out && f.thumb_extended && fingers_curled {
        return Some(Gesture::Like);
    }

    // 3. Heart: thumb and index up at heart-forming distance, rest curled.
    if f.thumb_extended
        && f.index_extended
        && !f.middle_extended
        && !f.ring_extended
        && !f.pinky_extended
        && f.thumb_index_distance > t.heart_pinch_min
        && f.thumb_index_distance < t.heart_pinch_max
    {
        return Some(Gesture::Heart);
    }

    // 4. I love you: thumb, index and pinky up, middle and ring curled.
    if f.thumb_extended
        && f.index_extended
        && !f.middle_extended
        && !f.ring_extended
        && f.pinky_extended
    {
        return Some(Gesture::ILoveYou);
    }

    None
}
