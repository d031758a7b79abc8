//! Scalar geometric features derived from raw keypoint sets.
//!
//! Extraction validates the set against the fixed schema and converts
//! normalized coordinates to pixel units where the thresholds are calibrated
//! in pixels. Hand features stay in normalized units, matching their
//! threshold calibration.

use crate::error::{DetectError, KeypointKind};
use crate::schema;
use crate::types::KeypointSet;

/// Geometric quantities the expression classifier reads. All values are in
/// pixel units of the source frame.
#[derive(Debug, Clone, Copy)]
pub struct FaceFeatures {
    /// Vertical lip gap over mouth width. The width is the signed inner
    /// corner difference, floored at one pixel so a collapsed or inverted
    /// mouth never divides by zero.
    pub mouth_aspect_ratio: f32,
    /// Left eyebrow middle point above the inter-eye baseline. Positive is
    /// raised (image y grows downward).
    pub left_eyebrow_raise: f32,
    pub right_eyebrow_raise: f32,
    /// Average y of the two outer mouth corners.
    pub mouth_corner_y: f32,
    pub lower_lip_y: f32,
}

impl FaceFeatures {
    pub fn extract(set: &KeypointSet, frame_w: u32, frame_h: u32) -> Result<Self, DetectError> {
        if set.len() != schema::FACE_POINT_COUNT {
            return Err(DetectError::ShapeMismatch {
                kind: KeypointKind::Face,
                expected: schema::FACE_POINT_COUNT,
                got: set.len(),
            });
        }

        let w = frame_w as f32;
        let h = frame_h as f32;
        let px = |i: usize| set[i].x * w;
        let py = |i: usize| set[i].y * h;

        let mouth_height = py(schema::LOWER_LIP) - py(schema::UPPER_LIP);
        let mouth_width = px(schema::MOUTH_INNER_LEFT) - px(schema::MOUTH_INNER_RIGHT);
        // Floor the denominator at one pixel rather than failing.
        let mouth_aspect_ratio = mouth_height / mouth_width.max(1.0);

        let brow_baseline = (py(schema::BROW_REF_UPPER) + py(schema::BROW_REF_LOWER)) / 2.0;
        let left_eyebrow_raise = brow_baseline - py(schema::LEFT_EYEBROW_MID);
        let right_eyebrow_raise = brow_baseline - py(schema::RIGHT_EYEBROW_MID);

        let mouth_corner_y =
            (py(schema::MOUTH_CORNER_LEFT) + py(schema::MOUTH_CORNER_RIGHT)) / 2.0;

        Ok(Self {
            mouth_aspect_ratio,
            left_eyebrow_raise,
            right_eyebrow_raise,
            mouth_corner_y,
            lower_lip_y: py(schema::LOWER_LIP),
        })
    }
}

/// Geometric quantities the gesture classifier reads, in normalized units.
#[derive(Debug, Clone, Copy)]
pub struct HandFeatures {
    /// 3D distance between thumb tip and index tip.
    pub thumb_index_distance: f32,
    /// Tip higher on screen than the digit's mid joint (IP for the thumb,
    /// PIP for the fingers).
    pub thumb_extended: bool,
    pub index_extended: bool,
    pub middle_extended: bool,
    pub ring_extended: bool,
    pub pinky_extended: bool,
    /// Thumb tip x minus wrist x. The sign test is mirrored per handedness.
    pub thumb_direction: f32,
}

impl HandFeatures {
    pub fn extract(set: &KeypointSet) -> Result<Self, DetectError> {
        if set.len() != schema::HAND_POINT_COUNT {
            return Err(DetectError::ShapeMismatch {
                kind: KeypointKind::Hand,
                expected: schema::HAND_POINT_COUNT,
                got: set.len(),
            });
        }

        let thumb = set[schema::THUMB_TIP];
        let index = set[schema::INDEX_TIP];
        let dx = thumb.x - index.x;
        let dy = thumb.y - index.y;
        let dz = thumb.z - index.z;
        let thumb_index_distance = (dx * dx + dy * dy + dz * dz).sqrt();

        let extended = |tip: usize, joint: usize| set[tip].y < set[joint].y;

        Ok(Self {
            thumb_index_distance,
            thumb_extended: extended(schema::THUMB_TIP, schema::THUMB_IP),
            index_extended: extended(schema::INDEX_TIP, schema::INDEX_PIP),
            middle_extended: extended(schema::MIDDLE_TIP, schema::MIDDLE_PIP),
            ring_extended: extended(schema::RING_TIP, schema::RING_PIP),
            pinky_extended: extended(schema::PINKY_TIP, schema::PINKY_PIP),
            thumb_direction: thumb.x - set[schema::WRIST].x,
        })
    }
}
