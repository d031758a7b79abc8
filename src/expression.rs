//! Facial expression classification.
//!
//! An ordered decision list over the extracted face features: the first rule
//! whose conditions hold produces the label, later rules never run. A frame
//! that satisfies both the smile and the surprise conditions is a smile.

use serde::{Deserialize, Serialize};

use crate::features::FaceFeatures;
use crate::types::Expression;

// Calibration constants inherited from the source material. Empirical, not
// validated against a broad population.
pub const SMILE_MOUTH_RATIO: f32 = 0.2;
pub const SURPRISE_EYEBROW_RAISE_PX: f32 = 25.0;
pub const SURPRISE_MOUTH_RATIO: f32 = 0.5;
pub const FROWN_EYEBROW_DROP_PX: f32 = -5.0;

/// Expression thresholds, overridable via config.json.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionThresholds {
    pub smile_mouth_ratio: f32,
    pub surprise_eyebrow_raise_px: f32,
    pub surprise_mouth_ratio: f32,
    pub frown_eyebrow_drop_px: f32,
}

impl Default for ExpressionThresholds {
    fn default() -> Self {
        Self {
            smile_mouth_ratio: SMILE_MOUTH_RATIO,
            surprise_eyebrow_raise_px: SURPRISE_EYEBROW_RAISE_PX,
            surprise_mouth_ratio: SURPRISE_MOUTH_RATIO,
            frown_eyebrow_drop_px: FROWN_EYEBROW_DROP_PX,
        }
    }
}

/// Pure function: identical features always yield the identical label.
pub fn classify_expression(f: &FaceFeatures, t: &ExpressionThresholds) -> Option<Expression> {
    // 1. Smile: open mouth with the corners curled above the lip baseline.
    if f.mouth_aspect_ratio > t.smile_mouth_ratio && f.mouth_corner_y < f.lower_lip_y {
        return Some(Expression::Smile);
    }

    // 2. Surprise: both eyebrows raised and the mouth wide open.
    if f.left_eyebrow_raise > t.surprise_eyebrow_raise_px
        && f.right_eyebrow_raise > t.surprise_eyebrow_raise_px
        && f.mouth_aspect_ratio > t.surprise_mouth_ratio
    {
        return Some(Expression::Surprise);
    }

    // 3. Angry: both eyebrows lowered below the neutral baseline.
    if f.left_eyebrow_raise < t.frown_eyebrow_drop_px
        && f.right_eyebrow_raise < t.frown_eyebrow_drop_px
    {
        return Some(Expression::Angry);
    }

    None
}
