//! Fixed anatomical index schemas for the keypoint sets the provider emits.
//!
//! Face indices follow the 468-point face mesh layout, hand indices the
//! 21-point hand layout. Index meaning is positional and never changes
//! between frames.

/// Points in a face keypoint set.
pub const FACE_POINT_COUNT: usize = 468;

/// Points in a hand keypoint set.
pub const HAND_POINT_COUNT: usize = 21;

// ---------------------------------------------------------------------------
// Face mesh indices (the subset the classifier reads)
// ---------------------------------------------------------------------------

/// Middle point of the left eyebrow.
pub const LEFT_EYEBROW_MID: usize = 66;
/// Middle point of the right eyebrow.
pub const RIGHT_EYEBROW_MID: usize = 296;

/// Two reference points between the eyes; their midpoint is the neutral
/// baseline the eyebrow raise is measured against.
pub const BROW_REF_UPPER: usize = 8;
pub const BROW_REF_LOWER: usize = 168;

pub const UPPER_LIP: usize = 13;
pub const LOWER_LIP: usize = 14;

/// Inner lip corners, used for the mouth width.
pub const MOUTH_INNER_LEFT: usize = 78;
pub const MOUTH_INNER_RIGHT: usize = 308;

/// Outer mouth corners, used for the smile curl check.
pub const MOUTH_CORNER_LEFT: usize = 61;
pub const MOUTH_CORNER_RIGHT: usize = 291;

// ---------------------------------------------------------------------------
// Hand landmark indices
// ---------------------------------------------------------------------------

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Hand skeleton connections for overlay rendering.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (INDEX_MCP, MIDDLE_MCP),
];
