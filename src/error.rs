use thiserror::Error;

/// What kind of keypoint set an extractor expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypointKind {
    Face,
    Hand,
}

impl std::fmt::Display for KeypointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeypointKind::Face => write!(f, "face"),
            KeypointKind::Hand => write!(f, "hand"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DetectError {
    /// A keypoint set does not match the fixed anatomical schema. The
    /// offending set is skipped for the frame; the session continues.
    #[error("{kind} keypoint set has {got} points, expected {expected}")]
    ShapeMismatch {
        kind: KeypointKind,
        expected: usize,
        got: usize,
    },

    /// The frame source cannot produce another frame. Fatal to the running
    /// session.
    #[error("frame source failed: {0}")]
    ProviderReadFailure(String),
}
