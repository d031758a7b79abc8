//! Per-frame orchestration.
//!
//! The session owns the detection mode and the running loop: pull a frame,
//! dispatch it to the classifiers the mode selects, hand the labels to the
//! sink. Classification is memoryless; no iteration reads anything from a
//! previous one.

use anyhow::{bail, Result};
use colored::*;
use image::{ImageBuffer, Rgb};

use crate::config::Thresholds;
use crate::error::DetectError;
use crate::expression::classify_expression;
use crate::features::{FaceFeatures, HandFeatures};
use crate::gesture::classify_gesture;
use crate::provider::LandmarkProvider;
use crate::types::{DetectionMode, FrameResult, Handedness, KeypointSet};

/// Blocking source of camera frames.
pub trait FrameSource {
    fn capture(&mut self) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>>;
}

/// Consumer of one processed frame. `quit_requested` is polled once per
/// iteration, never mid-computation.
pub trait FrameSink {
    fn quit_requested(&mut self) -> bool;
    fn present(
        &mut self,
        frame: &ImageBuffer<Rgb<u8>, Vec<u8>>,
        output: &FrameOutput,
    ) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingMode,
    Running,
    Terminated,
}

/// Labels plus the raw detections behind them, for overlay drawing. Owned by
/// the iteration that produced it.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    pub result: FrameResult,
    pub face: Option<KeypointSet>,
    pub hands: Vec<(KeypointSet, Handedness)>,
}

pub struct Session {
    state: SessionState,
    mode: Option<DetectionMode>,
    mirror: bool,
    thresholds: Thresholds,
}

impl Session {
    pub fn new(mirror: bool, thresholds: Thresholds) -> Self {
        Self {
            state: SessionState::AwaitingMode,
            mode: None,
            mirror,
            thresholds,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn mode(&self) -> Option<DetectionMode> {
        self.mode
    }

    /// The one AwaitingMode -> Running transition. The mode is immutable for
    /// the rest of the session's life.
    pub fn start(&mut self, mode: DetectionMode) -> Result<()> {
        if self.state != SessionState::AwaitingMode {
            bail!("session already started (state {:?})", self.state);
        }
        self.mode = Some(mode);
        self.state = SessionState::Running;
        Ok(())
    }

    /// Classify one frame. A keypoint set that fails shape validation is
    /// skipped as if nothing was detected; the frame still produces a result.
    pub fn process_frame(
        &mut self,
        provider: &mut dyn LandmarkProvider,
        frame: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    ) -> Result<FrameOutput> {
        let mode = match self.mode {
            Some(m) => m,
            None => bail!("no detection mode selected"),
        };
        let (width, height) = frame.dimensions();
        let mut out = FrameOutput::default();

        if mode.includes_face() {
            if let Some(set) = provider.detect_faces(frame)?.into_iter().next() {
                match FaceFeatures::extract(&set, width, height) {
                    Ok(features) => {
                        out.result.expression =
                            classify_expression(&features, &self.thresholds.expression);
                        out.face = Some(set);
                    }
                    Err(e) => {
                        eprintln!("{}", format!("Skipping face: {}", e).yellow());
                    }
                }
            }
        }

        if mode.includes_hand() {
            for (set, handedness) in provider.detect_hands(frame)? {
                match HandFeatures::extract(&set) {
                    Ok(features) => {
                        // Last hand with a gesture wins the single display
                        // slot; a gesture-less hand does not clear it.
                        if let Some(g) =
                            classify_gesture(&features, handedness, &self.thresholds.gesture)
                        {
                            out.result.gesture = Some(g);
                        }
                        out.hands.push((set, handedness));
                    }
                    Err(e) => {
                        eprintln!("{}", format!("Skipping hand: {}", e).yellow());
                    }
                }
            }
        }

        Ok(out)
    }

    /// The Running loop. Returns Ok on quit, Err on a frame-source failure;
    /// either way the session ends Terminated and the caller's resources are
    /// released by their owners.
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        provider: &mut dyn LandmarkProvider,
        sink: &mut dyn FrameSink,
    ) -> Result<()> {
        if self.state != SessionState::Running {
            bail!("session is not running (state {:?})", self.state);
        }
        let result = self.run_loop(source, provider, sink);
        self.state = SessionState::Terminated;
        result
    }

    fn run_loop(
        &mut self,
        source: &mut dyn FrameSource,
        provider: &mut dyn LandmarkProvider,
        sink: &mut dyn FrameSink,
    ) -> Result<()> {
        loop {
            if sink.quit_requested() {
                return Ok(());
            }

            let mut frame = match source.capture() {
                Ok(f) => f,
                Err(e) => {
                    return Err(DetectError::ProviderReadFailure(format!("{:#}", e)).into());
                }
            };

            if self.mirror {
                image::imageops::flip_horizontal_in_place(&mut frame);
            }

            let output = self.process_frame(provider, &frame)?;
            sink.present(&frame, &output)?;
        }
    }
}
