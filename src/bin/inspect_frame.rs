//! Run the landmark provider and classifiers on a single image and print
//! the derived features and labels as JSON. Handy for checking what the
//! rules see without a camera.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use rusty_signs::args::ModeArg;
use rusty_signs::config::Thresholds;
use rusty_signs::expression::classify_expression;
use rusty_signs::features::{FaceFeatures, HandFeatures};
use rusty_signs::gesture::classify_gesture;
use rusty_signs::provider::{LandmarkProvider, OnnxLandmarkProvider};
use rusty_signs::types::{DetectionMode, Handedness};

#[derive(Parser, Debug)]
#[command(name = "inspect_frame")]
#[command(about = "Classify one image file and dump features as JSON", long_about = None)]
struct Args {
    /// Input image file
    #[arg(required = true)]
    image: PathBuf,

    /// Which detectors to run
    #[arg(short, long, value_enum, default_value = "both")]
    mode: ModeArg,
}

#[derive(Serialize)]
struct Output {
    image: String,
    width: u32,
    height: u32,
    face: Option<FaceOutput>,
    hands: Vec<HandOutput>,
}

#[derive(Serialize)]
struct FaceOutput {
    expression: Option<&'static str>,
    mouth_aspect_ratio: f32,
    left_eyebrow_raise_px: f32,
    right_eyebrow_raise_px: f32,
}

#[derive(Serialize)]
struct HandOutput {
    handedness: &'static str,
    gesture: Option<&'static str>,
    thumb_index_distance: f32,
    extended: [bool; 5],
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mode: DetectionMode = args.mode.into();
    let thresholds = Thresholds::default();

    let img = image::ImageReader::open(&args.image)
        .with_context(|| format!("Failed to open {}", args.image.display()))?
        .decode()
        .context("Failed to decode image")?
        .to_rgb8();
    let (width, height) = img.dimensions();

    let mut provider = OnnxLandmarkProvider::new(mode)?;

    let mut output = Output {
        image: args.image.display().to_string(),
        width,
        height,
        face: None,
        hands: Vec::new(),
    };

    if mode.includes_face() {
        if let Some(set) = provider.detect_faces(&img)?.into_iter().next() {
            let features = FaceFeatures::extract(&set, width, height)?;
            output.face = Some(FaceOutput {
                expression: classify_expression(&features, &thresholds.expression)
                    .map(|e| e.as_str()),
                mouth_aspect_ratio: features.mouth_aspect_ratio,
                left_eyebrow_raise_px: features.left_eyebrow_raise,
                right_eyebrow_raise_px: features.right_eyebrow_raise,
            });
        }
    }

    if mode.includes_hand() {
        for (set, handedness) in provider.detect_hands(&img)? {
            let features = HandFeatures::extract(&set)?;
            output.hands.push(HandOutput {
                handedness: match handedness {
                    Handedness::Left => "Left",
                    Handedness::Right => "Right",
                },
                gesture: classify_gesture(&features, handedness, &thresholds.gesture)
                    .map(|g| g.as_str()),
                thumb_index_distance: features.thumb_index_distance,
                extended: [
                    features.thumb_extended,
                    features.index_extended,
                    features.middle_extended,
                    features.ring_extended,
                    features.pinky_extended,
                ],
            });
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
