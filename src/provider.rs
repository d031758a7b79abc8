//! Landmark provider: the black box that turns a frame into keypoint sets.
//!
//! The concrete implementation runs ONNX models. Face: UltraFace detection
//! for the ROI, then a 468-point mesh on the crop. Hand: a 21-point landmark
//! model on the full frame with a handedness output. Missing model files
//! degrade to "nothing detected" with a startup warning, so the application
//! still runs end to end.

use anyhow::Result;
use colored::*;
use image::{imageops::FilterType, ImageBuffer, Rgb};
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;

use crate::detector::FaceDetector;
use crate::schema;
use crate::types::{DetectionMode, Handedness, KeypointSet, Point3D};

pub const FACE_DETECTION_MODEL: &str = "models/face_detection.onnx";
pub const FACE_MESH_MODEL: &str = "models/face_mesh.onnx";
pub const HAND_LANDMARK_MODEL: &str = "models/hand_landmark.onnx";

/// Mesh model input edge (square).
const MESH_INPUT_SIZE: u32 = 192;
/// Hand model input edge (square).
const HAND_INPUT_SIZE: u32 = 224;
/// Minimum hand presence score to accept the landmark output.
const HAND_SCORE_THRESHOLD: f32 = 0.5;

pub trait LandmarkProvider {
    /// 0 or 1 face keypoint sets, coordinates normalized to [0,1] in frame
    /// space. The point count per set is guaranteed by contract.
    fn detect_faces(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Vec<KeypointSet>>;

    /// 0-2 hand keypoint sets, each tagged with its handedness.
    fn detect_hands(
        &mut self,
        frame: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    ) -> Result<Vec<(KeypointSet, Handedness)>>;
}

pub struct OnnxLandmarkProvider {
    detector: Option<FaceDetector>,
    mesh_session: Option<Session>,
    hand_session: Option<Session>,
}

impl OnnxLandmarkProvider {
    /// Loads only the sessions the selected mode needs.
    pub fn new(mode: DetectionMode) -> Result<Self> {
        let mut detector = None;
        let mut mesh_session = None;
        let mut hand_session = None;

        if mode.includes_face() {
            if Path::new(FACE_DETECTION_MODEL).exists() {
                println!("Loading face detector from {}...", FACE_DETECTION_MODEL);
                detector = Some(FaceDetector::new(FACE_DETECTION_MODEL)?);
            } else {
                println!(
                    "{}",
                    format!("Face detector {} not found. Mesh accuracy will be poor.", FACE_DETECTION_MODEL).yellow()
                );
            }
            if Path::new(FACE_MESH_MODEL).exists() {
                println!("Loading face mesh from {}...", FACE_MESH_MODEL);
                mesh_session = Some(load_session(FACE_MESH_MODEL)?);
            } else {
                println!(
                    "{}",
                    format!("Face mesh {} not found. No faces will be detected.", FACE_MESH_MODEL).yellow()
                );
            }
        }

        if mode.includes_hand() {
            if Path::new(HAND_LANDMARK_MODEL).exists() {
                println!("Loading hand landmarks from {}...", HAND_LANDMARK_MODEL);
                hand_session = Some(load_session(HAND_LANDMARK_MODEL)?);
            } else {
                println!(
                    "{}",
                    format!("Hand model {} not found. No hands will be detected.", HAND_LANDMARK_MODEL).yellow()
                );
            }
        }

        Ok(Self {
            detector,
            mesh_session,
            hand_session,
        })
    }
}

fn load_session(path: &str) -> Result<Session> {
    Ok(Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(4)?
        .with_execution_providers([
            ort::execution_providers::CoreMLExecutionProvider::default().build(),
            ort::execution_providers::CPUExecutionProvider::default().build(),
        ])?
        .commit_from_file(path)?)
}

impl LandmarkProvider for OnnxLandmarkProvider {
    fn detect_faces(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Vec<KeypointSet>> {
        let session = match &mut self.mesh_session {
            Some(s) => s,
            None => return Ok(Vec::new()),
        };

        // ROI from the detector if we have one, full frame otherwise.
        let roi = match &mut self.detector {
            Some(det) => match det.detect(frame)? {
                Some(rect) => Some(rect),
                None => return Ok(Vec::new()),
            },
            None => None,
        };

        let edge = MESH_INPUT_SIZE as f32;
        let (crop, offset_x, offset_y, scale_x, scale_y) = if let Some(rect) = roi {
            // Expand the box slightly so the mesh sees some context.
            let pad_w = rect.width * 0.25;
            let pad_h = rect.height * 0.25;
            let x = (rect.x - pad_w / 2.0).max(0.0);
            let y = (rect.y - pad_h / 2.0).max(0.0);
            let w = (rect.width + pad_w).min(frame.width() as f32 - x);
            let h = (rect.height + pad_h).min(frame.height() as f32 - y);
            if w < 1.0 || h < 1.0 {
                return Ok(Vec::new());
            }

            let crop =
                image::imageops::crop_imm(frame, x as u32, y as u32, w as u32, h as u32).to_image();
            (crop, x, y, w / edge, h / edge)
        } else {
            (
                frame.clone(),
                0.0,
                0.0,
                frame.width() as f32 / edge,
                frame.height() as f32 / edge,
            )
        };

        let resized = image::imageops::resize(
            &crop,
            MESH_INPUT_SIZE,
            MESH_INPUT_SIZE,
            FilterType::Triangle,
        );
        let mut input_data =
            Vec::with_capacity((MESH_INPUT_SIZE * MESH_INPUT_SIZE * 3) as usize);
        for y in 0..MESH_INPUT_SIZE {
            for x in 0..MESH_INPUT_SIZE {
                let pixel = resized.get_pixel(x, y);
                input_data.push((pixel[0] as f32 / 127.5) - 1.0);
                input_data.push((pixel[1] as f32 / 127.5) - 1.0);
                input_data.push((pixel[2] as f32 / 127.5) - 1.0);
            }
        }

        let shape = vec![1, MESH_INPUT_SIZE as i64, MESH_INPUT_SIZE as i64, 3];
        let input = ort::value::Tensor::from_array((shape, input_data))?;
        let outputs = session.run(ort::inputs![input])?;
        let (_shape, data) = outputs[0].try_extract_tensor::<f32>()?;

        if data.len() < schema::FACE_POINT_COUNT * 3 {
            return Ok(Vec::new());
        }

        let frame_w = frame.width() as f32;
        let frame_h = frame.height() as f32;
        let mut points = Vec::with_capacity(schema::FACE_POINT_COUNT);
        for i in 0..schema::FACE_POINT_COUNT {
            // Mesh local (0..192) -> crop -> full frame -> normalized.
            let px = offset_x + data[i * 3] * scale_x;
            let py = offset_y + data[i * 3 + 1] * scale_y;
            points.push(Point3D {
                x: px / frame_w,
                y: py / frame_h,
                z: data[i * 3 + 2] / edge,
            });
        }

        Ok(vec![KeypointSet::new(points)])
    }

    fn detect_hands(
        &mut self,
        frame: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    ) -> Result<Vec<(KeypointSet, Handedness)>> {
        let session = match &mut self.hand_session {
            Some(s) => s,
            None => return Ok(Vec::new()),
        };

        let resized = image::imageops::resize(
            frame,
            HAND_INPUT_SIZE,
            HAND_INPUT_SIZE,
            FilterType::Triangle,
        );
        let mut input_data =
            Vec::with_capacity((HAND_INPUT_SIZE * HAND_INPUT_SIZE * 3) as usize);
        for y in 0..HAND_INPUT_SIZE {
            for x in 0..HAND_INPUT_SIZE {
                let pixel = resized.get_pixel(x, y);
                input_data.push(pixel[0] as f32 / 255.0);
                input_data.push(pixel[1] as f32 / 255.0);
                input_data.push(pixel[2] as f32 / 255.0);
            }
        }

        let shape = vec![1, HAND_INPUT_SIZE as i64, HAND_INPUT_SIZE as i64, 3];
        let input = ort::value::Tensor::from_array((shape, input_data))?;
        let outputs = session.run(ort::inputs![input])?;

        // Output order of the hand landmark export: 21x3 landmarks in input
        // pixel space, presence score, handedness scalar.
        let (_shape, landmarks) = outputs[0].try_extract_tensor::<f32>()?;
        let (_shape, score) = outputs[1].try_extract_tensor::<f32>()?;
        let (_shape, handedness_raw) = outputs[2].try_extract_tensor::<f32>()?;

        if score.first().copied().unwrap_or(0.0) < HAND_SCORE_THRESHOLD {
            return Ok(Vec::new());
        }
        if landmarks.len() < schema::HAND_POINT_COUNT * 3 {
            return Ok(Vec::new());
        }

        let edge = HAND_INPUT_SIZE as f32;
        let mut points = Vec::with_capacity(schema::HAND_POINT_COUNT);
        for i in 0..schema::HAND_POINT_COUNT {
            points.push(Point3D {
                x: landmarks[i * 3] / edge,
                y: landmarks[i * 3 + 1] / edge,
                z: landmarks[i * 3 + 2] / edge,
            });
        }

        let handedness = if handedness_raw.first().copied().unwrap_or(1.0) > 0.5 {
            Handedness::Right
        } else {
            Handedness::Left
        };

        Ok(vec![(KeypointSet::new(points), handedness)])
    }
}
