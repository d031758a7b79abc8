//! UltraFace-style face detector, used only to find the ROI the mesh model
//! runs on.

use anyhow::Result;
use image::{imageops::FilterType, ImageBuffer, Rgb};
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;

use crate::types::Rect;

const INPUT_W: u32 = 320;
const INPUT_H: u32 = 240;
const SCORE_THRESHOLD: f32 = 0.7;

// UltraFace box decode variances.
const CENTER_VARIANCE: f32 = 0.1;
const SIZE_VARIANCE: f32 = 0.2;

pub struct FaceDetector {
    session: Session,
    priors: Vec<(f32, f32, f32, f32)>, // cx, cy, w, h, all normalized
}

impl FaceDetector {
    pub fn new(model_path: &str) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(4)?
            .with_execution_providers([
                ort::execution_providers::CoreMLExecutionProvider::default().build(),
                ort::execution_providers::CPUExecutionProvider::default().build(),
            ])?
            .commit_from_file(model_path)?;

        Ok(Self {
            session,
            priors: generate_priors(INPUT_W as usize, INPUT_H as usize),
        })
    }

    /// Highest-scoring face box in frame pixel coordinates, if any clears
    /// the score threshold.
    pub fn detect(&mut self, frame: &ImageBuffer<Rgb<u8>, Vec<u8>>) -> Result<Option<Rect>> {
        let resized = image::imageops::resize(frame, INPUT_W, INPUT_H, FilterType::Triangle);

        // NCHW, (pixel - 127) / 128.
        let mut input_data = Vec::with_capacity((3 * INPUT_W * INPUT_H) as usize);
        for channel in 0..3 {
            for y in 0..INPUT_H {
                for x in 0..INPUT_W {
                    let p = resized.get_pixel(x, y)[channel];
                    input_data.push((p as f32 - 127.0) / 128.0);
                }
            }
        }

        let input = Tensor::from_array((
            vec![1, 3, INPUT_H as i64, INPUT_W as i64],
            input_data,
        ))?;
        let (scores, boxes) = {
            let outputs = self.session.run(ort::inputs![input])?;
            let (_scores_shape, scores) = outputs["scores"].try_extract_tensor::<f32>()?;
            let (_boxes_shape, boxes) = outputs["boxes"].try_extract_tensor::<f32>()?;
            (scores.to_vec(), boxes.to_vec())
        };

        let best = self.decode_best(&scores, &boxes);

        Ok(best.map(|rect| {
            let sx = frame.width() as f32 / INPUT_W as f32;
            let sy = frame.height() as f32 / INPUT_H as f32;
            Rect::new(rect.x * sx, rect.y * sy, rect.width * sx, rect.height * sy)
        }))
    }

    /// Decode the raw anchor offsets and keep the single best candidate.
    fn decode_best(&self, scores: &[f32], boxes: &[f32]) -> Option<Rect> {
        let mut best_score = SCORE_THRESHOLD;
        let mut best = None;

        for (i, &(ax, ay, aw, ah)) in self.priors.iter().enumerate() {
            // Class 1 is "face".
            let score = scores[i * 2 + 1];
            if score <= best_score {
                continue;
            }

            let cx = boxes[i * 4] * CENTER_VARIANCE * aw + ax;
            let cy = boxes[i * 4 + 1] * CENTER_VARIANCE * ah + ay;
            let w = (boxes[i * 4 + 2] * SIZE_VARIANCE).exp() * aw;
            let h = (boxes[i * 4 + 3] * SIZE_VARIANCE).exp() * ah;

            best_score = score;
            best = Some(Rect::new(
                (cx - w / 2.0) * INPUT_W as f32,
                (cy - h / 2.0) * INPUT_H as f32,
                w * INPUT_W as f32,
                h * INPUT_H as f32,
            ));
        }

        best
    }
}

/// Standard UltraFace prior boxes for a 320x240 input.
fn generate_priors(width: usize, height: usize) -> Vec<(f32, f32, f32, f32)> {
    let strides = [8usize, 16, 32, 64];
    let min_boxes: [&[f32]; 4] = [
        &[10.0, 16.0, 24.0],
        &[32.0, 48.0],
        &[64.0, 96.0],
        &[128.0, 192.0, 256.0],
    ];

    let w = width as f32;
    let h = height as f32;
    let mut priors = Vec::new();

    for (stride, sizes) in strides.iter().zip(min_boxes.iter()) {
        let feature_w = (w / *stride as f32).ceil() as usize;
        let feature_h = (h / *stride as f32).ceil() as usize;

        for v in 0..feature_h {
            for u in 0..feature_w {
                let cx = (u as f32 * *stride as f32 + *stride as f32 / 2.0) / w;
                let cy = (v as f32 * *stride as f32 + *stride as f32 / 2.0) / h;
                for &size in sizes.iter() {
                    priors.push((cx, cy, size / w, size / h));
                }
            }
        }
    }

    priors
}
