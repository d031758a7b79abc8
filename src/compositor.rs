//! Overlay compositing: landmarks, labels and HUD text drawn straight into
//! the RGB frame buffer, then pushed to the window.

use anyhow::Result;
use image::{ImageBuffer, Rgb};

use crate::config::UiConfig;
use crate::font;
use crate::output::WindowOutput;
use crate::schema::HAND_SKELETON;
use crate::session::{FrameOutput, FrameSink};
use crate::ttf::FontRenderer;
use crate::types::{DetectionMode, KeypointSet};

pub struct OverlayCompositor {
    window: WindowOutput,
    font: Option<FontRenderer>,
    ui: UiConfig,
    mode: DetectionMode,
    show_landmarks: bool,
}

impl OverlayCompositor {
    pub fn new(
        window: WindowOutput,
        ui: UiConfig,
        mode: DetectionMode,
        show_landmarks: bool,
    ) -> Self {
        let font = FontRenderer::try_load(&ui.font_family);
        Self {
            window,
            font,
            ui,
            mode,
            show_landmarks,
        }
    }

    fn draw_text(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        text: &str,
        color: (u8, u8, u8),
    ) {
        if let Some(fr) = &self.font {
            fr.draw_text(buffer, width, height, x, y, text, color, self.ui.font_size_pt as f32);
        } else {
            font::draw_text_line(buffer, width, height, x, y, text, color, self.ui.label_scale);
        }
    }

    fn text_height(&self) -> usize {
        if let Some(fr) = &self.font {
            fr.measure_height(self.ui.font_size_pt as f32) + 5
        } else {
            font::line_height(self.ui.label_scale)
        }
    }

    fn draw_keypoints(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
        set: &KeypointSet,
        color: (u8, u8, u8),
    ) {
        let dot = self.ui.landmark_dot_size.max(1);
        for p in &set.points {
            let x = (p.x * width as f32) as usize;
            let y = (p.y * height as f32) as usize;
            for dy in 0..dot {
                for dx in 0..dot {
                    let px = x + dx;
                    let py = y + dy;
                    if px < width && py < height {
                        let idx = (py * width + px) * 3;
                        if idx + 2 < buffer.len() {
                            buffer[idx] = color.0;
                            buffer[idx + 1] = color.1;
                            buffer[idx + 2] = color.2;
                        }
                    }
                }
            }
        }
    }

    fn draw_hand_skeleton(
        &self,
        buffer: &mut [u8],
        width: usize,
        height: usize,
        set: &KeypointSet,
        color: (u8, u8, u8),
    ) {
        for &(a, b) in HAND_SKELETON.iter() {
            if a >= set.len() || b >= set.len() {
                continue;
            }
            let ax = set[a].x * width as f32;
            let ay = set[a].y * height as f32;
            let bx = set[b].x * width as f32;
            let by = set[b].y * height as f32;

            let mut t = 0.0;
            while t < 1.0 {
                let px = ax + (bx - ax) * t;
                let py = ay + (by - ay) * t;
                if px >= 0.0 && py >= 0.0 && (px as usize) < width && (py as usize) < height {
                    let idx = (py as usize * width + px as usize) * 3;
                    if idx + 2 < buffer.len() {
                        buffer[idx] = color.0;
                        buffer[idx + 1] = color.1;
                        buffer[idx + 2] = color.2;
                    }
                }
                t += 0.005;
            }
        }
        self.draw_keypoints(buffer, width, height, set, color);
    }
}

impl FrameSink for OverlayCompositor {
    fn quit_requested(&mut self) -> bool {
        self.window.quit_requested()
    }

    fn present(
        &mut self,
        frame: &ImageBuffer<Rgb<u8>, Vec<u8>>,
        output: &FrameOutput,
    ) -> Result<()> {
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        let mut buffer = frame.as_raw().clone();

        if self.show_landmarks {
            if let Some(face) = &output.face {
                let color = parse_hex(&self.ui.mesh_color_hex);
                self.draw_keypoints(&mut buffer, width, height, face, color);
            }
            let hand_color = parse_hex(&self.ui.hand_color_hex);
            for (hand, _handedness) in &output.hands {
                self.draw_hand_skeleton(&mut buffer, width, height, hand, hand_color);
            }
        }

        // Mode title, top left.
        self.draw_text(
            &mut buffer,
            width,
            height,
            20,
            10,
            self.mode.title(),
            (255, 255, 255),
        );

        // Detected labels, large, stacked below the title.
        let line_height = self.text_height();
        let mut y = 10 + line_height * 2;
        if let Some(expr) = output.result.expression {
            let color = parse_hex(&self.ui.expression_color_hex);
            self.draw_text(&mut buffer, width, height, 50, y, expr.as_str(), color);
            y += line_height;
        }
        if let Some(gesture) = output.result.gesture {
            let color = parse_hex(&self.ui.gesture_color_hex);
            self.draw_text(&mut buffer, width, height, 50, y, gesture.as_str(), color);
        }

        // Quit hint, bottom left.
        let hint_y = height.saturating_sub(line_height + 10);
        self.draw_text(
            &mut buffer,
            width,
            height,
            20,
            hint_y,
            "APPUYEZ SUR 'Q' POUR QUITTER",
            (255, 255, 255),
        );

        self.window.update(&buffer)
    }
}

pub fn parse_hex(hex: &str) -> (u8, u8, u8) {
    if hex.len() == 7 && hex.starts_with('#') {
        let r = u8::from_str_radix(&hex[1..3], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[3..5], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[5..7], 16).unwrap_or(0);
        (r, g, b)
    } else {
        (255, 0, 0) // Default Red
    }
}
